use crate::reflect::dims::{MismatchPolicy, array_to_list, list_to_array_with};
use crate::reflect::inject::{InjectOptions, produce_injected_object};
use crate::reflect::temporal::{parse_temporal, project};
use crate::reflect::{CollectionKind, CollectionValue, Primitive, ReflectError, Registry, Result, TypeDesc, Value};

/// Value as it would be stored into a slot of type `target`, allowing only
/// identity and primitive widening (`byte → short → int → long → float →
/// double`, `char → int`). `None` when the slot cannot take it.
pub fn assign_compatible(registry: &Registry, value: &Value, target: &TypeDesc) -> Option<Value> {
	match (target, value) {
		(_, Value::Null) => target.accepts_null().then_some(Value::Null),
		(TypeDesc::Object, _) => Some(value.clone()),
		(TypeDesc::Primitive(kind), _) => widen(value, *kind),
		(TypeDesc::Wrapper(kind), _) if runtime_primitive(value) == Some(*kind) => Some(value.clone()),
		(TypeDesc::String, Value::String(_)) => Some(value.clone()),
		(TypeDesc::Number, _) if value.is_numeric() => Some(value.clone()),
		(TypeDesc::Temporal(kind), Value::Temporal(item)) if item.kind() == *kind => Some(value.clone()),
		(TypeDesc::Enum(name), Value::Enum(item)) if item.type_name == *name => Some(value.clone()),
		(TypeDesc::Class(name), Value::Object(item)) if registry.is_subclass_of(&item.class_name, name) => Some(value.clone()),
		(TypeDesc::Interface(name), Value::Object(item)) if registry.implements(&item.class_name, name) => Some(value.clone()),
		(TypeDesc::Collection(CollectionKind::Map), Value::Map(_)) => Some(value.clone()),
		(TypeDesc::Collection(kind), Value::Collection(item)) if item.kind == *kind => Some(value.clone()),
		(TypeDesc::Array(component), Value::Array(item)) if array_component_fits(component, &item.component) => Some(value.clone()),
		_ => None,
	}
}

/// Parse text into `target`.
///
/// `String` and `Object` targets take the text unchanged. Other targets reject
/// empty text. Integral targets fall back to a floating parse that is accepted
/// only when it converts back without loss (`"20.0"` → 20, `"20.5"` fails).
pub fn cast_from_text(registry: &Registry, text: &str, target: &TypeDesc) -> Result<Value> {
	if matches!(target, TypeDesc::String | TypeDesc::Object) {
		return Ok(Value::String(text.to_owned()));
	}
	if text.is_empty() {
		return Err(coercion_failed(&Value::from(text), target));
	}

	let parsed = match target {
		TypeDesc::Primitive(kind) | TypeDesc::Wrapper(kind) => parse_primitive(text, *kind),
		TypeDesc::Number => parse_primitive(text, Primitive::Int)
			.or_else(|| parse_primitive(text, Primitive::Long))
			.or_else(|| parse_primitive(text, Primitive::Double)),
		TypeDesc::Temporal(kind) => return parse_temporal(text, *kind).map(Value::Temporal),
		TypeDesc::Enum(name) => {
			let def = registry.enum_def(name).ok_or_else(|| ReflectError::EnumNotFound { name: name.to_string() })?;
			def.constant(text).map(Value::Enum)
		}
		_ => None,
	};
	parsed.ok_or_else(|| coercion_failed(&Value::from(text), target))
}

/// Coerce with [`MismatchPolicy::Fail`] for nested array leaves.
pub fn coerce(registry: &Registry, value: &Value, target: &TypeDesc) -> Result<Value> {
	coerce_with(registry, value, target, MismatchPolicy::Fail)
}

/// Convert a loosely typed value into `target`, using default injection
/// options with `policy` for nested maps and array leaves.
pub fn coerce_with(registry: &Registry, value: &Value, target: &TypeDesc, policy: MismatchPolicy) -> Result<Value> {
	let options = InjectOptions {
		leaf_policy: policy,
		..InjectOptions::default()
	};
	coerce_with_options(registry, value, target, &options)
}

/// Convert a loosely typed value into `target`.
///
/// Tries plain assignment first, then text parsing, lossless numeric
/// conversion, temporal projection, list/array conversion, and nested
/// injection of maps into classes. Nested maps are injected with `options`;
/// a nested field that fails every path fails the whole conversion.
pub fn coerce_with_options(registry: &Registry, value: &Value, target: &TypeDesc, options: &InjectOptions) -> Result<Value> {
	if let Some(assigned) = assign_compatible(registry, value, target) {
		return Ok(assigned);
	}

	let coerced = match (value, target) {
		(Value::String(text), _) => return cast_from_text(registry, text, target),
		(Value::Char(item), TypeDesc::String) => Some(Value::String(item.to_string())),
		(Value::Enum(item), TypeDesc::String) => Some(Value::String(item.constant.to_string())),
		(Value::Char(_) | Value::Byte(_) | Value::Short(_) | Value::Int(_) | Value::Long(_) | Value::Float(_) | Value::Double(_), _) => {
			match target {
				TypeDesc::Primitive(kind) | TypeDesc::Wrapper(kind) => convert_number(value, *kind),
				_ => None,
			}
		}
		(Value::Temporal(item), TypeDesc::Temporal(kind)) => project(*item, *kind).map(Value::Temporal),
		(Value::Array(_) | Value::Collection(_), TypeDesc::Array(_)) => {
			let items = value.sequence_items().unwrap_or_default();
			return list_to_array_with(registry, items, target, options).map(Value::Array);
		}
		(Value::Array(_) | Value::Collection(_), TypeDesc::Collection(kind)) if *kind != CollectionKind::Map => Some(Value::Collection(to_collection(value, *kind))),
		(Value::Map(map), TypeDesc::Class(name)) => {
			let injected = produce_injected_object(registry, target, map, options)?;
			if let Some((field, err)) = injected.report.failures().next() {
				return Err(ReflectError::NestedInjection {
					class_name: name.to_string(),
					field: field.to_owned(),
					reason: err.to_string(),
				});
			}
			return Ok(injected.value);
		}
		_ => None,
	};
	coerced.ok_or_else(|| coercion_failed(value, target))
}

fn coercion_failed(value: &Value, target: &TypeDesc) -> ReflectError {
	let rendered = value.render();
	tracing::debug!(value = %rendered, target = %target, "coercion failed");
	ReflectError::Coercion {
		value: rendered,
		target: target.to_string(),
	}
}

fn parse_primitive(text: &str, kind: Primitive) -> Option<Value> {
	match kind {
		Primitive::Boolean => parse_bool(text).map(Value::Bool),
		Primitive::Char => text.chars().next().map(Value::Char),
		Primitive::Byte => parse_integral(text, i64::from(i8::MIN), i64::from(i8::MAX)).map(|v| Value::Byte(v as i8)),
		Primitive::Short => parse_integral(text, i64::from(i16::MIN), i64::from(i16::MAX)).map(|v| Value::Short(v as i16)),
		Primitive::Int => parse_integral(text, i64::from(i32::MIN), i64::from(i32::MAX)).map(|v| Value::Int(v as i32)),
		Primitive::Long => parse_integral(text, i64::MIN, i64::MAX).map(Value::Long),
		Primitive::Float => text.trim().parse::<f32>().ok().map(Value::Float),
		Primitive::Double => text.trim().parse::<f64>().ok().map(Value::Double),
	}
}

fn parse_bool(text: &str) -> Option<bool> {
	if text.eq_ignore_ascii_case("true") || text == "1" {
		Some(true)
	} else if text.eq_ignore_ascii_case("false") || text == "0" {
		Some(false)
	} else {
		None
	}
}

fn parse_integral(text: &str, min: i64, max: i64) -> Option<i64> {
	if let Ok(value) = text.parse::<i64>() {
		return (min..=max).contains(&value).then_some(value);
	}
	let float = text.trim().parse::<f64>().ok()?;
	lossless_whole(float).filter(|value| (min..=max).contains(value))
}

/// Whole `i64` equal to `value`, or `None` when any fraction or range loss occurs.
fn lossless_whole(value: f64) -> Option<i64> {
	const BOUND: f64 = 9_223_372_036_854_775_808.0;
	if !value.is_finite() || value.fract() != 0.0 || !(-BOUND..BOUND).contains(&value) {
		return None;
	}
	let whole = value as i64;
	(whole as f64 == value).then_some(whole)
}

fn runtime_primitive(value: &Value) -> Option<Primitive> {
	Some(match value {
		Value::Bool(_) => Primitive::Boolean,
		Value::Char(_) => Primitive::Char,
		Value::Byte(_) => Primitive::Byte,
		Value::Short(_) => Primitive::Short,
		Value::Int(_) => Primitive::Int,
		Value::Long(_) => Primitive::Long,
		Value::Float(_) => Primitive::Float,
		Value::Double(_) => Primitive::Double,
		_ => return None,
	})
}

fn widens_to(source: Primitive, target: Primitive) -> bool {
	use Primitive::{Byte, Char, Double, Float, Int, Long, Short};
	match source {
		Byte => matches!(target, Short | Int | Long | Float | Double),
		Short | Char => matches!(target, Int | Long | Float | Double),
		Int => matches!(target, Long | Float | Double),
		Long => matches!(target, Float | Double),
		Float => target == Double,
		_ => false,
	}
}

fn widen(value: &Value, kind: Primitive) -> Option<Value> {
	let source = runtime_primitive(value)?;
	if source == kind {
		return Some(value.clone());
	}
	if !widens_to(source, kind) {
		return None;
	}
	let out = match kind {
		Primitive::Short => Value::Short(integral(value)? as i16),
		Primitive::Int => Value::Int(integral(value)? as i32),
		Primitive::Long => Value::Long(integral(value)?),
		Primitive::Float => Value::Float(integral(value).map(|v| v as f64).or_else(|| value.as_f64())? as f32),
		Primitive::Double => Value::Double(integral(value).map(|v| v as f64).or_else(|| value.as_f64())?),
		_ => return None,
	};
	Some(out)
}

/// Whole-number payload, characters included as code points.
fn integral(value: &Value) -> Option<i64> {
	match value {
		Value::Char(item) => Some(i64::from(u32::from(*item))),
		other => other.as_i64(),
	}
}

fn convert_number(value: &Value, kind: Primitive) -> Option<Value> {
	let whole = || integral(value).or_else(|| value.as_f64().and_then(lossless_whole));
	match kind {
		Primitive::Boolean => None,
		Primitive::Byte => i8::try_from(whole()?).ok().map(Value::Byte),
		Primitive::Short => i16::try_from(whole()?).ok().map(Value::Short),
		Primitive::Int => i32::try_from(whole()?).ok().map(Value::Int),
		Primitive::Long => whole().map(Value::Long),
		Primitive::Char => u32::try_from(whole()?).ok().and_then(char::from_u32).map(Value::Char),
		Primitive::Float => match integral(value) {
			Some(item) => {
				let narrow = item as f32;
				(narrow as i64 == item).then_some(Value::Float(narrow))
			}
			None => {
				let wide = value.as_f64()?;
				let narrow = wide as f32;
				(f64::from(narrow) == wide || wide.is_nan()).then_some(Value::Float(narrow))
			}
		},
		Primitive::Double => match integral(value) {
			Some(item) => {
				let wide = item as f64;
				(wide as i64 == item).then_some(Value::Double(wide))
			}
			None => value.as_f64().map(Value::Double),
		},
	}
}

fn array_component_fits(target: &TypeDesc, source: &TypeDesc) -> bool {
	target == source || (*target == TypeDesc::Object && !source.is_primitive())
}

fn to_collection(value: &Value, kind: CollectionKind) -> CollectionValue {
	let mut out = CollectionValue::new(kind);
	for item in value.sequence_items().unwrap_or_default() {
		let member = match item {
			Value::Array(inner) => Value::Collection(array_to_list(inner)),
			other => other.clone(),
		};
		out.insert(member);
	}
	out
}

#[cfg(test)]
mod tests;
