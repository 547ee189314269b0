use serde::{Deserialize, Serialize};

use crate::reflect::coerce::{assign_compatible, coerce_with_options};
use crate::reflect::dims::MismatchPolicy;
use crate::reflect::factory::produce_new_instance;
use crate::reflect::naming::{AccessorKind, CodingStyle, accessor_name};
use crate::reflect::registry::{FieldAccess, FieldDef, MethodDef};
use crate::reflect::temporal::parse_temporal;
use crate::reflect::{FieldMap, ObjectValue, ReflectError, Registry, Result, TypeDesc, Value};

/// Behavior switches for field injection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InjectOptions {
	/// Accessor naming convention tried when direct assignment is impossible.
	pub style: CodingStyle,
	/// Coerce values whose type does not match the field.
	pub force_coercion: bool,
	/// Look for accessors on superclasses as well as the target class.
	pub search_superclasses: bool,
	/// Inject inherited fields in addition to the declared ones.
	pub include_inherited_fields: bool,
	/// Leaf handling while converting lists into array fields.
	pub leaf_policy: MismatchPolicy,
}

impl Default for InjectOptions {
	fn default() -> Self {
		Self {
			style: CodingStyle::CamelCase,
			force_coercion: true,
			search_superclasses: true,
			include_inherited_fields: false,
			leaf_policy: MismatchPolicy::Skip,
		}
	}
}

impl InjectOptions {
	/// No coercion, declared accessors only, failing array leaves.
	pub fn strict() -> Self {
		Self {
			style: CodingStyle::CamelCase,
			force_coercion: false,
			search_superclasses: false,
			include_inherited_fields: false,
			leaf_policy: MismatchPolicy::Fail,
		}
	}

	/// Every fallback enabled, inherited fields included.
	pub fn lenient() -> Self {
		Self {
			include_inherited_fields: true,
			..Self::default()
		}
	}

	/// Same options with a different coding style.
	pub fn with_style(mut self, style: CodingStyle) -> Self {
		self.style = style;
		self
	}
}

/// Which path stored a field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignPath {
	/// Direct write to a visible field.
	Direct,
	/// Direct write after an accessibility override.
	Override,
	/// Direct write of a coerced value.
	Coerced,
	/// Setter invocation.
	Accessor {
		/// Setter name.
		method: Box<str>,
	},
	/// Setter invocation with a value coerced to its parameter type.
	AccessorCoerced {
		/// Setter name.
		method: Box<str>,
	},
}

/// Result of handling one field.
#[derive(Debug)]
pub enum FieldOutcome {
	/// Value stored.
	Assigned(AssignPath),
	/// Mapping had no entry for the field.
	Absent,
	/// Explicit null for a primitive field; left at default.
	NullForPrimitive,
	/// Every path failed; field left at default.
	Failed(ReflectError),
}

/// Outcome for one named field.
#[derive(Debug)]
pub struct FieldReport {
	/// Field name.
	pub field: Box<str>,
	/// What happened.
	pub outcome: FieldOutcome,
}

/// Per-field outcomes of one injection call.
#[derive(Debug, Default)]
pub struct InjectReport {
	/// Outcomes in field order.
	pub fields: Vec<FieldReport>,
}

impl InjectReport {
	/// Outcome for `field`.
	pub fn outcome(&self, field: &str) -> Option<&FieldOutcome> {
		self.fields.iter().find(|item| item.field.as_ref() == field).map(|item| &item.outcome)
	}

	/// Number of fields that received a value.
	pub fn assigned_count(&self) -> usize {
		self.fields.iter().filter(|item| matches!(item.outcome, FieldOutcome::Assigned(_))).count()
	}

	/// Fields whose every path failed.
	pub fn failures(&self) -> impl Iterator<Item = (&str, &ReflectError)> {
		self.fields.iter().filter_map(|item| match &item.outcome {
			FieldOutcome::Failed(err) => Some((item.field.as_ref(), err)),
			_ => None,
		})
	}

	/// Whether no field failed.
	pub fn is_complete(&self) -> bool {
		self.failures().next().is_none()
	}
}

/// Injected value with its report.
#[derive(Debug)]
pub struct Injected {
	/// Built value.
	pub value: Value,
	/// Per-field outcomes.
	pub report: InjectReport,
}

/// Reject targets that can never receive fields: primitives, arrays, and
/// interfaces.
pub fn check_target_for_injection(ty: &TypeDesc) -> Result<()> {
	let reason = match ty {
		TypeDesc::Primitive(_) => "target type cannot be a primitive",
		TypeDesc::Array(_) => "target type cannot be an array",
		TypeDesc::Interface(_) | TypeDesc::Collection(_) => "target type cannot be an interface",
		_ => return Ok(()),
	};
	Err(ReflectError::UnsuitableTarget {
		type_name: ty.to_string(),
		reason,
	})
}

/// Build a default instance of `ty` and inject `data` into it.
///
/// Non-class targets that pass the precondition (wrappers, `String`, `Number`,
/// `Object`) come back at their default with an empty report. Enum targets
/// take a single value through [`produce_injected_enum`].
pub fn produce_injected_object(registry: &Registry, ty: &TypeDesc, data: &FieldMap, options: &InjectOptions) -> Result<Injected> {
	check_target_for_injection(ty)?;
	if matches!(ty, TypeDesc::Enum(_)) {
		return Err(ReflectError::UnsuitableTarget {
			type_name: ty.to_string(),
			reason: "enum targets take a single value, not a field mapping",
		});
	}

	match produce_new_instance(registry, ty)? {
		Value::Object(mut object) => {
			let report = if matches!(ty, TypeDesc::Class(_)) {
				inject_into(registry, &mut object, data, options)?
			} else {
				InjectReport::default()
			};
			Ok(Injected {
				value: Value::Object(object),
				report,
			})
		}
		value => Ok(Injected {
			value,
			report: InjectReport::default(),
		}),
	}
}

/// Select an enum constant from a single value: constant name text or an
/// enum value of the same type.
pub fn produce_injected_enum(registry: &Registry, ty: &TypeDesc, value: &Value) -> Result<Value> {
	let TypeDesc::Enum(name) = ty else {
		return Err(ReflectError::UnsuitableTarget {
			type_name: ty.to_string(),
			reason: "not an enum type",
		});
	};
	let def = registry.enum_def(name).ok_or_else(|| ReflectError::EnumNotFound { name: name.to_string() })?;
	let selected = match value {
		Value::String(text) => def.constant(text).map(Value::Enum),
		Value::Enum(item) if item.type_name == *name => Some(value.clone()),
		_ => None,
	};
	selected.ok_or_else(|| ReflectError::Coercion {
		value: value.render(),
		target: ty.to_string(),
	})
}

/// Dispatch on the supplied value: maps are injected into classes, enum
/// targets select a constant, anything else is coerced.
pub fn produce_injected_value(registry: &Registry, ty: &TypeDesc, value: &Value, options: &InjectOptions) -> Result<Injected> {
	let value = match (ty, value) {
		(TypeDesc::Enum(_), _) => produce_injected_enum(registry, ty, value)?,
		(_, Value::Map(data)) if !matches!(ty, TypeDesc::Collection(_) | TypeDesc::Object) => {
			return produce_injected_object(registry, ty, data, options);
		}
		_ => coerce_with_options(registry, value, ty, options)?,
	};
	Ok(Injected {
		value,
		report: InjectReport::default(),
	})
}

/// Inject `data` into an existing instance.
///
/// Fields are independent: a field whose every path fails keeps its current
/// value, is reported as `Failed`, and injection continues.
pub fn inject_into(registry: &Registry, object: &mut ObjectValue, data: &FieldMap, options: &InjectOptions) -> Result<InjectReport> {
	let class_name = object.class_name.to_string();
	let fields: Vec<&FieldDef> = if options.include_inherited_fields {
		registry.all_fields(&class_name)?
	} else {
		let def = registry.class(&class_name).ok_or_else(|| ReflectError::ClassNotFound { name: class_name.clone() })?;
		def.fields.iter().collect()
	};

	let mut report = InjectReport::default();
	for field in fields {
		let outcome = inject_field(registry, object, field, data, options);
		match &outcome {
			FieldOutcome::Failed(err) => {
				tracing::warn!(class = %class_name, field = %field.name, error = %err, "field left at default");
			}
			FieldOutcome::Assigned(path) => {
				tracing::debug!(class = %class_name, field = %field.name, path = ?path, "field assigned");
			}
			FieldOutcome::Absent | FieldOutcome::NullForPrimitive => {}
		}
		report.fields.push(FieldReport {
			field: field.name.clone(),
			outcome,
		});
	}
	Ok(report)
}

fn inject_field(registry: &Registry, object: &mut ObjectValue, field: &FieldDef, data: &FieldMap, options: &InjectOptions) -> FieldOutcome {
	let Some(raw) = data.get(field.name.as_ref()) else {
		return FieldOutcome::Absent;
	};
	if raw.is_null() && field.ty.is_primitive() {
		return FieldOutcome::NullForPrimitive;
	}

	let value = match prepare_value(registry, field, raw) {
		Ok(value) => value,
		Err(err) => return FieldOutcome::Failed(err),
	};

	let direct_err = match assign_direct(registry, object, field, value.clone(), options) {
		Ok(path) => return FieldOutcome::Assigned(path),
		Err(err) => err,
	};
	tracing::debug!(field = %field.name, error = %direct_err, "direct assignment failed, trying accessor");

	match assign_through_accessor(registry, object, field, &value, options) {
		Ok(path) => FieldOutcome::Assigned(path),
		Err(ReflectError::MethodNotFound { .. }) => FieldOutcome::Failed(direct_err),
		Err(err) => FieldOutcome::Failed(err),
	}
}

/// Enum and temporal pre-processing of the raw mapping value.
fn prepare_value(registry: &Registry, field: &FieldDef, raw: &Value) -> Result<Value> {
	match (&field.ty, raw) {
		(TypeDesc::Enum(name), _) => {
			let def = registry.enum_def(name).ok_or_else(|| ReflectError::EnumNotFound { name: name.to_string() })?;
			match raw {
				Value::String(text) => Ok(def.constant(text).map(Value::Enum).unwrap_or(Value::Null)),
				other => Ok(other.clone()),
			}
		}
		(TypeDesc::Temporal(kind), Value::String(text)) => match parse_temporal(text, *kind) {
			Ok(parsed) => Ok(Value::Temporal(parsed)),
			Err(err) => {
				tracing::debug!(field = %field.name, error = %err, "temporal text not parsed");
				Ok(raw.clone())
			}
		},
		_ => Ok(raw.clone()),
	}
}

fn assign_direct(registry: &Registry, object: &mut ObjectValue, field: &FieldDef, value: Value, options: &InjectOptions) -> Result<AssignPath> {
	let overridden = match field.access {
		FieldAccess::Public => false,
		FieldAccess::Private { override_allowed: true } => {
			tracing::debug!(field = %field.name, "overriding field accessibility");
			true
		}
		FieldAccess::Private { override_allowed: false } => {
			return Err(ReflectError::FieldNotAccessible {
				class_name: object.class_name.to_string(),
				field: field.name.to_string(),
			});
		}
	};

	if let Some(stored) = assign_compatible(registry, &value, &field.ty) {
		object.set(&field.name, stored)?;
		return Ok(if overridden { AssignPath::Override } else { AssignPath::Direct });
	}

	if !options.force_coercion {
		return Err(ReflectError::TypeMismatch {
			expected: field.ty.to_string(),
			got: value.kind_name(),
		});
	}
	let coerced = coerce_with_options(registry, &value, &field.ty, options)?;
	object.set(&field.name, coerced)?;
	Ok(AssignPath::Coerced)
}

fn assign_through_accessor(registry: &Registry, object: &mut ObjectValue, field: &FieldDef, value: &Value, options: &InjectOptions) -> Result<AssignPath> {
	let method_name = accessor_name(&field.name, options.style, AccessorKind::Set);
	let class_name = object.class_name.to_string();
	let candidates: Vec<&MethodDef> = registry
		.find_methods(&class_name, &method_name, options.search_superclasses)?
		.into_iter()
		.filter(|method| method.kind() == AccessorKind::Set)
		.collect();
	if candidates.is_empty() {
		return Err(ReflectError::MethodNotFound {
			class_name,
			method: method_name,
		});
	}

	let mut last_err = None;
	for method in candidates {
		match method.invoke_set(registry, object, value.clone()) {
			Ok(()) => return Ok(AssignPath::Accessor { method: method.name.clone() }),
			Err(ReflectError::TypeMismatch { .. }) => {
				let retried = coerce_with_options(registry, value, &method.params[0], options).and_then(|coerced| method.invoke_set(registry, object, coerced));
				match retried {
					Ok(()) => return Ok(AssignPath::AccessorCoerced { method: method.name.clone() }),
					Err(err) => last_err = Some(err),
				}
			}
			Err(err) => last_err = Some(err),
		}
	}
	Err(last_err.unwrap_or(ReflectError::MethodNotFound {
		class_name,
		method: method_name,
	}))
}

/// Read a field: directly when visible (or overridable), otherwise through
/// the getter named per `options.style`.
pub fn read_field(registry: &Registry, object: &ObjectValue, name: &str, options: &InjectOptions) -> Result<Value> {
	let class_name = object.class_name.to_string();
	let visible = registry
		.find_field(&class_name, name)?
		.is_some_and(|field| !matches!(field.access, FieldAccess::Private { override_allowed: false }));
	if visible {
		if let Some(value) = object.get(name) {
			return Ok(value.clone());
		}
	}

	let method_name = accessor_name(name, options.style, AccessorKind::Get);
	let getter = registry
		.find_methods(&class_name, &method_name, options.search_superclasses)?
		.into_iter()
		.find(|method| method.kind() == AccessorKind::Get);
	match getter {
		Some(method) => method.invoke_get(object),
		None if visible => Err(ReflectError::FieldNotFound {
			class_name,
			field: name.to_owned(),
		}),
		None => Err(ReflectError::MethodNotFound {
			class_name,
			method: method_name,
		}),
	}
}
