use crate::reflect::coerce::{assign_compatible, cast_from_text};
use crate::reflect::registry::Constructor;
use crate::reflect::{
	ArrayValue, CollectionKind, CollectionValue, FieldMap, FieldValue, ObjectValue, ReflectError, Registry, Result, TypeDesc, Value, default_value,
};

/// Build a default instance of `ty`.
///
/// Primitives and wrappers are parsed from their textual zero (booleans come
/// out `true`), enums yield their first constant, arrays a single default
/// slot, collection interfaces an empty default implementation, and classes
/// run the no-argument constructor found on the class or its superclasses.
/// Interfaces and temporal types have no constructor.
pub fn produce_new_instance(registry: &Registry, ty: &TypeDesc) -> Result<Value> {
	let built = build_instance(registry, ty);
	if let Err(err) = &built {
		tracing::warn!(type_name = %ty, error = %err, "instance construction failed");
	}
	built
}

fn build_instance(registry: &Registry, ty: &TypeDesc) -> Result<Value> {
	match ty {
		TypeDesc::Primitive(kind) | TypeDesc::Wrapper(kind) => cast_from_text(registry, kind.zero_text(), ty),
		TypeDesc::Number => Ok(Value::Int(0)),
		TypeDesc::String => Ok(Value::String(String::new())),
		TypeDesc::Object => Ok(Value::Object(ObjectValue::new("Object"))),
		TypeDesc::Enum(name) => {
			let def = registry.enum_def(name).ok_or_else(|| ReflectError::EnumNotFound { name: name.to_string() })?;
			def.constant_at(0).map(Value::Enum).ok_or_else(|| ReflectError::EmptyEnum { name: name.to_string() })
		}
		TypeDesc::Array(_) => produce_new_array(ty, 1).map(Value::Array),
		TypeDesc::Collection(CollectionKind::Map) => Ok(Value::Map(FieldMap::new())),
		TypeDesc::Collection(kind) => Ok(Value::Collection(CollectionValue::new(*kind))),
		TypeDesc::Class(name) => produce_new_object(registry, name).map(Value::Object),
		TypeDesc::Interface(_) | TypeDesc::Temporal(_) => Err(ReflectError::NoConstructor { type_name: ty.to_string() }),
	}
}

/// Construct a registered class through its no-argument constructor.
///
/// Classes that inherit their constructor use the nearest superclass that
/// declares one. Every field of the class chain ends up present, at the value
/// the constructor gave it or at the language default.
pub fn produce_new_object(registry: &Registry, class_name: &str) -> Result<ObjectValue> {
	let chain = registry.class_chain(class_name)?;

	let mut base = None;
	for def in &chain {
		match &def.constructor {
			Constructor::Inherited => continue,
			Constructor::None => break,
			Constructor::Implicit => base = Some(ObjectValue::new(class_name)),
			Constructor::Custom(body) => base = Some(body()),
		}
		break;
	}
	let mut base = base.ok_or_else(|| ReflectError::NoConstructor {
		type_name: class_name.to_owned(),
	})?;

	let mut object = ObjectValue::new(class_name);
	for field in registry.all_fields(class_name)? {
		let value = base.take(&field.name).unwrap_or_else(|| default_value(&field.ty));
		object.fields.push(FieldValue {
			name: field.name.clone(),
			value,
		});
	}
	Ok(object)
}

/// Allocate an array of type `ty` with `length` default slots.
pub fn produce_new_array(ty: &TypeDesc, length: usize) -> Result<ArrayValue> {
	let component = ty.component().ok_or_else(|| ReflectError::NotAnArray { type_name: ty.to_string() })?;
	Ok(ArrayValue::filled(component.clone(), length))
}

/// Allocate an array and store `data` into its leading slots.
pub fn produce_new_array_with_data(registry: &Registry, ty: &TypeDesc, length: usize, data: &[Value]) -> Result<ArrayValue> {
	let mut array = produce_new_array(ty, length)?;
	if data.len() > length {
		return Err(ReflectError::ArrayOverflow { len: length, items: data.len() });
	}
	for (slot, item) in data.iter().enumerate() {
		array.items[slot] = assign_compatible(registry, item, &array.component).ok_or_else(|| ReflectError::TypeMismatch {
			expected: array.component.to_string(),
			got: item.kind_name(),
		})?;
	}
	Ok(array)
}
