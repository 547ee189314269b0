use reflector::reflect::{ClassDef, CodingStyle, CollectionKind, EnumDef, MethodDef, ObjectValue, Primitive, ReflectError, Registry, Result, TemporalKind, TypeDesc, Value};

fn int() -> TypeDesc {
	TypeDesc::Primitive(Primitive::Int)
}

/// Registry the CLI commands resolve type names against.
pub fn registry() -> Result<Registry> {
	Registry::builder()
		.interface("Shape")
		.enumeration(EnumDef::new("Color", ["Red", "Green", "Blue"]))
		.enumeration(EnumDef::new("Unit", ["Celsius", "Kelvin"]))
		.class(ClassDef::builder("Point").implements("Shape").field("x", int()).field("y", int()).build())
		.class(
			ClassDef::builder("Line")
				.implements("Shape")
				.field("start", TypeDesc::class("Point"))
				.field("end", TypeDesc::class("Point"))
				.field("color", TypeDesc::enumeration("Color"))
				.build(),
		)
		.class(
			ClassDef::builder("Person")
				.private_field("name", TypeDesc::String)
				.accessors("name", CodingStyle::CamelCase)
				.private_field("age", int())
				.method(MethodDef::setter("setAge", int(), |object, value| {
					if value.as_i64().is_some_and(|age| age < 0) {
						return Err(ReflectError::Invocation {
							method: "setAge".to_owned(),
							reason: "age must not be negative".to_owned(),
						});
					}
					object.set("age", value)
				}))
				.method(MethodDef::field_getter("getAge", int(), "age"))
				.field("birthday", TypeDesc::Temporal(TemporalKind::Date))
				.field("favorite", TypeDesc::enumeration("Color"))
				.field("tags", TypeDesc::Collection(CollectionKind::List))
				.overridable_field("active", TypeDesc::Primitive(Primitive::Boolean))
				.build(),
		)
		.class(
			ClassDef::builder("Employee")
				.extends("Person")
				.inherit_constructor()
				.field("company", TypeDesc::String)
				.field("badge", TypeDesc::Wrapper(Primitive::Long))
				.build(),
		)
		.class(
			ClassDef::builder("Sensor")
				.private_field("reading", TypeDesc::Primitive(Primitive::Double))
				.accessors("reading", CodingStyle::SnakeCase)
				.field("unit", TypeDesc::enumeration("Unit"))
				.field("samples", TypeDesc::array_of_rank(TypeDesc::Primitive(Primitive::Double), 2))
				.field("taken", TypeDesc::Temporal(TemporalKind::DateTime))
				.constructor(|| ObjectValue::new("Sensor").with("reading", Value::Double(20.0)))
				.build(),
		)
		.build()
}

#[cfg(test)]
mod tests {
	use reflector::reflect::{Value, produce_new_object};

	use super::registry;

	#[test]
	fn demo_registry_builds() {
		let registry = registry().expect("demo registry is valid");
		assert_eq!(registry.class_names(), vec!["Employee", "Line", "Person", "Point", "Sensor"]);
		assert!(produce_new_object(&registry, "Employee").is_ok());
		let sensor = produce_new_object(&registry, "Sensor").expect("sensor");
		assert_eq!(sensor.get("reading"), Some(&Value::Double(20.0)));
		assert_eq!(sensor.get("unit"), Some(&Value::Null));
	}
}
