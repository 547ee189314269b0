use crate::reflect::{
	ClassDef, CodingStyle, CollectionKind, EnumDef, MethodDef, ObjectValue, Primitive, ReflectError, Registry, TemporalKind, TypeDesc, Value,
};

pub(crate) fn int() -> TypeDesc {
	TypeDesc::Primitive(Primitive::Int)
}

/// Registry shared by the unit tests.
pub(crate) fn sample_registry() -> Registry {
	Registry::builder()
		.interface("Shape")
		.enumeration(EnumDef::new("Color", ["Red", "Green", "Blue"]))
		.enumeration(EnumDef::new("Empty", []))
		.class(ClassDef::builder("Point").implements("Shape").field("x", int()).field("y", int()).build())
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
				.field("favorite", TypeDesc::enumeration("Color"))
				.field("birthday", TypeDesc::Temporal(TemporalKind::Date))
				.field("tags", TypeDesc::Collection(CollectionKind::List))
				.field("grid", TypeDesc::array_of_rank(int(), 2))
				.overridable_field("active", TypeDesc::Primitive(Primitive::Boolean))
				.field("score", TypeDesc::Wrapper(Primitive::Int))
				.build(),
		)
		.class(
			ClassDef::builder("Employee")
				.extends("Person")
				.inherit_constructor()
				.field("company", TypeDesc::String)
				.private_field("salary", TypeDesc::Primitive(Primitive::Double))
				.accessors("salary", CodingStyle::SnakeCase)
				.build(),
		)
		.class(
			ClassDef::builder("Sensor")
				.private_field("reading", TypeDesc::Primitive(Primitive::Double))
				.accessors("reading", CodingStyle::SnakeCase)
				.private_field("serialNo", TypeDesc::Primitive(Primitive::Long))
				.method(MethodDef::field_setter("set_serialno", TypeDesc::Primitive(Primitive::Long), "serialNo"))
				.constructor(|| ObjectValue::new("Sensor").with("reading", Value::Double(1.5)))
				.build(),
		)
		.class(
			ClassDef::builder("Counter")
				.private_field("count", int())
				.method(MethodDef::setter("setCount", TypeDesc::Primitive(Primitive::Long), |object, value| {
					let count = value.as_i64().and_then(|v| i32::try_from(v).ok()).unwrap_or(i32::MAX);
					object.set("count", Value::Int(count))
				}))
				.build(),
		)
		.class(
			ClassDef::builder("Line")
				.field("start", TypeDesc::class("Point"))
				.field("end", TypeDesc::class("Point"))
				.field("shape", TypeDesc::Interface("Shape".into()))
				.build(),
		)
		.class(
			ClassDef::builder("Palette")
				.field("primary", TypeDesc::enumeration("Color"))
				.field("ghost", TypeDesc::enumeration("Ghost"))
				.build(),
		)
		.class(ClassDef::builder("Mount").field("sensor", TypeDesc::class("Sensor")).field("label", TypeDesc::String).build())
		.class(ClassDef::builder("Vault").private_field("secret", int()).build())
		.class(ClassDef::builder("Locked").field("id", int()).without_default_constructor().build())
		.build()
		.expect("sample registry is valid")
}
