use super::{assign_compatible, cast_from_text, coerce, coerce_with, coerce_with_options};
use crate::reflect::test_support::{int, sample_registry};
use crate::reflect::{
	CodingStyle, CollectionKind, CollectionValue, InjectOptions, MismatchPolicy, ObjectValue, Primitive, ReflectError, Registry, TemporalKind, TypeDesc, Value,
};

fn prim(kind: Primitive) -> TypeDesc {
	TypeDesc::Primitive(kind)
}

#[test]
fn numeric_text_round_trips_for_every_width() {
	let registry = Registry::default();
	let cases = [
		(Primitive::Byte, "-12", Value::Byte(-12)),
		(Primitive::Short, "300", Value::Short(300)),
		(Primitive::Int, "70000", Value::Int(70_000)),
		(Primitive::Long, "5000000000", Value::Long(5_000_000_000)),
		(Primitive::Float, "1.5", Value::Float(1.5)),
		(Primitive::Double, "2.25", Value::Double(2.25)),
	];
	for (kind, text, expected) in cases {
		let parsed = cast_from_text(&registry, text, &prim(kind)).expect("numeric text parses");
		assert_eq!(parsed, expected, "{text} as {}", kind.name());
		assert_eq!(parsed.render(), text);
	}
}

#[test]
fn integral_targets_accept_only_whole_floats() {
	let registry = Registry::default();
	assert_eq!(cast_from_text(&registry, "20.0", &int()).expect("whole float"), Value::Int(20));
	assert!(matches!(cast_from_text(&registry, "20.5", &int()), Err(ReflectError::Coercion { .. })));
	assert!(cast_from_text(&registry, "128", &prim(Primitive::Byte)).is_err());
}

#[test]
fn empty_text_only_fits_text_targets() {
	let registry = Registry::default();
	assert_eq!(cast_from_text(&registry, "", &TypeDesc::String).expect("empty string"), Value::from(""));
	assert!(cast_from_text(&registry, "", &int()).is_err());
	assert!(cast_from_text(&registry, "", &TypeDesc::Wrapper(Primitive::Boolean)).is_err());
}

#[test]
fn boolean_and_char_text() {
	let registry = Registry::default();
	let boolean = prim(Primitive::Boolean);
	assert_eq!(cast_from_text(&registry, "TRUE", &boolean).expect("bool"), Value::Bool(true));
	assert_eq!(cast_from_text(&registry, "0", &boolean).expect("bool"), Value::Bool(false));
	assert!(cast_from_text(&registry, "yes", &boolean).is_err());
	assert_eq!(cast_from_text(&registry, "xyz", &prim(Primitive::Char)).expect("char"), Value::Char('x'));
}

#[test]
fn number_target_prefers_narrowest_parse() {
	let registry = Registry::default();
	assert_eq!(cast_from_text(&registry, "7", &TypeDesc::Number).expect("int"), Value::Int(7));
	assert_eq!(cast_from_text(&registry, "7000000000", &TypeDesc::Number).expect("long"), Value::Long(7_000_000_000));
	assert_eq!(cast_from_text(&registry, "0.5", &TypeDesc::Number).expect("double"), Value::Double(0.5));
}

#[test]
fn assignment_widens_primitives_but_not_wrappers() {
	let registry = Registry::default();
	assert_eq!(assign_compatible(&registry, &Value::Int(3), &prim(Primitive::Long)), Some(Value::Long(3)));
	assert_eq!(assign_compatible(&registry, &Value::Char('A'), &int()), Some(Value::Int(65)));
	assert_eq!(assign_compatible(&registry, &Value::Long(3), &int()), None);
	assert_eq!(assign_compatible(&registry, &Value::Int(3), &TypeDesc::Wrapper(Primitive::Long)), None);
	assert_eq!(assign_compatible(&registry, &Value::Null, &int()), None);
	assert_eq!(assign_compatible(&registry, &Value::Null, &TypeDesc::Wrapper(Primitive::Int)), Some(Value::Null));
}

#[test]
fn assignment_follows_class_and_interface_hierarchy() {
	let registry = sample_registry();
	let employee = Value::Object(ObjectValue::new("Employee"));
	let point = Value::Object(ObjectValue::new("Point"));

	assert!(assign_compatible(&registry, &employee, &TypeDesc::class("Person")).is_some());
	assert!(assign_compatible(&registry, &point, &TypeDesc::class("Person")).is_none());
	assert!(assign_compatible(&registry, &point, &TypeDesc::Interface("Shape".into())).is_some());
}

#[test]
fn coercion_is_idempotent() {
	let registry = sample_registry();
	let targets = [int(), TypeDesc::Wrapper(Primitive::Double), TypeDesc::String, TypeDesc::Temporal(TemporalKind::Date)];
	let inputs = [Value::from("42"), Value::from("42"), Value::Char('x'), Value::from("2020-01-02")];
	for (target, input) in targets.iter().zip(inputs) {
		let once = coerce(&registry, &input, target).expect("first coercion");
		let twice = coerce(&registry, &once, target).expect("second coercion");
		assert_eq!(once, twice, "target {target}");
	}
}

#[test]
fn lossy_numeric_conversion_fails() {
	let registry = Registry::default();
	assert_eq!(coerce(&registry, &Value::Double(3.0), &int()).expect("whole double"), Value::Int(3));
	assert!(coerce(&registry, &Value::Double(3.5), &int()).is_err());
	assert!(coerce(&registry, &Value::Long(1 << 40), &int()).is_err());
	assert_eq!(coerce(&registry, &Value::Int(65), &prim(Primitive::Char)).expect("code point"), Value::Char('A'));
}

#[test]
fn enum_text_matches_exactly() {
	let registry = sample_registry();
	let color = TypeDesc::enumeration("Color");
	let Value::Enum(green) = coerce(&registry, &Value::from("Green"), &color).expect("known constant") else {
		panic!("expected enum");
	};
	assert_eq!(green.ordinal, 1);
	assert!(coerce(&registry, &Value::from("green"), &color).is_err());
	assert!(matches!(
		coerce(&registry, &Value::from("Boo"), &TypeDesc::enumeration("Ghost")),
		Err(ReflectError::EnumNotFound { .. })
	));
	assert_eq!(coerce(&registry, &Value::Enum(green), &TypeDesc::String).expect("constant name"), Value::from("Green"));
}

#[test]
fn list_becomes_set_without_duplicates() {
	let registry = Registry::default();
	let list = Value::Collection(CollectionValue::list(vec![Value::Int(2), Value::Int(1), Value::Int(2)]));
	let Value::Collection(set) = coerce(&registry, &list, &TypeDesc::Collection(CollectionKind::SortedSet)).expect("set") else {
		panic!("expected collection");
	};
	assert_eq!(set.items, vec![Value::Int(1), Value::Int(2)]);
}

#[test]
fn map_becomes_nested_object() {
	let registry = sample_registry();
	let map = Value::Map([("x".to_owned(), Value::from("3")), ("y".to_owned(), Value::Int(4))].into_iter().collect());
	let Value::Object(point) = coerce(&registry, &map, &TypeDesc::class("Point")).expect("point") else {
		panic!("expected object");
	};
	assert_eq!(point.get("x"), Some(&Value::Int(3)));
	assert_eq!(point.get("y"), Some(&Value::Int(4)));
}

#[test]
fn skip_policy_keeps_bad_leaves_at_default() {
	let registry = Registry::default();
	let list = Value::Collection(CollectionValue::list(vec![Value::from("1"), Value::from("x")]));
	let target = TypeDesc::array_of(int());

	let Value::Array(array) = coerce_with(&registry, &list, &target, MismatchPolicy::Skip).expect("skip") else {
		panic!("expected array");
	};
	assert_eq!(array.items, vec![Value::Int(1), Value::Int(0)]);
	assert!(coerce(&registry, &list, &target).is_err());
}

#[test]
fn nested_map_failure_fails_the_conversion() {
	let registry = sample_registry();
	let map = Value::Map([("y".to_owned(), Value::from("2.5"))].into_iter().collect());
	let err = coerce(&registry, &map, &TypeDesc::class("Point")).expect_err("fractional y");
	assert!(matches!(err, ReflectError::NestedInjection { class_name, field, .. } if class_name == "Point" && field == "y"));
}

#[test]
fn options_reach_nested_maps() {
	let registry = sample_registry();
	let map = Value::Map([("reading".to_owned(), Value::Double(3.0))].into_iter().collect());
	let sensor = TypeDesc::class("Sensor");

	let snake = InjectOptions::default().with_style(CodingStyle::SnakeCase);
	let Value::Object(object) = coerce_with_options(&registry, &map, &sensor, &snake).expect("snake setter") else {
		panic!("expected object");
	};
	assert_eq!(object.get("reading"), Some(&Value::Double(3.0)));
	assert!(coerce_with_options(&registry, &map, &sensor, &InjectOptions::default()).is_err());
}
