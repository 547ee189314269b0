use crate::reflect::test_support::sample_registry;
use crate::reflect::{CollectionKind, Primitive, ReflectError, TypeDesc};

#[test]
fn wrapper_table_round_trips_every_primitive() {
	for kind in Primitive::ALL {
		assert_eq!(Primitive::from_wrapper_name(kind.wrapper_name()), Some(kind));
		assert_eq!(Primitive::from_name(kind.name()), Some(kind));
	}
	assert_eq!(Primitive::from_wrapper_name("int"), None);
}

#[test]
fn wrapper_and_primitive_descriptors_convert() {
	let int = TypeDesc::Primitive(Primitive::Int);
	assert_eq!(int.to_wrapper(), Some(TypeDesc::Wrapper(Primitive::Int)));
	assert_eq!(TypeDesc::Wrapper(Primitive::Char).to_primitive(), Some(TypeDesc::Primitive(Primitive::Char)));
	assert_eq!(TypeDesc::String.to_wrapper(), None);
}

#[test]
fn rank_counts_bracket_pairs() {
	let ty = TypeDesc::array_of_rank(TypeDesc::String, 2);
	assert_eq!(ty.to_string(), "String[][]");
	assert_eq!(ty.rank(), 2);
	assert_eq!(TypeDesc::String.rank(), 0);
	assert_eq!(ty.leaf(), &TypeDesc::String);
}

#[test]
fn parse_resolves_basic_and_registered_names() {
	let registry = sample_registry();

	assert_eq!(TypeDesc::parse("int", &registry).expect("int parses"), TypeDesc::Primitive(Primitive::Int));
	assert_eq!(TypeDesc::parse("Integer", &registry).expect("Integer parses"), TypeDesc::Wrapper(Primitive::Int));
	assert_eq!(TypeDesc::parse("List", &registry).expect("List parses"), TypeDesc::Collection(CollectionKind::List));
	assert_eq!(TypeDesc::parse("Point", &registry).expect("Point parses"), TypeDesc::class("Point"));
	assert_eq!(TypeDesc::parse("Color", &registry).expect("Color parses"), TypeDesc::enumeration("Color"));
	assert_eq!(TypeDesc::parse("Shape", &registry).expect("Shape parses"), TypeDesc::Interface("Shape".into()));

	let grid = TypeDesc::parse("double[ ][]", &registry).expect("array parses");
	assert_eq!(grid, TypeDesc::array_of_rank(TypeDesc::Primitive(Primitive::Double), 2));
}

#[test]
fn parse_rejects_unknown_and_malformed_names() {
	let registry = sample_registry();

	assert!(matches!(TypeDesc::parse("Nope", &registry), Err(ReflectError::UnknownType { .. })));
	assert!(matches!(TypeDesc::parse("int]", &registry), Err(ReflectError::InvalidTypeName { .. })));
	assert!(matches!(TypeDesc::parse("[]", &registry), Err(ReflectError::InvalidTypeName { .. })));
}

#[test]
fn interface_detection_covers_collections() {
	assert!(TypeDesc::Collection(CollectionKind::Map).is_interface());
	assert!(TypeDesc::Interface("Shape".into()).is_interface());
	assert!(!TypeDesc::class("Point").is_interface());
}
