use crate::reflect::test_support::{int, sample_registry};
use crate::reflect::{AccessorKind, ClassDef, EnumDef, ObjectValue, ReflectError, Registry, TypeDesc, Value};

#[test]
fn all_fields_lists_superclass_fields_first() {
	let registry = sample_registry();
	let names: Vec<&str> = registry
		.all_fields("Employee")
		.expect("employee chain")
		.into_iter()
		.map(|field| field.name.as_ref())
		.collect();

	assert_eq!(names.first(), Some(&"name"));
	assert_eq!(&names[names.len() - 2..], &["company", "salary"]);
}

#[test]
fn find_methods_respects_superclass_flag() {
	let registry = sample_registry();

	assert_eq!(registry.find_methods("Employee", "setName", true).expect("chain").len(), 1);
	assert!(registry.find_methods("Employee", "setName", false).expect("chain").is_empty());
	assert_eq!(registry.find_methods("Employee", "set_salary", false).expect("chain")[0].kind(), AccessorKind::Set);
}

#[test]
fn subclass_and_interface_queries_follow_the_chain() {
	let registry = sample_registry();

	assert!(registry.is_subclass_of("Employee", "Person"));
	assert!(!registry.is_subclass_of("Person", "Employee"));
	assert!(registry.implements("Point", "Shape"));
	assert!(!registry.implements("Person", "Shape"));
}

#[test]
fn resolve_type_distinguishes_kinds() {
	let registry = sample_registry();

	assert_eq!(registry.resolve_type("Color"), Some(TypeDesc::enumeration("Color")));
	assert_eq!(registry.resolve_type("Shape"), Some(TypeDesc::Interface("Shape".into())));
	assert_eq!(registry.resolve_type("Ghost"), None);
	assert_eq!(registry.enum_names(), vec!["Color", "Empty"]);
}

#[test]
fn build_rejects_duplicate_and_basic_names() {
	let duplicate = Registry::builder()
		.class(ClassDef::builder("Point").build())
		.enumeration(EnumDef::new("Point", ["A"]))
		.build();
	assert!(matches!(duplicate, Err(ReflectError::DuplicateType { name }) if name == "Point"));

	let shadowing = Registry::builder().class(ClassDef::builder("String").build()).build();
	assert!(matches!(shadowing, Err(ReflectError::DuplicateType { .. })));
}

#[test]
fn build_rejects_unknown_superclass_and_cycles() {
	let orphan = Registry::builder().class(ClassDef::builder("Child").extends("Missing").build()).build();
	assert!(matches!(orphan, Err(ReflectError::ClassNotFound { name }) if name == "Missing"));

	let cycle = Registry::builder()
		.class(ClassDef::builder("A").extends("B").build())
		.class(ClassDef::builder("B").extends("A").build())
		.build();
	assert!(matches!(cycle, Err(ReflectError::InheritanceCycle { .. })));

	let interface = Registry::builder().class(ClassDef::builder("A").implements("Nope").build()).build();
	assert!(matches!(interface, Err(ReflectError::UnknownType { .. })));
}

#[test]
fn setter_rejects_incompatible_argument_before_running() {
	let registry = sample_registry();
	let setter = registry.find_methods("Person", "setAge", false).expect("chain")[0];
	let mut object = ObjectValue::new("Person").with("age", Value::Int(0));

	let err = setter.invoke_set(&registry, &mut object, Value::from("12")).expect_err("text is not an int");
	assert!(matches!(err, ReflectError::TypeMismatch { got: "string", .. }));
	assert_eq!(object.get("age"), Some(&Value::Int(0)));

	setter.invoke_set(&registry, &mut object, Value::Int(12)).expect("int is accepted");
	assert_eq!(object.get("age"), Some(&Value::Int(12)));

	let err = setter.invoke_set(&registry, &mut object, Value::Int(-1)).expect_err("negative age");
	assert!(matches!(err, ReflectError::Invocation { .. }));
}

#[test]
fn accessors_for_undeclared_field_fail_the_build() {
	let def = ClassDef::builder("Bare").accessors("x", Default::default()).field("x", int()).build();
	assert!(def.methods.is_empty());

	let built = Registry::builder().class(def).build();
	assert!(matches!(built, Err(ReflectError::FieldNotFound { class_name, field }) if class_name == "Bare" && field == "x"));

	let ordered = Registry::builder().class(ClassDef::builder("Bare").field("x", int()).accessors("x", Default::default()).build()).build();
	assert!(ordered.is_ok());
}

#[test]
fn method_lookup_does_not_borrow_the_name() {
	let registry = sample_registry();
	let found = {
		let name = format!("set{}", "Name");
		registry.find_methods("Person", &name, false).expect("person chain")
	};
	assert_eq!(found.len(), 1);
	assert_eq!(found[0].name.as_ref(), "setName");
}
