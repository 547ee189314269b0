use reflector::reflect::{AssignPath, FieldOutcome, ReflectError};

use super::{outcome_kind, outcome_label, path_label, truncate};

#[test]
fn truncate_counts_chars_not_bytes() {
	assert_eq!(truncate("héllo", 5), "héllo");
	assert_eq!(truncate("héllo", 2), "hé...");
}

#[test]
fn accessor_paths_name_the_setter() {
	let path = AssignPath::AccessorCoerced { method: "setAge".into() };
	assert_eq!(path_label(&path), "via setAge, coerced");
	assert_eq!(path_label(&AssignPath::Override), "override");
}

#[test]
fn failed_outcome_carries_reason() {
	let outcome = FieldOutcome::Failed(ReflectError::Coercion {
		value: "\"20.5\"".to_owned(),
		target: "int".to_owned(),
	});
	assert!(outcome_label(&outcome).starts_with("failed: "));
	assert_eq!(outcome_kind(&outcome), "failed");
	assert_eq!(outcome_kind(&FieldOutcome::NullForPrimitive), "null_for_primitive");
}
