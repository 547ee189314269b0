use super::{MismatchPolicy, array_to_list, list_to_array, rank_of_list, rank_of_type};
use crate::reflect::test_support::int;
use crate::reflect::{CollectionValue, ReflectError, Registry, TypeDesc, Value};

fn list(items: Vec<Value>) -> Value {
	Value::Collection(CollectionValue::list(items))
}

fn ints(items: &[i32]) -> Value {
	list(items.iter().copied().map(Value::Int).collect())
}

#[test]
fn list_rank_is_the_deepest_branch() {
	assert_eq!(rank_of_list(&[ints(&[1, 2]), ints(&[3])]), 2);
	assert_eq!(rank_of_list(&[Value::Int(1), Value::Int(2), Value::Int(3)]), 1);
	assert_eq!(rank_of_list(&[]), 1);
	assert_eq!(rank_of_list(&[ints(&[1]), Value::Int(2), list(vec![ints(&[3])])]), 3);
}

#[test]
fn type_rank_counts_dimensions() {
	assert_eq!(rank_of_type(&TypeDesc::array_of_rank(TypeDesc::String, 3)), 3);
	assert_eq!(rank_of_type(&int()), 0);
}

#[test]
fn nested_list_fills_jagged_array() {
	let registry = Registry::default();
	let target = TypeDesc::array_of_rank(int(), 2);
	let rows = [list(vec![Value::Int(1), Value::from("2")]), ints(&[3])];

	let array = list_to_array(&registry, &rows, &target, MismatchPolicy::Fail).expect("rows convert");
	assert_eq!(array.component, TypeDesc::array_of(int()));
	let Value::Array(first) = &array.items[0] else {
		panic!("expected row");
	};
	assert_eq!(first.items, vec![Value::Int(1), Value::Int(2)]);
	assert_eq!(array.items[1].sequence_items().map(<[Value]>::len), Some(1));
}

#[test]
fn deeper_list_than_array_is_rejected() {
	let registry = Registry::default();
	let rows = [list(vec![ints(&[1])])];
	let err = list_to_array(&registry, &rows, &TypeDesc::array_of(int()), MismatchPolicy::Skip).expect_err("too deep");
	assert!(matches!(err, ReflectError::RankMismatch { expected: 1, got: 3 }));

	let err = list_to_array(&registry, &[], &int(), MismatchPolicy::Skip).expect_err("not an array");
	assert!(matches!(err, ReflectError::NotAnArray { .. }));
}

#[test]
fn policy_decides_bad_leaves() {
	let registry = Registry::default();
	let items = [Value::from("1"), Value::from("x"), Value::Null];
	let target = TypeDesc::array_of(int());

	let skipped = list_to_array(&registry, &items, &target, MismatchPolicy::Skip).expect("skip keeps going");
	assert_eq!(skipped.items, vec![Value::Int(1), Value::Int(0), Value::Int(0)]);

	let err = list_to_array(&registry, &items, &target, MismatchPolicy::Fail).expect_err("fail stops");
	assert!(matches!(err, ReflectError::Coercion { .. }));
}

#[test]
fn scalar_in_row_position_is_structural() {
	let registry = Registry::default();
	let target = TypeDesc::array_of_rank(int(), 2);
	let rows = [Value::Int(1), ints(&[2]), Value::Null];

	let skipped = list_to_array(&registry, &rows, &target, MismatchPolicy::Skip).expect("skip");
	assert_eq!(skipped.items[0], Value::Null);
	assert_eq!(skipped.items[2], Value::Null);

	let err = list_to_array(&registry, &rows, &target, MismatchPolicy::Fail).expect_err("fail");
	assert!(matches!(err, ReflectError::RankMismatch { expected: 1, got: 0 }));
}

#[test]
fn array_converts_back_to_nested_lists() {
	let registry = Registry::default();
	let rows = [ints(&[1, 2]), ints(&[3])];
	let array = list_to_array(&registry, &rows, &TypeDesc::array_of_rank(int(), 2), MismatchPolicy::Fail).expect("rows convert");

	let back = array_to_list(&array);
	assert_eq!(back.items, rows.to_vec());
}
