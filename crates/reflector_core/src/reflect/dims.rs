use serde::{Deserialize, Serialize};

use crate::reflect::coerce::coerce_with_options;
use crate::reflect::inject::InjectOptions;
use crate::reflect::{ArrayValue, CollectionValue, ReflectError, Registry, Result, TypeDesc, Value};

/// What to do with a leaf element that cannot be stored or coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchPolicy {
	/// Leave the slot at its default and continue.
	#[default]
	Skip,
	/// Abort the conversion.
	Fail,
}

/// Rank of an array type: the number of `[]` pairs in its name.
pub fn rank_of_type(ty: &TypeDesc) -> usize {
	ty.rank()
}

/// Maximum nesting depth of a list, counting the list itself as 1.
///
/// Every element is inspected, so `[[1], 2, [[3]]]` has depth 3 no matter
/// where the deepest branch sits. An empty list has depth 1.
pub fn rank_of_list(items: &[Value]) -> usize {
	depth_of(items, 1)
}

fn depth_of(items: &[Value], depth: usize) -> usize {
	items
		.iter()
		.filter_map(Value::sequence_items)
		.map(|inner| depth_of(inner, depth + 1))
		.max()
		.unwrap_or(depth)
}

/// Convert a (nested) list into an array of type `target`.
///
/// Input deeper than the array rank is a structural mismatch. Leaves are
/// stored when compatible, otherwise coerced; leaves that still do not fit
/// are skipped or fail per `policy`. Null leaves in primitive slots are
/// skipped, keeping the slot default.
pub fn list_to_array(registry: &Registry, items: &[Value], target: &TypeDesc, policy: MismatchPolicy) -> Result<ArrayValue> {
	let options = InjectOptions {
		leaf_policy: policy,
		..InjectOptions::default()
	};
	list_to_array_with(registry, items, target, &options)
}

/// [`list_to_array`] with full injection options for map leaves; the leaf
/// policy is `options.leaf_policy`.
pub(crate) fn list_to_array_with(registry: &Registry, items: &[Value], target: &TypeDesc, options: &InjectOptions) -> Result<ArrayValue> {
	let rank = target.rank();
	if rank == 0 {
		return Err(ReflectError::NotAnArray { type_name: target.to_string() });
	}
	let depth = rank_of_list(items);
	if depth > rank {
		return Err(ReflectError::RankMismatch { expected: rank, got: depth });
	}
	fill_array(registry, items, target, options)
}

fn fill_array(registry: &Registry, items: &[Value], array_ty: &TypeDesc, options: &InjectOptions) -> Result<ArrayValue> {
	let component = array_ty.component().ok_or_else(|| ReflectError::NotAnArray {
		type_name: array_ty.to_string(),
	})?;
	let mut out = ArrayValue::filled(component.clone(), items.len());

	for (slot, item) in items.iter().enumerate() {
		if item.is_null() {
			continue;
		}

		let converted = if component.is_array() {
			match item.sequence_items() {
				Some(inner) => fill_array(registry, inner, component, options).map(Value::Array),
				None => Err(ReflectError::RankMismatch {
					expected: component.rank(),
					got: 0,
				}),
			}
		} else {
			coerce_with_options(registry, item, component, options)
		};

		match converted {
			Ok(value) => out.items[slot] = value,
			Err(err) if options.leaf_policy == MismatchPolicy::Skip => {
				tracing::debug!(slot, component = %component, error = %err, "array element skipped");
			}
			Err(err) => return Err(err),
		}
	}

	Ok(out)
}

/// Convert an array into a list, nested arrays becoming nested lists.
pub fn array_to_list(array: &ArrayValue) -> CollectionValue {
	CollectionValue::list(
		array
			.items
			.iter()
			.map(|item| match item {
				Value::Array(inner) => Value::Collection(array_to_list(inner)),
				other => other.clone(),
			})
			.collect(),
	)
}

#[cfg(test)]
mod tests;
