use reflector::reflect::{MismatchPolicy, ReflectError, Registry, TypeDesc, Value, list_to_array, rank_of_list};

use crate::cmd::print::{PrintOptions, print_value};

/// Print the nesting depth of a JSON list; with `as_type`, also convert it
/// into that array type.
pub fn run(registry: &Registry, list: &str, as_type: Option<&str>, fail: bool, json: bool) -> reflector::reflect::Result<()> {
	let parsed = Value::from_json(serde_json::from_str(list)?);
	let items = parsed.sequence_items().ok_or_else(|| ReflectError::TypeMismatch {
		expected: "List".to_owned(),
		got: parsed.kind_name(),
	})?;
	let rank = rank_of_list(items);

	let converted = match as_type {
		Some(name) => {
			let target = TypeDesc::parse(name, registry)?;
			let policy = if fail { MismatchPolicy::Fail } else { MismatchPolicy::Skip };
			Some(list_to_array(registry, items, &target, policy)?)
		}
		None => None,
	};

	if json {
		let out = RankJson {
			rank,
			array: converted.map(|array| RankArrayJson {
				ty: array.type_desc().to_string(),
				value: Value::Array(array).to_json(),
			}),
		};
		println!("{}", serde_json::to_string_pretty(&out)?);
		return Ok(());
	}

	println!("rank: {rank}");
	if let Some(array) = converted {
		println!("array: {}", array.type_desc());
		print_value(&Value::Array(array), 0, 0, PrintOptions::default());
	}
	Ok(())
}

#[derive(serde::Serialize)]
struct RankJson {
	rank: usize,
	#[serde(skip_serializing_if = "Option::is_none")]
	array: Option<RankArrayJson>,
}

#[derive(serde::Serialize)]
struct RankArrayJson {
	#[serde(rename = "type")]
	ty: String,
	value: serde_json::Value,
}
