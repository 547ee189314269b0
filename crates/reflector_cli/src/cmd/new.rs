use reflector::reflect::{Registry, TypeDesc, Value, produce_new_array, produce_new_instance};

use crate::cmd::coerce::ValueJson;
use crate::cmd::print::{PrintOptions, print_value};

/// Build a default instance of the named type. `len` sizes array types.
pub fn run(registry: &Registry, ty: &str, len: Option<usize>, json: bool) -> reflector::reflect::Result<()> {
	let target = TypeDesc::parse(ty, registry)?;
	let value = match len {
		Some(len) => produce_new_array(&target, len).map(Value::Array)?,
		None => produce_new_instance(registry, &target)?,
	};

	if json {
		let out = ValueJson {
			ty: target.to_string(),
			kind: value.kind_name(),
			value: value.to_json(),
		};
		println!("{}", serde_json::to_string_pretty(&out)?);
		return Ok(());
	}

	println!("type: {target}");
	print_value(&value, 0, 0, PrintOptions::default());
	Ok(())
}
