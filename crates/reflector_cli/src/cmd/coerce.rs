use reflector::reflect::{Registry, TypeDesc, cast_from_text};

use crate::cmd::print::{PrintOptions, print_value};

/// Parse `text` into the named type and print the result.
pub fn run(registry: &Registry, ty: &str, text: &str, json: bool) -> reflector::reflect::Result<()> {
	let target = TypeDesc::parse(ty, registry)?;
	let value = cast_from_text(registry, text, &target)?;

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
	println!("kind: {}", value.kind_name());
	print!("value: ");
	print_value(&value, 0, 0, PrintOptions::default());
	Ok(())
}

/// JSON shape shared by value-producing commands.
#[derive(serde::Serialize)]
pub struct ValueJson {
	/// Canonical type name.
	#[serde(rename = "type")]
	pub ty: String,
	/// Runtime value kind.
	pub kind: &'static str,
	/// Value rendered as JSON.
	pub value: serde_json::Value,
}
