use std::path::{Path, PathBuf};

use reflector::reflect::{CodingStyle, InjectOptions, Registry, TypeDesc, Value, produce_injected_value};

use crate::cmd::print::{PrintOptions, outcome_kind, outcome_label, print_report, print_value};

/// Command-line switches layered over the injection options.
#[derive(Debug, Default)]
pub struct InjectFlags {
	/// JSON file with a full [`InjectOptions`] document.
	pub options: Option<PathBuf>,
	/// Accessor naming override.
	pub style: Option<CodingStyle>,
	/// Start from [`InjectOptions::strict`].
	pub strict: bool,
	/// Disable coercion of mismatched values.
	pub no_force: bool,
	/// Only search the target class for setters.
	pub no_super: bool,
	/// Include inherited fields.
	pub inherited: bool,
}

impl InjectFlags {
	/// Resolve the effective options.
	pub fn resolve(&self) -> reflector::reflect::Result<InjectOptions> {
		let mut options = match &self.options {
			Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
			None if self.strict => InjectOptions::strict(),
			None => InjectOptions::default(),
		};
		if let Some(style) = self.style {
			options.style = style;
		}
		if self.no_force {
			options.force_coercion = false;
		}
		if self.no_super {
			options.search_superclasses = false;
		}
		if self.inherited {
			options.include_inherited_fields = true;
		}
		Ok(options)
	}
}

/// Inject the JSON value read from `input` into the named type.
pub fn run(registry: &Registry, ty: &str, input: PathBuf, flags: InjectFlags, json: bool) -> reflector::reflect::Result<()> {
	let target = TypeDesc::parse(ty, registry)?;
	let options = flags.resolve()?;
	let text = read_input(&input)?;
	let value = Value::from_json(serde_json::from_str(&text)?);

	let injected = produce_injected_value(registry, &target, &value, &options)?;

	if json {
		let out = InjectJson {
			ty: target.to_string(),
			value: injected.value.to_json(),
			complete: injected.report.is_complete(),
			report: injected
				.report
				.fields
				.iter()
				.map(|item| FieldJson {
					field: item.field.to_string(),
					outcome: outcome_kind(&item.outcome),
					detail: outcome_label(&item.outcome),
				})
				.collect(),
		};
		println!("{}", serde_json::to_string_pretty(&out)?);
		return Ok(());
	}

	println!("type: {target}");
	print_value(&injected.value, 0, 0, PrintOptions::default());
	if !injected.report.fields.is_empty() {
		print_report(&injected.report);
	}
	Ok(())
}

fn read_input(input: &Path) -> reflector::reflect::Result<String> {
	if input == Path::new("-") {
		return Ok(std::io::read_to_string(std::io::stdin())?);
	}
	Ok(std::fs::read_to_string(input)?)
}

#[derive(serde::Serialize)]
struct InjectJson {
	#[serde(rename = "type")]
	ty: String,
	value: serde_json::Value,
	complete: bool,
	report: Vec<FieldJson>,
}

#[derive(serde::Serialize)]
struct FieldJson {
	field: String,
	outcome: &'static str,
	detail: String,
}

#[cfg(test)]
mod tests {
	use reflector::reflect::{CodingStyle, MismatchPolicy};

	use super::InjectFlags;
	use crate::cmd::test_support::fixture_path;

	#[test]
	fn flags_layer_over_strict_preset() {
		let flags = InjectFlags {
			strict: true,
			inherited: true,
			style: Some(CodingStyle::SnakeCase),
			..InjectFlags::default()
		};
		let options = flags.resolve().expect("no file to read");
		assert!(!options.force_coercion);
		assert!(options.include_inherited_fields);
		assert_eq!(options.style, CodingStyle::SnakeCase);
		assert_eq!(options.leaf_policy, MismatchPolicy::Fail);
	}

	#[test]
	fn options_file_fills_missing_keys_with_defaults() {
		let flags = InjectFlags {
			options: Some(fixture_path("snake_options.json")),
			no_super: true,
			..InjectFlags::default()
		};
		let options = flags.resolve().expect("options file parses");
		assert_eq!(options.style, CodingStyle::SnakeCase);
		assert!(options.force_coercion);
		assert!(!options.search_superclasses);
	}
}
