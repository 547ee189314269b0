use serde::{Deserialize, Serialize};

/// Naming convention used to derive accessor names from field names.
///
/// With `CamelCase`, field `number` is reached through `setNumber`/`getNumber`;
/// with `SnakeCase`, through `set_number`/`get_number`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodingStyle {
	/// `get`/`set` + capitalized field name.
	#[default]
	CamelCase,
	/// `get_`/`set_` + lower-cased field name.
	SnakeCase,
}

/// Accessor direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorKind {
	/// Reads a field.
	Get,
	/// Writes a field.
	Set,
}

/// Accessor method name for `field` under `style`.
pub fn accessor_name(field: &str, style: CodingStyle, kind: AccessorKind) -> String {
	let prefix = match kind {
		AccessorKind::Get => "get",
		AccessorKind::Set => "set",
	};
	match style {
		CodingStyle::CamelCase => format!("{prefix}{}", capitalize_first(field)),
		CodingStyle::SnakeCase => format!("{prefix}_{}", field.to_lowercase()),
	}
}

fn capitalize_first(text: &str) -> String {
	let mut chars = text.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

#[cfg(test)]
mod tests {
	use super::{AccessorKind, CodingStyle, accessor_name};

	#[test]
	fn camel_case_capitalizes_first_letter_only() {
		assert_eq!(accessor_name("number", CodingStyle::CamelCase, AccessorKind::Set), "setNumber");
		assert_eq!(accessor_name("firstName", CodingStyle::CamelCase, AccessorKind::Get), "getFirstName");
	}

	#[test]
	fn snake_case_lowercases_whole_name() {
		assert_eq!(accessor_name("serialNo", CodingStyle::SnakeCase, AccessorKind::Set), "set_serialno");
		assert_eq!(accessor_name("reading", CodingStyle::SnakeCase, AccessorKind::Get), "get_reading");
	}

	#[test]
	fn empty_field_name_yields_bare_prefix() {
		assert_eq!(accessor_name("", CodingStyle::CamelCase, AccessorKind::Set), "set");
	}
}
