use reflector::reflect::{FieldOutcome, InjectReport, Value};

/// Output truncation and formatting limits for printed values.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of fields printed for a single object.
	pub max_fields_per_object: usize,
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum number of elements printed for arrays and collections.
	pub max_items: usize,
	/// Maximum recursive print depth for nested values.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_fields_per_object: 80,
			max_string_len: 200,
			max_items: 16,
			max_print_depth: 6,
		}
	}
}

/// Print one runtime value tree.
pub fn print_value(value: &Value, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	match value {
		Value::String(v) => println!("{}\"{}\"", pad, truncate(v, options.max_string_len)),
		Value::Array(array) => {
			println!("{}{}[{}]", pad, array.component, array.len());
			print_items(&array.items, indent, depth, options);
		}
		Value::Collection(collection) => {
			println!("{}{}({})", pad, collection.kind.name(), collection.items.len());
			print_items(&collection.items, indent, depth, options);
		}
		Value::Map(map) => {
			if depth >= options.max_print_depth {
				println!("{}{{ ... {} entries }}", pad, map.len());
				return;
			}
			let mut keys: Vec<&String> = map.keys().collect();
			keys.sort();
			println!("{}{{", pad);
			for key in keys.iter().take(options.max_fields_per_object) {
				print_entry(key, &map[*key], indent, depth, options);
			}
			println!("{}}}", pad);
		}
		Value::Object(object) => {
			if depth >= options.max_print_depth {
				println!("{}{} {{ ... }}", pad, object.class_name);
				return;
			}
			println!("{}{} {{", pad, object.class_name);
			for field in object.fields.iter().take(options.max_fields_per_object) {
				print_entry(&field.name, &field.value, indent, depth, options);
			}
			if object.fields.len() > options.max_fields_per_object {
				println!("{}  ... {} more fields", pad, object.fields.len() - options.max_fields_per_object);
			}
			println!("{}}}", pad);
		}
		other => println!("{}{}", pad, other.render()),
	}
}

fn print_entry(name: &str, value: &Value, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	print!("{}  {} = ", pad, name);
	if is_nested(value) {
		println!();
		print_value(value, indent + 4, depth + 1, options);
	} else {
		print_value(value, 0, depth + 1, options);
	}
}

fn print_items(items: &[Value], indent: usize, depth: u32, options: PrintOptions) {
	if items.is_empty() {
		return;
	}
	let pad = " ".repeat(indent);
	if depth >= options.max_print_depth {
		println!("{}  ... {} items", pad, items.len());
		return;
	}
	for item in items.iter().take(options.max_items) {
		print_value(item, indent + 2, depth + 1, options);
	}
	if items.len() > options.max_items {
		println!("{}  ... {} more", pad, items.len() - options.max_items);
	}
}

fn is_nested(value: &Value) -> bool {
	matches!(value, Value::Object(_) | Value::Map(_) | Value::Array(_) | Value::Collection(_))
}

/// Print one line per field outcome.
pub fn print_report(report: &InjectReport) {
	println!("report:");
	for item in &report.fields {
		println!("  {:<16} {}", item.field, outcome_label(&item.outcome));
	}
	println!("assigned: {}/{}", report.assigned_count(), report.fields.len());
}

/// Short human label for a field outcome.
pub fn outcome_label(outcome: &FieldOutcome) -> String {
	match outcome {
		FieldOutcome::Assigned(path) => format!("assigned ({})", path_label(path)),
		FieldOutcome::Absent => "absent".to_owned(),
		FieldOutcome::NullForPrimitive => "null for primitive, kept default".to_owned(),
		FieldOutcome::Failed(err) => format!("failed: {err}"),
	}
}

/// Machine-friendly outcome kind used in JSON output.
pub fn outcome_kind(outcome: &FieldOutcome) -> &'static str {
	match outcome {
		FieldOutcome::Assigned(_) => "assigned",
		FieldOutcome::Absent => "absent",
		FieldOutcome::NullForPrimitive => "null_for_primitive",
		FieldOutcome::Failed(_) => "failed",
	}
}

/// Assignment path label: `direct`, `override`, `coerced`, or the setter name.
pub fn path_label(path: &reflector::reflect::AssignPath) -> String {
	use reflector::reflect::AssignPath;

	match path {
		AssignPath::Direct => "direct".to_owned(),
		AssignPath::Override => "override".to_owned(),
		AssignPath::Coerced => "coerced".to_owned(),
		AssignPath::Accessor { method } => format!("via {method}"),
		AssignPath::AccessorCoerced { method } => format!("via {method}, coerced"),
	}
}

fn truncate(input: &str, max_len: usize) -> String {
	if input.chars().count() <= max_len {
		return input.to_owned();
	}
	let out: String = input.chars().take(max_len).collect();
	format!("{out}...")
}

#[cfg(test)]
mod tests;
