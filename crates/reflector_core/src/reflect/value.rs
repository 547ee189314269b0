use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::reflect::{CollectionKind, Primitive, ReflectError, Result, TemporalKind, TypeDesc};

/// Field name to value mapping consumed by injection.
pub type FieldMap = HashMap<String, Value>;

/// Dynamic runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Absent reference.
	Null,
	/// Boolean.
	Bool(bool),
	/// Character.
	Char(char),
	/// 8-bit integer.
	Byte(i8),
	/// 16-bit integer.
	Short(i16),
	/// 32-bit integer.
	Int(i32),
	/// 64-bit integer.
	Long(i64),
	/// 32-bit float.
	Float(f32),
	/// 64-bit float.
	Double(f64),
	/// Text.
	String(String),
	/// Date/time.
	Temporal(Temporal),
	/// Enum constant.
	Enum(EnumValue),
	/// Typed array.
	Array(ArrayValue),
	/// List, set, sorted set, or queue.
	Collection(CollectionValue),
	/// String-keyed map.
	Map(FieldMap),
	/// Registered class instance.
	Object(ObjectValue),
}

/// Date/time payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Temporal {
	/// Calendar date.
	Date(NaiveDate),
	/// Time of day.
	Time(NaiveTime),
	/// Date with time of day.
	DateTime(NaiveDateTime),
}

impl Temporal {
	/// Flavour of this value.
	pub fn kind(&self) -> TemporalKind {
		match self {
			Temporal::Date(_) => TemporalKind::Date,
			Temporal::Time(_) => TemporalKind::Time,
			Temporal::DateTime(_) => TemporalKind::DateTime,
		}
	}
}

/// One enum constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
	/// Enum type name.
	pub type_name: Box<str>,
	/// Constant name.
	pub constant: Box<str>,
	/// Declaration index.
	pub ordinal: usize,
}

/// Array with a fixed component type.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayValue {
	/// Declared component type.
	pub component: TypeDesc,
	/// Slots in index order.
	pub items: Vec<Value>,
}

impl ArrayValue {
	/// Array of `len` slots holding the component default.
	pub fn filled(component: TypeDesc, len: usize) -> Self {
		let slot = default_value(&component);
		Self {
			component,
			items: vec![slot; len],
		}
	}

	/// Full array type.
	pub fn type_desc(&self) -> TypeDesc {
		TypeDesc::array_of(self.component.clone())
	}

	/// Number of slots.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Whether the array has no slots.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}
}

/// List, set, sorted set, or queue contents.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionValue {
	/// Collection flavour.
	pub kind: CollectionKind,
	/// Members in iteration order.
	pub items: Vec<Value>,
}

impl CollectionValue {
	/// Empty collection.
	pub fn new(kind: CollectionKind) -> Self {
		Self { kind, items: Vec::new() }
	}

	/// Insertion-ordered list holding `items`.
	pub fn list(items: Vec<Value>) -> Self {
		Self {
			kind: CollectionKind::List,
			items,
		}
	}

	/// Add one member, honouring set uniqueness and sorted order.
	///
	/// Returns `false` when a set already held an equal member.
	pub fn insert(&mut self, value: Value) -> bool {
		match self.kind {
			CollectionKind::List | CollectionKind::Queue | CollectionKind::Map => {
				self.items.push(value);
				true
			}
			CollectionKind::Set => {
				if self.items.contains(&value) {
					return false;
				}
				self.items.push(value);
				true
			}
			CollectionKind::SortedSet => {
				if self.items.iter().any(|item| sorts_equal(item, &value)) {
					return false;
				}
				let at = self.items.partition_point(|item| compare_values(item, &value) != Ordering::Greater);
				self.items.insert(at, value);
				true
			}
		}
	}
}

/// Registered class instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectValue {
	/// Runtime class name.
	pub class_name: Box<str>,
	/// Field values in declaration order.
	pub fields: Vec<FieldValue>,
}

/// One named field slot.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
	/// Field name.
	pub name: Box<str>,
	/// Current value.
	pub value: Value,
}

impl ObjectValue {
	/// Instance with no fields.
	pub fn new(class_name: &str) -> Self {
		Self {
			class_name: class_name.into(),
			fields: Vec::new(),
		}
	}

	/// Builder-style field initialiser used by custom constructors.
	pub fn with(mut self, name: &str, value: Value) -> Self {
		match self.fields.iter_mut().find(|field| field.name.as_ref() == name) {
			Some(field) => field.value = value,
			None => self.fields.push(FieldValue { name: name.into(), value }),
		}
		self
	}

	/// Current value of a field.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.fields.iter().find(|field| field.name.as_ref() == name).map(|field| &field.value)
	}

	/// Overwrite an existing field.
	pub fn set(&mut self, name: &str, value: Value) -> Result<()> {
		let class_name = self.class_name.to_string();
		let slot = self
			.fields
			.iter_mut()
			.find(|field| field.name.as_ref() == name)
			.ok_or_else(|| ReflectError::FieldNotFound {
				class_name,
				field: name.to_owned(),
			})?;
		slot.value = value;
		Ok(())
	}

	/// Remove a field and return its value.
	pub(crate) fn take(&mut self, name: &str) -> Option<Value> {
		let idx = self.fields.iter().position(|field| field.name.as_ref() == name)?;
		Some(self.fields.remove(idx).value)
	}
}

/// Language default for a slot of type `ty`: zero, `false`, `'\0'`, or null.
pub fn default_value(ty: &TypeDesc) -> Value {
	match ty {
		TypeDesc::Primitive(kind) => match kind {
			Primitive::Boolean => Value::Bool(false),
			Primitive::Char => Value::Char('\0'),
			Primitive::Byte => Value::Byte(0),
			Primitive::Short => Value::Short(0),
			Primitive::Int => Value::Int(0),
			Primitive::Long => Value::Long(0),
			Primitive::Float => Value::Float(0.0),
			Primitive::Double => Value::Double(0.0),
		},
		_ => Value::Null,
	}
}

impl Value {
	/// Short kind label for diagnostics.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Value::Null => "null",
			Value::Bool(_) => "bool",
			Value::Char(_) => "char",
			Value::Byte(_) => "byte",
			Value::Short(_) => "short",
			Value::Int(_) => "int",
			Value::Long(_) => "long",
			Value::Float(_) => "float",
			Value::Double(_) => "double",
			Value::String(_) => "string",
			Value::Temporal(_) => "temporal",
			Value::Enum(_) => "enum",
			Value::Array(_) => "array",
			Value::Collection(_) => "collection",
			Value::Map(_) => "map",
			Value::Object(_) => "object",
		}
	}

	/// Whether this is `Null`.
	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	/// Text payload.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(text) => Some(text),
			_ => None,
		}
	}

	/// Whole-number payload widened to `i64`.
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Value::Byte(v) => Some(i64::from(*v)),
			Value::Short(v) => Some(i64::from(*v)),
			Value::Int(v) => Some(i64::from(*v)),
			Value::Long(v) => Some(*v),
			_ => None,
		}
	}

	/// Numeric payload widened to `f64`.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Value::Float(v) => Some(f64::from(*v)),
			Value::Double(v) => Some(*v),
			other => other.as_i64().map(|v| v as f64),
		}
	}

	/// Whether this holds a number.
	pub fn is_numeric(&self) -> bool {
		self.as_f64().is_some()
	}

	/// Nested sequence items for arrays and collections.
	pub fn sequence_items(&self) -> Option<&[Value]> {
		match self {
			Value::Array(array) => Some(&array.items),
			Value::Collection(collection) => Some(&collection.items),
			_ => None,
		}
	}

	/// Compact single-line rendering for diagnostics.
	pub fn render(&self) -> String {
		match self {
			Value::Null => "null".to_owned(),
			Value::Bool(v) => v.to_string(),
			Value::Char(v) => format!("'{v}'"),
			Value::Byte(v) => v.to_string(),
			Value::Short(v) => v.to_string(),
			Value::Int(v) => v.to_string(),
			Value::Long(v) => v.to_string(),
			Value::Float(v) => v.to_string(),
			Value::Double(v) => v.to_string(),
			Value::String(v) => format!("\"{v}\""),
			Value::Temporal(v) => render_temporal(v),
			Value::Enum(v) => format!("{}.{}", v.type_name, v.constant),
			Value::Array(v) => format!("{}[{}]", v.component, v.items.len()),
			Value::Collection(v) => format!("{}({})", v.kind.name(), v.items.len()),
			Value::Map(v) => format!("{{{} entries}}", v.len()),
			Value::Object(v) => format!("{} {{..}}", v.class_name),
		}
	}

	/// Convert parsed JSON into a runtime value.
	///
	/// Integers that fit 32 bits become `Int`, wider ones `Long`; other numbers
	/// become `Double`. Arrays become lists and objects become maps.
	pub fn from_json(json: serde_json::Value) -> Self {
		use serde_json::Value as JsonValue;

		match json {
			JsonValue::Null => Value::Null,
			JsonValue::Bool(v) => Value::Bool(v),
			JsonValue::Number(number) => {
				if let Some(v) = number.as_i64() {
					i32::try_from(v).map(Value::Int).unwrap_or(Value::Long(v))
				} else {
					Value::Double(number.as_f64().unwrap_or(f64::NAN))
				}
			}
			JsonValue::String(v) => Value::String(v),
			JsonValue::Array(items) => Value::Collection(CollectionValue::list(items.into_iter().map(Value::from_json).collect())),
			JsonValue::Object(map) => Value::Map(map.into_iter().map(|(key, value)| (key, Value::from_json(value))).collect()),
		}
	}

	/// Render as JSON.
	pub fn to_json(&self) -> serde_json::Value {
		use serde_json::{Map, Value as JsonValue, json};

		match self {
			Value::Null => JsonValue::Null,
			Value::Bool(v) => json!(v),
			Value::Char(v) => json!(v.to_string()),
			Value::Byte(v) => json!(v),
			Value::Short(v) => json!(v),
			Value::Int(v) => json!(v),
			Value::Long(v) => json!(v),
			Value::Float(v) => json!(v),
			Value::Double(v) => json!(v),
			Value::String(v) => json!(v),
			Value::Temporal(v) => json!(render_temporal(v)),
			Value::Enum(v) => json!(v.constant.as_ref()),
			Value::Array(v) => JsonValue::Array(v.items.iter().map(Value::to_json).collect()),
			Value::Collection(v) => JsonValue::Array(v.items.iter().map(Value::to_json).collect()),
			Value::Map(v) => {
				let mut keys: Vec<&String> = v.keys().collect();
				keys.sort();
				let mut out = Map::new();
				for key in keys {
					out.insert(key.clone(), v[key].to_json());
				}
				JsonValue::Object(out)
			}
			Value::Object(v) => {
				let mut out = Map::new();
				for field in &v.fields {
					out.insert(field.name.to_string(), field.value.to_json());
				}
				JsonValue::Object(out)
			}
		}
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::String(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::String(value)
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Bool(value)
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Value::Int(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Value::Long(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::Double(value)
	}
}

/// Parse a JSON object into a field mapping.
pub fn field_map_from_json(json: serde_json::Value) -> Result<FieldMap> {
	match Value::from_json(json) {
		Value::Map(map) => Ok(map),
		other => Err(ReflectError::NotAMapping { got: other.kind_name() }),
	}
}

/// Parse JSON text into a field mapping.
pub fn field_map_from_json_str(text: &str) -> Result<FieldMap> {
	field_map_from_json(serde_json::from_str(text)?)
}

fn render_temporal(value: &Temporal) -> String {
	match value {
		Temporal::Date(v) => v.format("%Y-%m-%d").to_string(),
		Temporal::Time(v) => v.format("%H:%M:%S%.f").to_string(),
		Temporal::DateTime(v) => v.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
	}
}

/// Total order used by sorted sets: numbers, then text, then kind label.
fn compare_values(left: &Value, right: &Value) -> Ordering {
	match (left, right) {
		(Value::String(a), Value::String(b)) => a.cmp(b),
		(Value::Temporal(a), Value::Temporal(b)) => a.cmp(b),
		(Value::Char(a), Value::Char(b)) => a.cmp(b),
		(Value::Enum(a), Value::Enum(b)) => a.ordinal.cmp(&b.ordinal),
		_ => match (left.as_f64(), right.as_f64()) {
			(Some(a), Some(b)) => a.total_cmp(&b),
			(Some(_), None) => Ordering::Less,
			(None, Some(_)) => Ordering::Greater,
			(None, None) => left.kind_name().cmp(right.kind_name()),
		},
	}
}

/// Sorted-set membership: numbers match by value across widths, anything else must also be equal.
fn sorts_equal(left: &Value, right: &Value) -> bool {
	compare_values(left, right) == Ordering::Equal && (left == right || (left.is_numeric() && right.is_numeric()))
}
