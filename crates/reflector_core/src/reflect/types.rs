use std::fmt;

use crate::reflect::{ReflectError, Registry, Result};

/// Primitive scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
	/// `boolean`
	Boolean,
	/// `char`
	Char,
	/// `byte`
	Byte,
	/// `short`
	Short,
	/// `int`
	Int,
	/// `long`
	Long,
	/// `float`
	Float,
	/// `double`
	Double,
}

/// Primitive name and wrapper name for every primitive kind.
const PRIMITIVE_TABLE: [(Primitive, &str, &str); 8] = [
	(Primitive::Int, "int", "Integer"),
	(Primitive::Double, "double", "Double"),
	(Primitive::Float, "float", "Float"),
	(Primitive::Boolean, "boolean", "Boolean"),
	(Primitive::Short, "short", "Short"),
	(Primitive::Long, "long", "Long"),
	(Primitive::Char, "char", "Character"),
	(Primitive::Byte, "byte", "Byte"),
];

/// Names recognized without a registry lookup.
pub const BASIC_TYPE_NAMES: [&str; 29] = [
	"boolean", "char", "byte", "short", "int", "long", "float", "double", "Boolean", "Character", "Byte", "Short", "Integer", "Long", "Float", "Double",
	"String", "Number", "Object", "Date", "Time", "DateTime", "List", "Map", "Set", "SortedSet", "Queue", "Collection", "Iterable",
];

impl Primitive {
	/// Every primitive kind.
	pub const ALL: [Primitive; 8] = [
		Primitive::Boolean,
		Primitive::Char,
		Primitive::Byte,
		Primitive::Short,
		Primitive::Int,
		Primitive::Long,
		Primitive::Float,
		Primitive::Double,
	];

	fn row(self) -> (Primitive, &'static str, &'static str) {
		PRIMITIVE_TABLE.into_iter().find(|(item, _, _)| *item == self).unwrap_or((self, "?", "?"))
	}

	/// Lower-case primitive name (`int`).
	pub fn name(self) -> &'static str {
		self.row().1
	}

	/// Wrapper type name (`Integer`).
	pub fn wrapper_name(self) -> &'static str {
		self.row().2
	}

	/// Look up a primitive by its lower-case name.
	pub fn from_name(name: &str) -> Option<Self> {
		PRIMITIVE_TABLE.into_iter().find(|(_, item, _)| *item == name).map(|(kind, _, _)| kind)
	}

	/// Look up the primitive wrapped by a wrapper type name.
	pub fn from_wrapper_name(name: &str) -> Option<Self> {
		PRIMITIVE_TABLE.into_iter().find(|(_, _, item)| *item == name).map(|(kind, _, _)| kind)
	}

	/// Whether this kind holds a number.
	pub fn is_numeric(self) -> bool {
		!matches!(self, Primitive::Boolean | Primitive::Char)
	}

	/// Whether this kind holds a whole number.
	pub fn is_integral(self) -> bool {
		matches!(self, Primitive::Byte | Primitive::Short | Primitive::Int | Primitive::Long)
	}

	/// Textual zero the instance factory builds this kind from.
	///
	/// Booleans default to `true` here, unlike the language default used for
	/// fields and array slots.
	pub fn zero_text(self) -> &'static str {
		match self {
			Primitive::Byte | Primitive::Short | Primitive::Int | Primitive::Long => "0",
			Primitive::Float | Primitive::Double => "0.0",
			Primitive::Boolean => "true",
			Primitive::Char => " ",
		}
	}
}

/// Date/time flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemporalKind {
	/// Calendar date without time.
	Date,
	/// Time of day without date.
	Time,
	/// Date with time of day.
	DateTime,
}

impl TemporalKind {
	/// Type name.
	pub fn name(self) -> &'static str {
		match self {
			TemporalKind::Date => "Date",
			TemporalKind::Time => "Time",
			TemporalKind::DateTime => "DateTime",
		}
	}
}

/// Recognized collection interfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
	/// Insertion-ordered list.
	List,
	/// String-keyed hash map.
	Map,
	/// Hash set with unique members.
	Set,
	/// Ordered set with unique members.
	SortedSet,
	/// FIFO queue.
	Queue,
}

impl CollectionKind {
	/// Interface name.
	pub fn name(self) -> &'static str {
		match self {
			CollectionKind::List => "List",
			CollectionKind::Map => "Map",
			CollectionKind::Set => "Set",
			CollectionKind::SortedSet => "SortedSet",
			CollectionKind::Queue => "Queue",
		}
	}
}

/// Shape a caller asks the factory, coercer, or injector to produce.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDesc {
	/// Non-nullable primitive.
	Primitive(Primitive),
	/// Nullable boxed primitive.
	Wrapper(Primitive),
	/// Text.
	String,
	/// Abstract number; accepts any numeric value.
	Number,
	/// Root object type; accepts anything.
	Object,
	/// Date/time value.
	Temporal(TemporalKind),
	/// Registered enum.
	Enum(Box<str>),
	/// Registered class.
	Class(Box<str>),
	/// Registered interface.
	Interface(Box<str>),
	/// Recognized collection interface.
	Collection(CollectionKind),
	/// Array of the component type.
	Array(Box<TypeDesc>),
}

impl TypeDesc {
	/// Array type with the given component.
	pub fn array_of(component: TypeDesc) -> Self {
		TypeDesc::Array(Box::new(component))
	}

	/// Array type of `rank` dimensions over `leaf`.
	pub fn array_of_rank(leaf: TypeDesc, rank: usize) -> Self {
		(0..rank).fold(leaf, |acc, _| TypeDesc::array_of(acc))
	}

	/// Registered class by name.
	pub fn class(name: &str) -> Self {
		TypeDesc::Class(name.into())
	}

	/// Registered enum by name.
	pub fn enumeration(name: &str) -> Self {
		TypeDesc::Enum(name.into())
	}

	/// Component type for arrays.
	pub fn component(&self) -> Option<&TypeDesc> {
		match self {
			TypeDesc::Array(component) => Some(component),
			_ => None,
		}
	}

	/// Innermost non-array type.
	pub fn leaf(&self) -> &TypeDesc {
		let mut current = self;
		while let TypeDesc::Array(component) = current {
			current = component;
		}
		current
	}

	/// Number of `[]` pairs in the type name.
	pub fn rank(&self) -> usize {
		self.to_string().matches("[]").count()
	}

	/// Whether this is a non-nullable primitive.
	pub fn is_primitive(&self) -> bool {
		matches!(self, TypeDesc::Primitive(_))
	}

	/// Whether this is an array type.
	pub fn is_array(&self) -> bool {
		matches!(self, TypeDesc::Array(_))
	}

	/// Whether this is an interface, collection interfaces included.
	pub fn is_interface(&self) -> bool {
		matches!(self, TypeDesc::Interface(_) | TypeDesc::Collection(_))
	}

	/// Whether a slot of this type can hold null.
	pub fn accepts_null(&self) -> bool {
		!self.is_primitive()
	}

	/// Primitive kind behind a primitive or wrapper type.
	pub fn primitive_kind(&self) -> Option<Primitive> {
		match self {
			TypeDesc::Primitive(kind) | TypeDesc::Wrapper(kind) => Some(*kind),
			_ => None,
		}
	}

	/// Wrapper type for a primitive type.
	pub fn to_wrapper(&self) -> Option<TypeDesc> {
		match self {
			TypeDesc::Primitive(kind) => Some(TypeDesc::Wrapper(*kind)),
			_ => None,
		}
	}

	/// Primitive type for a wrapper type.
	pub fn to_primitive(&self) -> Option<TypeDesc> {
		match self {
			TypeDesc::Wrapper(kind) => Some(TypeDesc::Primitive(*kind)),
			_ => None,
		}
	}

	/// Resolve a basic type name without consulting a registry.
	pub fn basic(name: &str) -> Option<Self> {
		if let Some(kind) = Primitive::from_name(name) {
			return Some(TypeDesc::Primitive(kind));
		}
		if let Some(kind) = Primitive::from_wrapper_name(name) {
			return Some(TypeDesc::Wrapper(kind));
		}
		let ty = match name {
			"String" => TypeDesc::String,
			"Number" => TypeDesc::Number,
			"Object" => TypeDesc::Object,
			"Date" => TypeDesc::Temporal(TemporalKind::Date),
			"Time" => TypeDesc::Temporal(TemporalKind::Time),
			"DateTime" => TypeDesc::Temporal(TemporalKind::DateTime),
			"List" | "Collection" | "Iterable" => TypeDesc::Collection(CollectionKind::List),
			"Map" => TypeDesc::Collection(CollectionKind::Map),
			"Set" => TypeDesc::Collection(CollectionKind::Set),
			"SortedSet" => TypeDesc::Collection(CollectionKind::SortedSet),
			"Queue" => TypeDesc::Collection(CollectionKind::Queue),
			_ => return None,
		};
		Some(ty)
	}

	/// Parse a type name such as `int[][]` or `Point`, resolving non-basic
	/// names against `registry`.
	pub fn parse(name: &str, registry: &Registry) -> Result<Self> {
		let trimmed = name.trim();
		let mut base = trimmed;
		let mut rank = 0_usize;
		while let Some(stripped) = base.strip_suffix(']') {
			let Some(inner) = stripped.trim_end().strip_suffix('[') else {
				return Err(ReflectError::InvalidTypeName { name: name.to_owned() });
			};
			base = inner.trim_end();
			rank += 1;
		}

		if base.is_empty() || !base.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '.' || c == '$') {
			return Err(ReflectError::InvalidTypeName { name: name.to_owned() });
		}

		let leaf = match Self::basic(base) {
			Some(ty) => ty,
			None => registry.resolve_type(base).ok_or_else(|| ReflectError::UnknownType { name: base.to_owned() })?,
		};
		Ok(Self::array_of_rank(leaf, rank))
	}
}

impl fmt::Display for TypeDesc {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TypeDesc::Primitive(kind) => f.write_str(kind.name()),
			TypeDesc::Wrapper(kind) => f.write_str(kind.wrapper_name()),
			TypeDesc::String => f.write_str("String"),
			TypeDesc::Number => f.write_str("Number"),
			TypeDesc::Object => f.write_str("Object"),
			TypeDesc::Temporal(kind) => f.write_str(kind.name()),
			TypeDesc::Enum(name) | TypeDesc::Class(name) | TypeDesc::Interface(name) => f.write_str(name),
			TypeDesc::Collection(kind) => f.write_str(kind.name()),
			TypeDesc::Array(component) => write!(f, "{component}[]"),
		}
	}
}

#[cfg(test)]
mod tests;
