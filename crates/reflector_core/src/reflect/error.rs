use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, ReflectError>;

/// Errors produced while building, coercing, and injecting values.
#[derive(Debug, Error)]
pub enum ReflectError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Mapping input was not valid JSON.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// Mapping input was not a key/value object.
	#[error("expected a key/value mapping, got {got}")]
	NotAMapping {
		/// Kind of the value that was supplied instead.
		got: &'static str,
	},
	/// Type has no usable no-argument constructor.
	#[error("no usable no-argument constructor for {type_name}")]
	NoConstructor {
		/// Type that could not be constructed.
		type_name: String,
	},
	/// Enum declares no constants, so no default can be picked.
	#[error("enum {name} declares no constants")]
	EmptyEnum {
		/// Enum type name.
		name: String,
	},
	/// Value could not be converted into the requested type.
	#[error("cannot coerce {value} into {target}")]
	Coercion {
		/// Rendered source value.
		value: String,
		/// Target type name.
		target: String,
	},
	/// Value kind does not fit the declared field or parameter type.
	#[error("type mismatch: expected {expected}, got {got}")]
	TypeMismatch {
		/// Declared type name.
		expected: String,
		/// Supplied value kind.
		got: &'static str,
	},
	/// Field is private and its owner did not grant write access.
	#[error("field {field} on {class_name} is not accessible")]
	FieldNotAccessible {
		/// Owning class name.
		class_name: String,
		/// Field name.
		field: String,
	},
	/// Accessor method body reported a failure.
	#[error("method {method} failed: {reason}")]
	Invocation {
		/// Invoked method name.
		method: String,
		/// Failure reported by the method body.
		reason: String,
	},
	/// Nested map injection left a field of the inner object unassigned.
	#[error("nested {class_name} field {field} was not assigned: {reason}")]
	NestedInjection {
		/// Inner class name.
		class_name: String,
		/// First inner field that failed.
		field: String,
		/// Failure of that field.
		reason: String,
	},
	/// Nested list depth does not fit the array rank.
	#[error("rank mismatch: array rank {expected}, input depth {got}")]
	RankMismatch {
		/// Rank of the target array type.
		expected: usize,
		/// Depth found in the input.
		got: usize,
	},
	/// More items were supplied than the array can hold.
	#[error("array of length {len} cannot hold {items} items")]
	ArrayOverflow {
		/// Array length.
		len: usize,
		/// Supplied item count.
		items: usize,
	},
	/// Array operation was requested for a non-array type.
	#[error("{type_name} is not an array type")]
	NotAnArray {
		/// Offending type name.
		type_name: String,
	},
	/// Target type cannot receive injected fields.
	#[error("{type_name} is not a suitable injection target: {reason}")]
	UnsuitableTarget {
		/// Rejected type name.
		type_name: String,
		/// Rejection reason.
		reason: &'static str,
	},
	/// Requested class is not registered.
	#[error("class not found: {name}")]
	ClassNotFound {
		/// Requested class name.
		name: String,
	},
	/// Requested enum is not registered.
	#[error("enum not found: {name}")]
	EnumNotFound {
		/// Requested enum name.
		name: String,
	},
	/// Requested field does not exist on the class.
	#[error("field {field} not found on {class_name}")]
	FieldNotFound {
		/// Class that was searched.
		class_name: String,
		/// Requested field name.
		field: String,
	},
	/// No method with the requested name exists on the class.
	#[error("method {method} not found on {class_name}")]
	MethodNotFound {
		/// Class that was searched.
		class_name: String,
		/// Requested method name.
		method: String,
	},
	/// Type name is neither a basic type nor registered.
	#[error("unknown type: {name}")]
	UnknownType {
		/// Requested type name.
		name: String,
	},
	/// Type name text is malformed.
	#[error("invalid type name: {name}")]
	InvalidTypeName {
		/// Original type name text.
		name: String,
	},
	/// Same type name was registered twice.
	#[error("duplicate type registration: {name}")]
	DuplicateType {
		/// Duplicated type name.
		name: String,
	},
	/// Superclass chain loops back on itself.
	#[error("inheritance cycle through {name}")]
	InheritanceCycle {
		/// Class where the cycle was detected.
		name: String,
	},
}
