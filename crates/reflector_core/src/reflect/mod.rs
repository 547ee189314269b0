mod coerce;
mod dims;
mod error;
mod factory;
mod inject;
mod naming;
mod registry;
mod temporal;
mod types;
mod value;

#[cfg(test)]
mod test_support;

/// Assignment compatibility, text casting, and value coercion.
pub use coerce::{assign_compatible, cast_from_text, coerce, coerce_with, coerce_with_options};
/// Rank inference and list/array conversion.
pub use dims::{MismatchPolicy, array_to_list, list_to_array, rank_of_list, rank_of_type};
/// Error and result aliases.
pub use error::{ReflectError, Result};
/// Instance and array factory entry points.
pub use factory::{produce_new_array, produce_new_array_with_data, produce_new_instance, produce_new_object};
/// Field injection entry points, options, and reports.
pub use inject::{
	AssignPath, FieldOutcome, FieldReport, InjectOptions, InjectReport, Injected, check_target_for_injection, inject_into, produce_injected_enum,
	produce_injected_object, produce_injected_value, read_field,
};
/// Accessor naming conventions.
pub use naming::{AccessorKind, CodingStyle, accessor_name};
/// Type capability registry.
pub use registry::{ClassBuilder, ClassDef, Constructor, EnumDef, FieldAccess, FieldDef, MethodDef, Registry, RegistryBuilder};
/// Date/time parsing and projection.
pub use temporal::{parse_date_time, parse_temporal, project};
/// Type descriptors.
pub use types::{BASIC_TYPE_NAMES, CollectionKind, Primitive, TemporalKind, TypeDesc};
/// Runtime value types.
pub use value::{
	ArrayValue, CollectionValue, EnumValue, FieldMap, FieldValue, ObjectValue, Temporal, Value, default_value, field_map_from_json, field_map_from_json_str,
};
