//! Registry-driven object construction, value coercion, and field injection.

/// Type registry, instance factory, coercion, and field injection.
pub mod reflect;
