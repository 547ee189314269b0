/// Text coercion command.
pub mod coerce;
/// Built-in demo type registry.
pub mod demo;
/// JSON injection command.
pub mod inject;
/// Default instance command.
pub mod new;
/// Value and report rendering.
pub mod print;
/// List rank command.
pub mod rank;
/// Registry listing command.
pub mod types;

#[cfg(test)]
mod test_support;
