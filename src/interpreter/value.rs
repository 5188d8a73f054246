/// String rendering for values.
///
/// Implements the display rules string interpolation relies on: undefined
/// renders as nothing, numbers drop a whole-valued fraction, sequences join
/// with commas, and mappings and callables render as fixed tags.
pub mod display;

pub mod core;
