/// Member and index access evaluation.
///
/// Resolves static names, static indexes, and dynamic keys against
/// mappings, sequences, and strings, producing the undefined value for
/// anything that misses.
pub mod member;
/// Call evaluation.
///
/// Dispatches calls to host functions, template lambdas, and the bound
/// sequence methods.
pub mod call;
/// Unary operator evaluation.
pub mod unary;
/// Binary operator evaluation.
///
/// Implements the value-returning short-circuit logic operators, loose
/// equality, and the additive pair.
pub mod binary;

pub mod core;
