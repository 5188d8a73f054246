/// Core parsing entry points.
///
/// Contains the expression-text entry used by template splitting and the
/// top-level ternary rule that the precedence tiers hang from.
pub mod core;

/// Unary, primary, and postfix parsing.
///
/// Handles prefix operators, atomic expressions (literals, identifiers,
/// lambdas, array and object literals), and the member/index/call postfix
/// chain.
pub mod unary;

/// Binary operator parsing.
///
/// Implements the precedence ladder for `||`, `&&`, `==`/`!=`, and `+`/`-`.
pub mod binary;

/// Utility functions for the parser.
///
/// Provides comma-separated list parsing and other helpers shared across the
/// parsing tiers.
pub mod utils;
