/// Parsing errors.
///
/// Defines all error types that can occur during preprocessing, lexing,
/// template splitting, and expression parsing. Parse errors include syntax
/// mistakes, unexpected tokens, unterminated quotes or expressions, and any
/// other issues detected before evaluation.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation. Runtime
/// errors include calling something that is not callable, type mismatches in
/// numeric operators, and failures reported by caller-supplied callables.
pub mod runtime_error;
/// Security gate rejections.
///
/// Defines the errors produced by the static pre-evaluation check over a
/// parsed expression: module-import references and the aggregated list of
/// other disallowed capability references.
pub mod security_error;
/// Resolver-level error wrapper.
///
/// Defines `TemplateError`, the single error type surfaced by the public
/// `resolve` entry points, wrapping parse, security, and evaluation failures.
pub mod template_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
pub use security_error::SecurityError;
pub use template_error::TemplateError;
