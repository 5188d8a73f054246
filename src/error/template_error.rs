use crate::error::{ParseError, RuntimeError, SecurityError};

#[derive(Debug, Clone, PartialEq)]
/// The failure surfaced by the public `resolve` entry points.
///
/// Parse and evaluation failures display with the resolver-identifying
/// `Parser Error: ` prefix. Security rejections are surfaced verbatim, with
/// their aggregated finding text untouched.
pub enum TemplateError {
    /// The template failed to lex, split, or parse.
    Parse(ParseError),
    /// The security gate rejected an expression before evaluation.
    Security(SecurityError),
    /// Evaluation failed with a non-benign runtime error.
    Eval(RuntimeError),
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "Parser Error: {e}"),
            Self::Security(e) => write!(f, "{e}"),
            Self::Eval(e) => write!(f, "Parser Error: {e}"),
        }
    }
}

impl std::error::Error for TemplateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Security(e) => Some(e),
            Self::Eval(e) => Some(e),
        }
    }
}

impl From<ParseError> for TemplateError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<SecurityError> for TemplateError {
    fn from(e: SecurityError) -> Self {
        Self::Security(e)
    }
}

impl From<RuntimeError> for TemplateError {
    fn from(e: RuntimeError) -> Self {
        Self::Eval(e)
    }
}
