#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during lexing, template splitting, or
/// parsing.
pub enum ParseError {
    /// Found an unexpected token while parsing.
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// The byte position where the error occurred.
        pos:   usize,
    },
    /// Reached the end of the expression unexpectedly.
    UnexpectedEndOfInput {
        /// The byte position where the error occurred.
        pos: usize,
    },
    /// Found extra tokens after the expression should have ended.
    UnexpectedTrailingTokens {
        /// The extra/unexpected token.
        token: String,
        /// The byte position where the error occurred.
        pos:   usize,
    },
    /// An expression delimiter `${` was never closed.
    UnterminatedExpression {
        /// The byte position of the opening delimiter.
        pos: usize,
    },
    /// A backtick template string was never closed.
    UnterminatedTemplateString {
        /// The byte position of the opening backtick.
        pos: usize,
    },
    /// An expression span contained no expression at all (`${}`).
    EmptyExpression {
        /// The byte position of the opening delimiter.
        pos: usize,
    },
    /// An index access had empty brackets (`x[]`).
    EmptyIndex {
        /// The byte position of the opening bracket.
        pos: usize,
    },
    /// A lambda block body did not end in an explicit `return`.
    MissingReturn {
        /// The byte position of the block's opening brace.
        pos: usize,
    },
    /// A numeric literal was too large to be represented exactly.
    LiteralTooLarge {
        /// The byte position where the error occurred.
        pos: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { token, pos } => {
                write!(f, "Error at position {pos}: Unexpected token: {token}.")
            },

            Self::UnexpectedEndOfInput { pos } => {
                write!(f, "Error at position {pos}: Unexpected end of expression.")
            },

            Self::UnexpectedTrailingTokens { token, pos } => write!(f,
                                                                    "Error at position {pos}: Extra tokens after expression: {token}"),

            Self::UnterminatedExpression { pos } => write!(f,
                                                           "Error at position {pos}: Expression delimiter '${{' is never closed."),

            Self::UnterminatedTemplateString { pos } => write!(f,
                                                               "Error at position {pos}: Template string '`' is never closed."),

            Self::EmptyExpression { pos } => {
                write!(f, "Error at position {pos}: Empty expression.")
            },

            Self::EmptyIndex { pos } => {
                write!(f, "Error at position {pos}: Index brackets must not be empty.")
            },

            Self::MissingReturn { pos } => write!(f,
                                                  "Error at position {pos}: Lambda block body must end in 'return <expression>'."),

            Self::LiteralTooLarge { pos } => {
                write!(f, "Error at position {pos}: Literal is too large.")
            },
        }
    }
}

impl std::error::Error for ParseError {}
