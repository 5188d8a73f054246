#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can be raised during evaluation.
///
/// Reads through missing bindings are not errors: they evaluate to
/// `Value::Undefined` and never appear here.
pub enum RuntimeError {
    /// Tried to call a value that is not callable (including `Undefined`).
    CallTarget {
        /// The kind of value that was called (e.g. `undefined`, `number`).
        found: String,
        /// The byte position of the call site.
        pos:   usize,
    },
    /// A value had an unexpected or incompatible type for an operator.
    TypeMismatch {
        /// Details about the type mismatch.
        details: String,
        /// The byte position where the error occurred.
        pos:     usize,
    },
    /// A caller-supplied native callable reported a failure.
    NativeCall {
        /// The message reported by the callable.
        message: String,
    },
}

impl RuntimeError {
    /// Builds the failure a caller-supplied callable should return when it
    /// cannot produce a value.
    ///
    /// # Example
    /// ```
    /// use templex::error::RuntimeError;
    ///
    /// let err = RuntimeError::native("service unavailable");
    /// assert_eq!(err.to_string(), "service unavailable");
    /// ```
    #[must_use]
    pub fn native(message: impl Into<String>) -> Self {
        Self::NativeCall { message: message.into() }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CallTarget { found, pos } => {
                write!(f, "Error at position {pos}: Cannot call a value of type {found}.")
            },

            Self::TypeMismatch { details, pos } => {
                write!(f, "Error at position {pos}: {details}")
            },

            Self::NativeCall { message } => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for RuntimeError {}
