#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents a rejection by the static security gate.
///
/// The gate inspects every parsed expression before evaluation and rejects
/// templates that reference capabilities outside the grammar's sandbox.
pub enum SecurityError {
    /// The expression references a module-loading capability.
    ModuleImport,
    /// The expression references one or more other disallowed capabilities.
    /// All findings are aggregated into a single rejection.
    Problems(Vec<String>),
}

impl std::fmt::Display for SecurityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ModuleImport => write!(f, "Insecure module import"),
            Self::Problems(findings) => {
                write!(f, "Security problems detected: {}", findings.join(", "))
            },
        }
    }
}

impl std::error::Error for SecurityError {}
