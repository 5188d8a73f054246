use std::fmt;

use crate::{interpreter::value::core::Value, util::num::MAX_SAFE_U64_INT};

impl fmt::Display for Value {
    /// Renders the value as interpolation text.
    ///
    /// `Undefined` renders as nothing, so a missing binding inside a larger
    /// string simply disappears. Sequences join their rendered elements with
    /// commas; mappings and callables render as fixed tags.
    ///
    /// # Example
    /// ```
    /// use templex::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Number(10.0).to_string(), "10");
    /// assert_eq!(Value::Number(0.1).to_string(), "0.1");
    /// assert_eq!(Value::Undefined.to_string(), "");
    /// assert_eq!(Value::Null.to_string(), "null");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => Ok(()),
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => fmt_number(f, *n),
            Self::Str(s) => write!(f, "{s}"),
            Self::Sequence(elements) => {
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{element}")?;
                }
                Ok(())
            },
            Self::Mapping(_) => write!(f, "[object Object]"),
            Self::Callable(_) => write!(f, "[function]"),
        }
    }
}

/// Writes a number without a fractional part when it is whole.
///
/// Whole values within the exactly-representable integer range print as
/// integers (`10`, not `10.0`), matching how interpolated numbers are
/// expected to read. Everything else falls back to the shortest `f64`
/// rendering.
#[allow(clippy::cast_possible_truncation)]
fn fmt_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        return write!(f, "NaN");
    }
    if n.is_infinite() {
        return write!(f, "{}Infinity", if n < 0.0 { "-" } else { "" });
    }

    #[allow(clippy::cast_precision_loss)]
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_U64_INT as f64 {
        return write!(f, "{}", n as i64);
    }

    write!(f, "{n}")
}
