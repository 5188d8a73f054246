/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Safely converts a `u64` to `f64` if and only if it is exactly
/// representable.
///
/// Used for `0x`/`0o`/`0b` radix literals, which parse as unsigned integers
/// before joining the evaluator's single `f64` numeric type.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds [`MAX_SAFE_U64_INT`].
///
/// ## Example
/// ```
/// use templex::util::num::{MAX_SAFE_U64_INT, u64_to_f64_checked};
///
/// assert_eq!(u64_to_f64_checked(8, "too big!").unwrap(), 8.0);
/// assert!(u64_to_f64_checked(MAX_SAFE_U64_INT + 1, "too big!").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn u64_to_f64_checked<E>(value: u64, error: E) -> Result<f64, E> {
    if value > MAX_SAFE_U64_INT {
        return Err(error);
    }
    Ok(value as f64)
}

/// Converts an `f64` to a sequence index, if it denotes one.
///
/// A usable index is finite, an exact integer, and non-negative. Anything
/// else (fractional values, negatives, `NaN`, infinities) is not an index;
/// the evaluator treats such accesses as missing rather than failing, so
/// this returns `None` instead of an error.
///
/// ## Example
/// ```
/// use templex::util::num::f64_to_index;
///
/// assert_eq!(f64_to_index(2.0), Some(2));
/// assert_eq!(f64_to_index(-1.0), None);
/// assert_eq!(f64_to_index(1.5), None);
/// assert_eq!(f64_to_index(f64::NAN), None);
/// ```
#[allow(clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss)]
#[must_use]
pub fn f64_to_index(value: f64) -> Option<usize> {
    if !value.is_finite() || value.fract() != 0.0 || value < 0.0 {
        return None;
    }
    if value > MAX_SAFE_U64_INT as f64 {
        return None;
    }
    Some(value as usize)
}

/// Resolves a possibly-negative offset against a sequence length, the way
/// `slice` arguments resolve: negative offsets count from the end and clamp
/// to the valid range.
///
/// ## Example
/// ```
/// use templex::util::num::resolve_offset;
///
/// assert_eq!(resolve_offset(-1.0, 3), 2);
/// assert_eq!(resolve_offset(-9.0, 3), 0);
/// assert_eq!(resolve_offset(2.0, 3), 2);
/// assert_eq!(resolve_offset(9.0, 3), 3);
/// ```
#[allow(clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss)]
#[must_use]
pub fn resolve_offset(value: f64, len: usize) -> usize {
    if value.is_nan() {
        return 0;
    }
    let truncated = value.trunc();
    if truncated < 0.0 {
        let back = (-truncated).min(len as f64) as usize;
        len - back
    } else {
        truncated.min(len as f64) as usize
    }
}
