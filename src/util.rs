/// Numeric conversion helpers.
///
/// This module provides safe functions for converting between integer and
/// floating-point types without risking silent data loss or rounding errors.
/// The evaluator stores every number as `f64` (the grammar has a single
/// numeric type), so index arithmetic and radix literals funnel through these
/// helpers.
pub mod num;
