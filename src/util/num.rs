use crate::{error::RuntimeError, renderer::evaluator::core::EvalResult};

/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_I64_INT: i64 = 9_007_199_254_740_991;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `MAX_SAFE_I64_INT` in absolute
/// value.
///
/// ## Parameters
/// - `value`: The integer to convert.
/// - `error`: The error to return if conversion is not lossless.
///
/// ## Example
/// ```
/// use velocette::util::num::{MAX_SAFE_I64_INT, i64_to_f64_checked};
///
/// let result = i64_to_f64_checked(42, "too big!");
/// assert_eq!(result.unwrap(), 42.0);
///
/// let big = MAX_SAFE_I64_INT + 1;
/// assert!(i64_to_f64_checked(big, "too big!").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked<E>(value: i64, error: E) -> Result<f64, E> {
    if value.unsigned_abs() > MAX_SAFE_I64_INT as u64 {
        return Err(error);
    }
    Ok(value as f64)
}

/// Truncates an `f64` toward zero and converts it to `i64`.
///
/// This is the integer normalization applied when a `#set` directive stores
/// a non-integer arithmetic result: the fractional part is discarded without
/// rounding, so `3.7` becomes `3` and `-3.7` becomes `-3`.
///
/// ## Errors
/// Returns an error for non-finite or out-of-range values.
///
/// ## Parameters
/// - `value`: The floating-point value to truncate.
/// - `line`: Template line number for error reporting.
///
/// ## Example
/// ```
/// use velocette::util::num::f64_to_i64_trunc;
///
/// assert_eq!(f64_to_i64_trunc(3.7, 1).unwrap(), 3);
/// assert_eq!(f64_to_i64_trunc(-3.5, 1).unwrap(), -3);
/// assert!(f64_to_i64_trunc(f64::NAN, 1).is_err());
/// assert!(f64_to_i64_trunc(1e20, 1).is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_i64_trunc(value: f64, line: usize) -> EvalResult<i64> {
    if !value.is_finite() {
        return Err(RuntimeError::TypeError { details: format!("Cannot convert non-finite value {value} to an integer"),
                                             line });
    }
    let truncated = value.trunc();
    if truncated < i64::MIN as f64 || truncated > i64::MAX as f64 {
        return Err(RuntimeError::LiteralTooLarge { line });
    }
    Ok(truncated as i64)
}
