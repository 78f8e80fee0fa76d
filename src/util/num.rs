use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Largest signed integer exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_I64_INT: i64 = 9_007_199_254_740_991;

/// Largest number of elements a range expression may produce.
pub const MAX_RANGE_LEN: u64 = 1 << 20;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `MAX_SAFE_I64_INT` in absolute
/// value.
///
/// ## Example
/// ```
/// use vexl::util::num::{MAX_SAFE_I64_INT, i64_to_f64_checked};
///
/// let result = i64_to_f64_checked(42, "too big!");
/// assert_eq!(result.unwrap(), 42.0);
///
/// assert!(i64_to_f64_checked(MAX_SAFE_I64_INT + 1, "too big!").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked<E>(value: i64, error: E) -> Result<f64, E> {
    if value.unsigned_abs() > MAX_SAFE_I64_INT.unsigned_abs() {
        return Err(error);
    }
    Ok(value as f64)
}

/// Truncates an `f64` toward zero and converts it to `i64`.
///
/// This is how index and range operands are read: `1.9` addresses element
/// `1` and `-1.5` addresses the last element.
///
/// ## Errors
/// Returns `RuntimeError::InvalidIndex` for non-finite values and for values
/// whose magnitude is not exactly representable.
///
/// ## Example
/// ```
/// use vexl::util::num::f64_to_i64_truncated;
///
/// assert_eq!(f64_to_i64_truncated(2.7).unwrap(), 2);
/// assert_eq!(f64_to_i64_truncated(-1.2).unwrap(), -1);
/// assert!(f64_to_i64_truncated(f64::NAN).is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_i64_truncated(value: f64) -> EvalResult<i64> {
    let limit = MAX_SAFE_I64_INT as f64;

    if !value.is_finite() || value.abs() > limit {
        return Err(RuntimeError::InvalidIndex { value });
    }
    Ok(value.trunc() as i64)
}

/// Resolves a possibly negative index against a value of `size` elements.
///
/// Non-negative indices address from the front, negative indices count back
/// from the end (`-1` is the last element).
///
/// ## Errors
/// Returns `RuntimeError::IndexOutOfBounds` when the resolved position falls
/// outside `0..size`.
///
/// ## Example
/// ```
/// use vexl::util::num::resolve_index;
///
/// assert_eq!(resolve_index(0, 3).unwrap(), 0);
/// assert_eq!(resolve_index(-1, 3).unwrap(), 2);
/// assert!(resolve_index(3, 3).is_err());
/// assert!(resolve_index(-4, 3).is_err());
/// ```
pub fn resolve_index(index: i64, size: usize) -> EvalResult<usize> {
    let out_of_bounds = RuntimeError::IndexOutOfBounds { index, size };
    let size_i64 = i64::try_from(size).map_err(|_| out_of_bounds.clone())?;
    let position = if index < 0 { size_i64 + index } else { index };

    if position < 0 || position >= size_i64 {
        return Err(out_of_bounds);
    }

    usize::try_from(position).map_err(|_| out_of_bounds)
}
