use crate::{
    interpreter::value::core::{Value, add},
    util::num::{MAX_RANGE_LEN, i64_to_f64_checked},
};

/// Adds two values with the broadcasting fold.
///
/// Addition is commutative, so the longer operand drives the result.
///
/// # Example
/// ```
/// use vexl::{Value, interpreter::evaluator::binary::arithmetic::plus};
///
/// let r = plus(&Value::scalar(1.0), &Value::from([1.0, 2.0]));
/// assert_eq!(r, Value::from([2.0, 3.0]));
/// ```
#[must_use]
pub fn plus(a: &Value, b: &Value) -> Value {
    a.broadcast(b, add, |x, y| x + y)
}

/// Subtracts `b` from `a`, folding over `b` for every element of `a`.
#[must_use]
pub fn minus(a: &Value, b: &Value) -> Value {
    a.transform(b, add, |x, y| x - y)
}

/// Multiplies two values with the broadcasting fold.
///
/// Multiplication is commutative, so the longer operand drives the result.
#[must_use]
pub fn multiply(a: &Value, b: &Value) -> Value {
    a.broadcast(b, add, |x, y| x * y)
}

/// Divides `a` by `b`, folding over `b` for every element of `a`.
#[must_use]
pub fn divide(a: &Value, b: &Value) -> Value {
    a.transform(b, add, |x, y| x / y)
}

/// Floating-point remainder of `a` by `b`, with the sign of `a`.
#[must_use]
pub fn modulo(a: &Value, b: &Value) -> Value {
    a.transform(b, add, |x, y| x % y)
}

/// Builds the inclusive integer sequence from `a` to `b`.
///
/// Only the first element of each operand is used, truncated toward zero.
/// The sequence descends when `b < a`. An empty operand gives an empty
/// value, and so does a range longer than
/// [`MAX_RANGE_LEN`](crate::util::num::MAX_RANGE_LEN) elements.
///
/// # Example
/// ```
/// use vexl::{Value, interpreter::evaluator::binary::arithmetic::range};
///
/// assert_eq!(range(&Value::scalar(1.0), &Value::scalar(3.0)),
///            Value::from([1.0, 2.0, 3.0]));
/// assert_eq!(range(&Value::scalar(2.0), &Value::scalar(0.0)),
///            Value::from([2.0, 1.0, 0.0]));
/// assert!(range(&Value::empty(), &Value::scalar(3.0)).is_empty());
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn range(a: &Value, b: &Value) -> Value {
    let (Some(start), Some(end)) = (a.first(), b.first()) else {
        return Value::empty();
    };
    if !start.is_finite() || !end.is_finite() {
        return Value::empty();
    }

    let (start, end) = (start.trunc() as i64, end.trunc() as i64);
    let bounds = (i64_to_f64_checked(start, ()), i64_to_f64_checked(end, ()));
    if bounds.0.is_err() || bounds.1.is_err() || end.abs_diff(start) >= MAX_RANGE_LEN {
        return Value::empty();
    }

    if start <= end {
        (start..=end).filter_map(|i| i64_to_f64_checked(i, ()).ok())
                     .collect()
    } else {
        (end..=start).rev()
                     .filter_map(|i| i64_to_f64_checked(i, ()).ok())
                     .collect()
    }
}
