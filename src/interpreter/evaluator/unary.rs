use crate::interpreter::value::core::{Value, from_bool};

/// Logical NOT: `1` for zero elements, `0` otherwise.
///
/// # Example
/// ```
/// use vexl::{Value, interpreter::evaluator::unary::negate};
///
/// assert_eq!(negate(&Value::from([0.0, 3.0])), Value::from([1.0, 0.0]));
/// ```
#[must_use]
pub fn negate(v: &Value) -> Value {
    v.map(|x| from_bool(x == 0.0))
}

/// Prefix `+`: returns the operand unchanged.
#[must_use]
pub fn unary_plus(v: &Value) -> Value {
    v.clone()
}

/// Prefix `-`: negates every element.
#[must_use]
pub fn unary_minus(v: &Value) -> Value {
    v.map(|x| -x)
}

/// Bitwise complement of every element, truncated to an integer first.
///
/// # Example
/// ```
/// use vexl::{Value, interpreter::evaluator::unary::complement};
///
/// assert_eq!(complement(&Value::scalar(0.0)), Value::scalar(-1.0));
/// assert_eq!(complement(&Value::scalar(5.7)), Value::scalar(-6.0));
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn complement(v: &Value) -> Value {
    v.map(|x| !(x as i64) as f64)
}
