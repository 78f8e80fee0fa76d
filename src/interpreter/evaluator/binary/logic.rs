use crate::interpreter::value::core::{Value, boolean_and, from_bool};

/// Logical AND, folded with boolean AND over `b`.
///
/// # Example
/// ```
/// use vexl::{Value, interpreter::evaluator::binary::logic::and};
///
/// let r = and(&Value::from([1.0, 0.0]), &Value::scalar(2.0));
/// assert_eq!(r, Value::from([1.0, 0.0]));
/// ```
#[must_use]
pub fn and(a: &Value, b: &Value) -> Value {
    a.transform(b, boolean_and, |x, y| from_bool(x != 0.0 && y != 0.0))
}

/// Logical OR, folded with boolean AND over `b`.
#[must_use]
pub fn or(a: &Value, b: &Value) -> Value {
    a.transform(b, boolean_and, |x, y| from_bool(x != 0.0 || y != 0.0))
}

/// Selects `truepart` when `condition` is truthy, otherwise `falsepart`.
///
/// The whole branch value is returned; see [`Value::is_truthy`] for how a
/// vector condition reduces to one flag.
///
/// # Example
/// ```
/// use vexl::{Value, interpreter::evaluator::binary::logic::ternary};
///
/// let yes = Value::scalar(10.0);
/// let no = Value::from([20.0, 30.0]);
///
/// assert_eq!(ternary(&Value::scalar(1.0), &yes, &no), yes);
/// assert_eq!(ternary(&Value::from([1.0, 0.0]), &yes, &no), no);
/// ```
#[must_use]
pub fn ternary(condition: &Value, truepart: &Value, falsepart: &Value) -> Value {
    if condition.is_truthy() {
        truepart.clone()
    } else {
        falsepart.clone()
    }
}
