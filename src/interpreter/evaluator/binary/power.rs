use crate::interpreter::value::core::{Value, add};

/// Raises `a` to the power `b`, folding over `b` for every element of `a`.
///
/// # Example
/// ```
/// use vexl::{Value, interpreter::evaluator::binary::power::pow};
///
/// assert_eq!(pow(&Value::from([2.0, 3.0]), &Value::scalar(2.0)),
///            Value::from([4.0, 9.0]));
/// ```
#[must_use]
pub fn pow(a: &Value, b: &Value) -> Value {
    a.transform(b, add, f64::powf)
}

/// Four-quadrant arctangent of `a / b`.
#[must_use]
pub fn atan2(a: &Value, b: &Value) -> Value {
    a.transform(b, add, f64::atan2)
}
