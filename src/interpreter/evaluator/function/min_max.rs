use crate::interpreter::value::core::Value;

/// Folds every element of every argument with `f`.
///
/// The first element seeds the accumulator. With no elements at all the
/// result is `0`.
fn accumulate(args: &[Value], f: impl Fn(f64, f64) -> f64) -> Value {
    let folded = args.iter().flat_map(Value::iter).reduce(f);
    Value::scalar(folded.unwrap_or(0.0))
}

/// The smallest element across all arguments.
///
/// # Example
/// ```
/// use vexl::{Value, interpreter::evaluator::function::min_max::min};
///
/// let r = min(&[Value::scalar(3.0), Value::from([7.0, -1.0])]);
/// assert_eq!(r, Value::scalar(-1.0));
/// ```
#[must_use]
pub fn min(args: &[Value]) -> Value {
    accumulate(args, f64::min)
}

/// The largest element across all arguments.
#[must_use]
pub fn max(args: &[Value]) -> Value {
    accumulate(args, f64::max)
}

/// The sum of all elements across all arguments.
///
/// # Example
/// ```
/// use vexl::{Value, interpreter::evaluator::function::min_max::sum};
///
/// assert_eq!(sum(&[Value::from([1.0, 2.0]), Value::scalar(3.0)]), Value::scalar(6.0));
/// assert_eq!(sum(&[]), Value::scalar(0.0));
/// ```
#[must_use]
pub fn sum(args: &[Value]) -> Value {
    accumulate(args, |a, b| a + b)
}

/// The product of all elements across all arguments.
#[must_use]
pub fn product(args: &[Value]) -> Value {
    accumulate(args, |a, b| a * b)
}
