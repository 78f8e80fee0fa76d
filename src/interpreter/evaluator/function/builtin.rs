use crate::interpreter::value::core::Value;

/// Generates a builtin that applies an `f64` method to every element.
///
/// # Example
/// ```
/// use vexl::{Value, interpreter::evaluator::function::builtin::sqrt};
///
/// let r = sqrt(&Value::from([4.0, 9.0]));
/// assert_eq!(r, Value::from([2.0, 3.0]));
/// ```
macro_rules! elementwise_builtin {
    ($($fname:ident => $real_fn:path),* $(,)?) => {
        $(
            #[doc = concat!("Applies `", stringify!($real_fn), "` to every element.")]
            #[must_use]
            pub fn $fname(v: &Value) -> Value {
                v.map($real_fn)
            }
        )*
    };
}

elementwise_builtin! {
    sqrt  => f64::sqrt,
    exp   => f64::exp,
    ln    => f64::ln,
    log10 => f64::log10,
    sin   => f64::sin,
    cos   => f64::cos,
    tan   => f64::tan,
    asin  => f64::asin,
    acos  => f64::acos,
    atan  => f64::atan,
    sinh  => f64::sinh,
    cosh  => f64::cosh,
    tanh  => f64::tanh,
    abs   => f64::abs,
    ceil  => f64::ceil,
    floor => f64::floor,
}

/// Rounds every element to the nearest integer, ties to even.
///
/// # Example
/// ```
/// use vexl::{Value, interpreter::evaluator::function::builtin::round};
///
/// let r = round(&Value::from([0.5, 1.5, 2.4, -2.5]));
/// assert_eq!(r, Value::from([0.0, 2.0, 2.0, -2.0]));
/// ```
#[must_use]
pub fn round(v: &Value) -> Value {
    v.map(f64::round_ties_even)
}

/// Returns the sign of every element as `-1`, `0` or `1`.
///
/// Unlike [`f64::signum`], zero maps to `0`.
///
/// # Example
/// ```
/// use vexl::{Value, interpreter::evaluator::function::builtin::sign};
///
/// let s = sign(&Value::from([-42.0, 0.0, 3.0]));
/// assert_eq!(s, Value::from([-1.0, 0.0, 1.0]));
/// ```
#[must_use]
pub fn sign(v: &Value) -> Value {
    v.map(|x| {
         if x > 0.0 {
             1.0
         } else if x < 0.0 {
             -1.0
         } else {
             0.0
         }
     })
}
