use std::fmt;

/// Reducer used by relational, equality and logical operators.
///
/// Folds per-pair results with boolean AND, so a vector compared against
/// another vector is true at `i` only if `a[i]` compares true against every
/// element of the other operand.
pub const fn boolean_and(a: f64, b: f64) -> f64 {
    if a != 0.0 && b != 0.0 { 1.0 } else { 0.0 }
}

/// Default reducer of the broadcasting fold.
pub const fn add(a: f64, b: f64) -> f64 {
    a + b
}

/// Maps a boolean to the engine's numeric truth values `1` and `0`.
pub const fn from_bool(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

/// The engine's sole runtime datum: an ordered vector of `f64`.
///
/// A `Value` of size one is a scalar and a `Value` of size zero is empty.
/// Values never change after construction; every operation builds a new one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Value {
    elements: Vec<f64>,
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::scalar(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::scalar(from_bool(v))
    }
}

impl From<Vec<f64>> for Value {
    fn from(elements: Vec<f64>) -> Self {
        Self { elements }
    }
}

impl From<&[f64]> for Value {
    fn from(elements: &[f64]) -> Self {
        Self { elements: elements.to_vec() }
    }
}

impl<const N: usize> From<[f64; N]> for Value {
    fn from(elements: [f64; N]) -> Self {
        Self { elements: elements.to_vec() }
    }
}

impl FromIterator<f64> for Value {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Self {
        Self { elements: iter.into_iter().collect() }
    }
}

impl Value {
    /// Creates a scalar value.
    ///
    /// # Example
    /// ```
    /// use vexl::Value;
    ///
    /// let v = Value::scalar(2.5);
    /// assert!(v.is_scalar());
    /// assert_eq!(v.as_slice(), &[2.5]);
    /// ```
    #[must_use]
    pub fn scalar(v: f64) -> Self {
        Self { elements: vec![v] }
    }

    /// Creates an empty value.
    #[must_use]
    pub const fn empty() -> Self {
        Self { elements: Vec::new() }
    }

    /// Number of elements.
    #[must_use]
    pub fn size(&self) -> usize {
        self.elements.len()
    }

    /// `true` for a value of exactly one element.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        self.elements.len() == 1
    }

    /// `true` for a value of zero elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.elements
    }

    /// Element `i`, if present.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<f64> {
        self.elements.get(i).copied()
    }

    /// The first element, if any. For a scalar this is its value.
    #[must_use]
    pub fn first(&self) -> Option<f64> {
        self.elements.first().copied()
    }

    /// Iterates over the elements.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.elements.iter().copied()
    }

    /// Consumes the value and returns its elements.
    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.elements
    }

    /// Applies `f` to every element.
    ///
    /// # Example
    /// ```
    /// use vexl::Value;
    ///
    /// let v = Value::from([1.0, -2.0]).map(f64::abs);
    /// assert_eq!(v, Value::from([1.0, 2.0]));
    /// ```
    #[must_use]
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        self.iter().map(f).collect()
    }

    /// The broadcasting fold.
    ///
    /// The result has one element per element of `self`. Element `i` is
    /// `combine(self[i], other[0])`, folded with `reduce` over
    /// `combine(self[i], other[j])` for every further `j`. An empty `other`
    /// yields zeros.
    ///
    /// This is not a zip: `[1, 2, 3]` plus `[10, 20]` gives
    /// `[1+10 + 1+20, ...]`.
    ///
    /// # Parameters
    /// - `other`: The operand folded over for each element of `self`.
    /// - `reduce`: Combines per-pair results; see [`add`] and
    ///   [`boolean_and`].
    /// - `combine`: The elementwise operation.
    ///
    /// # Example
    /// ```
    /// use vexl::{Value, interpreter::value::core::add};
    ///
    /// let a = Value::from([1.0, 2.0, 3.0]);
    /// let b = Value::from([10.0, 20.0]);
    ///
    /// let r = a.transform(&b, add, |x, y| x + y);
    /// assert_eq!(r, Value::from([32.0, 34.0, 36.0]));
    /// ```
    #[must_use]
    pub fn transform(&self,
                     other: &Self,
                     reduce: impl Fn(f64, f64) -> f64,
                     combine: impl Fn(f64, f64) -> f64)
                     -> Self {
        self.iter()
            .map(|x| {
                other.iter()
                     .map(|y| combine(x, y))
                     .reduce(&reduce)
                     .unwrap_or(0.0)
            })
            .collect()
    }

    /// The broadcasting fold for commutative operations.
    ///
    /// Same as [`Value::transform`], except that the longer operand drives
    /// the result, so the result size is the larger of the two sizes.
    #[must_use]
    pub fn broadcast(&self,
                     other: &Self,
                     reduce: impl Fn(f64, f64) -> f64,
                     combine: impl Fn(f64, f64) -> f64)
                     -> Self {
        if self.size() >= other.size() {
            self.transform(other, reduce, combine)
        } else {
            other.transform(self, reduce, combine)
        }
    }

    /// Folds all elements with [`boolean_and`] into a single flag.
    ///
    /// A scalar is truthy when non-zero, a vector when all its elements are.
    /// An empty value is falsy.
    ///
    /// # Example
    /// ```
    /// use vexl::Value;
    ///
    /// assert!(Value::from([1.0, 2.0]).is_truthy());
    /// assert!(!Value::from([1.0, 0.0]).is_truthy());
    /// assert!(!Value::empty().is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        self.iter().reduce(boolean_and).is_some_and(|flag| flag != 0.0)
    }

    /// Concatenates the elements of several values.
    #[must_use]
    pub fn concat(values: &[Self]) -> Self {
        values.iter().flat_map(Self::iter).collect()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let [single] = self.elements.as_slice() {
            return write!(f, "{single}");
        }

        write!(f, "[")?;
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{element}")?;
        }
        write!(f, "]")
    }
}
