use std::{
    collections::{BTreeSet, HashMap, HashSet, hash_map},
    fmt,
    sync::{Arc, LazyLock},
};

use crate::{expression::Expression, instruction::Instruction, interpreter::value::core::Value};

/// Tolerance used when comparing derived floating-point quantities.
pub const EPSILON: f64 = 1e-10;

/// A bound value that exposes both a scalar reading and named members.
///
/// Implement this for any type that should appear in expressions as a
/// variable with children, so that `joint` evaluates to the item's value and
/// `joint.length` descends into its members. The engine never looks further
/// into the type than these two methods.
///
/// # Example
/// ```
/// use vexl::{Context, ContextItem, Expression, Value};
///
/// struct Joint {
///     members: Context,
/// }
///
/// impl ContextItem for Joint {
///     fn value(&self) -> Value {
///         Value::scalar(1.0)
///     }
///
///     fn members(&self) -> Option<&Context> {
///         Some(&self.members)
///     }
/// }
///
/// let joint = Joint { members: Context::new().with("length", 0.5) };
/// let context = Context::new().with_item("joint", joint);
///
/// let expr = Expression::parse("joint + joint.length").unwrap();
/// assert_eq!(expr.evaluate(&[&context]).unwrap(), Value::scalar(1.5));
/// ```
pub trait ContextItem: Send + Sync {
    /// The value pushed when the item itself is referenced.
    fn value(&self) -> Value;

    /// The members reachable by dotted descent, if the item has any.
    fn members(&self) -> Option<&Context>;
}

/// What a name in a [`Context`] is bound to.
#[derive(Clone)]
pub enum Binding {
    /// A plain number.
    Number(f64),
    /// A boolean, read as `1` or `0`.
    Bool(bool),
    /// A vector value.
    Value(Value),
    /// Text, parsed as a number when the name is evaluated.
    Text(String),
    /// A value with members.
    Item(Arc<dyn ContextItem>),
    /// Another expression, evaluated against the same context on use.
    Expression(Arc<Expression>),
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Text(t) => f.debug_tuple("Text").field(t).finish(),
            Self::Item(item) => f.debug_tuple("Item").field(&item.value()).finish(),
            Self::Expression(e) => f.debug_tuple("Expression").field(&e.text()).finish(),
        }
    }
}

impl From<f64> for Binding {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for Binding {
    fn from(v: i32) -> Self {
        Self::Number(v.into())
    }
}

impl From<bool> for Binding {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Value> for Binding {
    fn from(v: Value) -> Self {
        Self::Value(v)
    }
}

impl From<Vec<f64>> for Binding {
    fn from(v: Vec<f64>) -> Self {
        Self::Value(v.into())
    }
}

impl<const N: usize> From<[f64; N]> for Binding {
    fn from(v: [f64; N]) -> Self {
        Self::Value(v.into())
    }
}

impl From<&str> for Binding {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Binding {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Expression> for Binding {
    fn from(v: Expression) -> Self {
        Self::Expression(Arc::new(v))
    }
}

impl From<Arc<Expression>> for Binding {
    fn from(v: Arc<Expression>) -> Self {
        Self::Expression(v)
    }
}

impl From<Members> for Binding {
    fn from(v: Members) -> Self {
        Self::Item(Arc::new(v))
    }
}

static CONSTANTS: LazyLock<Context> = LazyLock::new(|| {
    Context::new().with("pi", std::f64::consts::PI)
                  .with("PI", std::f64::consts::PI)
                  .with("e", std::f64::consts::E)
                  .with("E", std::f64::consts::E)
});

/// One layer of name bindings.
///
/// Evaluation takes a slice of layers; see [`Scope`] for how they merge.
///
/// # Example
/// ```
/// use vexl::{Context, Expression, Value};
///
/// let context = Context::new().with("x", 2.0).with("v", [1.0, 2.0]);
///
/// let expr = Expression::parse("x * v").unwrap();
/// assert_eq!(expr.evaluate(&[&context]).unwrap(), Value::from([2.0, 4.0]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    entries: HashMap<String, Binding>,
}

impl Context {
    /// Creates an empty layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide layer of built-in constants (`pi`, `PI`, `e`, `E`).
    #[must_use]
    pub fn constants() -> &'static Self {
        &CONSTANTS
    }

    /// Adds a binding, returning the layer for chaining.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Binding>) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds a [`ContextItem`] binding, returning the layer for chaining.
    #[must_use]
    pub fn with_item(mut self, name: impl Into<String>, item: impl ContextItem + 'static) -> Self {
        self.insert(name, Binding::Item(Arc::new(item)));
        self
    }

    /// Binds `name`, returning the previous binding if there was one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Binding>) -> Option<Binding> {
        self.entries.insert(name.into(), value.into())
    }

    /// Removes the binding of `name`.
    pub fn remove(&mut self, name: &str) -> Option<Binding> {
        self.entries.remove(name)
    }

    /// The binding of `name` in this layer.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.entries.get(name)
    }

    /// Whether `name` is bound in this layer.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the layer has no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the bindings, in no particular order.
    pub fn iter(&self) -> hash_map::Iter<'_, String, Binding> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Context {
    type IntoIter = hash_map::Iter<'a, String, Binding>;
    type Item = (&'a String, &'a Binding);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<String>, V: Into<Binding>> FromIterator<(K, V)> for Context {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut context = Self::new();
        context.extend(iter);
        context
    }
}

impl<K: Into<String>, V: Into<Binding>> Extend<(K, V)> for Context {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

/// A ready-made [`ContextItem`]: a value plus a layer of members.
///
/// # Example
/// ```
/// use vexl::{Context, Expression, Members, Value};
///
/// let limits = Members::new(Value::scalar(0.0)).with("min", -1.0).with("max", 2.0);
/// let context = Context::new().with("limits", limits);
///
/// let expr = Expression::parse("limits.max - limits.min").unwrap();
/// assert_eq!(expr.evaluate(&[&context]).unwrap(), Value::scalar(3.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Members {
    value:   Value,
    members: Context,
}

impl Members {
    /// Creates an item reading as `value`, with no members yet.
    #[must_use]
    pub fn new(value: impl Into<Value>) -> Self {
        Self { value:   value.into(),
               members: Context::new(), }
    }

    /// Adds a member, returning the item for chaining.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Binding>) -> Self {
        self.members.insert(name, value);
        self
    }
}

impl ContextItem for Members {
    fn value(&self) -> Value {
        self.value.clone()
    }

    fn members(&self) -> Option<&Context> {
        Some(&self.members)
    }
}

/// The merged, read-only view of all layers used for one evaluation.
///
/// The constants layer comes first, then the caller's layers in order; a
/// later layer overrides a root name bound by an earlier one.
///
/// # Example
/// ```
/// use vexl::{Binding, Context, Scope};
///
/// let base = Context::new().with("x", 1.0);
/// let over = Context::new().with("x", 2.0).with("pi", 3.0);
/// let scope = Scope::new(&[&base, &over]);
///
/// assert!(matches!(scope.get("x"), Some(Binding::Number(n)) if *n == 2.0));
/// assert!(matches!(scope.get("pi"), Some(Binding::Number(n)) if *n == 3.0));
/// assert!(matches!(scope.get("e"), Some(Binding::Number(_))));
/// ```
#[derive(Debug, Clone)]
pub struct Scope<'a> {
    entries: HashMap<&'a str, &'a Binding>,
}

impl<'a> Scope<'a> {
    /// Merges the constants layer and `layers`, left to right.
    #[must_use]
    pub fn new(layers: &[&'a Context]) -> Self {
        let entries = std::iter::once(Context::constants())
            .chain(layers.iter().copied())
            .flat_map(Context::iter)
            .map(|(name, binding)| (name.as_str(), binding))
            .collect();

        Self { entries }
    }

    /// The binding of a root name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a Binding> {
        self.entries.get(name).copied()
    }

    /// Resolves a dotted path.
    ///
    /// The first segment is looked up in the merged layers. Every further
    /// segment requires the binding reached so far to be a
    /// [`ContextItem`] with members; the final binding is returned as is.
    #[must_use]
    pub fn resolve(&self, path: &[String]) -> Option<&'a Binding> {
        let (root, rest) = path.split_first()?;
        let mut binding = self.get(root)?;

        for segment in rest {
            let Binding::Item(item) = binding else {
                return None;
            };
            binding = item.members()?.get(segment)?;
        }

        Some(binding)
    }

    /// Root names of all identifiers of `expression` that do not resolve.
    ///
    /// Identifiers bound to other expressions are followed, so names those
    /// expressions are missing are reported too. Each expression is scanned
    /// at most once, which also keeps reference cycles finite.
    #[must_use]
    pub fn unknowns(&self, expression: &Expression) -> BTreeSet<String> {
        let mut unknowns = BTreeSet::new();
        self.collect_unknowns(expression, &mut HashSet::new(), &mut unknowns);
        unknowns
    }

    fn collect_unknowns(&self,
                        expression: &Expression,
                        visited: &mut HashSet<*const Expression>,
                        unknowns: &mut BTreeSet<String>) {
        if !visited.insert(std::ptr::from_ref(expression)) {
            return;
        }

        for instruction in expression.instructions() {
            let Instruction::Identifier(path) = instruction else {
                continue;
            };

            match self.resolve(path) {
                Some(Binding::Expression(other)) => {
                    self.collect_unknowns(other, visited, unknowns);
                },
                Some(_) => {},
                None => {
                    if let Some(root) = path.first() {
                        unknowns.insert(root.clone());
                    }
                },
            }
        }
    }
}
