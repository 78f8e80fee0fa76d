use std::{collections::HashMap, fmt, sync::LazyLock};

use crate::{
    error::{LookupError, RuntimeError},
    interpreter::{
        evaluator::{
            binary::{arithmetic, comparison, logic, power},
            core::EvalResult,
            function::{builtin, min_max},
            unary,
        },
        lexer::Operator,
        value::core::Value,
    },
};

/// A function taking one operand.
pub type UnaryFn = fn(&Value) -> Value;
/// A function taking two operands.
pub type BinaryFn = fn(&Value, &Value) -> Value;
/// A function taking three operands.
pub type TernaryFn = fn(&Value, &Value, &Value) -> Value;
/// A function taking any number of operands as one slice.
pub type VariadicFn = fn(&[Value]) -> Value;

/// A callable registry entry.
///
/// The variant fixes the arity, so a `Function` can never be registered under
/// an arity it does not accept.
#[derive(Clone, Copy)]
pub enum Function {
    /// Takes exactly one operand.
    Unary(UnaryFn),
    /// Takes exactly two operands.
    Binary(BinaryFn),
    /// Takes exactly three operands.
    Ternary(TernaryFn),
    /// Takes the whole operand list.
    Variadic(VariadicFn),
}

/// The number of operands a function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many operands.
    Exact(usize),
    /// Any number of operands.
    Variadic,
}

impl Arity {
    /// Tests whether the given operand count satisfies this arity.
    #[must_use]
    pub const fn check(self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == m,
            Self::Variadic => true,
        }
    }
}

impl Function {
    /// The arity implied by the variant.
    #[must_use]
    pub const fn arity(&self) -> Arity {
        match self {
            Self::Unary(_) => Arity::Exact(1),
            Self::Binary(_) => Arity::Exact(2),
            Self::Ternary(_) => Arity::Exact(3),
            Self::Variadic(_) => Arity::Variadic,
        }
    }

    /// Calls the function with `args`.
    ///
    /// # Errors
    /// Returns `ArgumentCountMismatch` if `args` does not fit the arity.
    ///
    /// # Example
    /// ```
    /// use vexl::{Registry, Value};
    ///
    /// let pow = Registry::builtin().lookup_function("pow", 2).unwrap();
    /// let r = pow.call(&[Value::scalar(2.0), Value::scalar(10.0)]).unwrap();
    /// assert_eq!(r, Value::scalar(1024.0));
    /// ```
    pub fn call(&self, args: &[Value]) -> EvalResult<Value> {
        match (self, args) {
            (Self::Unary(f), [a]) => Ok(f(a)),
            (Self::Binary(f), [a, b]) => Ok(f(a, b)),
            (Self::Ternary(f), [a, b, c]) => Ok(f(a, b, c)),
            (Self::Variadic(f), args) => Ok(f(args)),
            (function, args) => {
                let expected = match function.arity() {
                    Arity::Exact(n) => n,
                    Arity::Variadic => args.len(),
                };
                Err(RuntimeError::ArgumentCountMismatch { expected,
                                                          found: args.len() })
            },
        }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.arity() {
            Arity::Exact(n) => write!(f, "Function/{n}"),
            Arity::Variadic => write!(f, "Function/*"),
        }
    }
}

/// Defines the builtin catalog by generating a static table.
///
/// Each entry maps a lowercase name to a [`Function`]. A name may appear more
/// than once with different arities.
macro_rules! builtin_functions {
    (
        $(
            $name:literal => $func:expr
        ),* $(,)?
    ) => {
        static BUILTIN_TABLE: &[(&str, Function)] = &[
            $(
                ($name, $func),
            )*
        ];
    };
}

builtin_functions! {
    "plus"           => Function::Binary(arithmetic::plus),
    "minus"          => Function::Binary(arithmetic::minus),
    "multiply"       => Function::Binary(arithmetic::multiply),
    "divide"         => Function::Binary(arithmetic::divide),
    "modulo"         => Function::Binary(arithmetic::modulo),
    "range"          => Function::Binary(arithmetic::range),
    "pow"            => Function::Binary(power::pow),
    "atan2"          => Function::Binary(power::atan2),
    "equal"          => Function::Binary(comparison::equal),
    "greater"        => Function::Binary(comparison::greater),
    "less"           => Function::Binary(comparison::less),
    "greaterorequal" => Function::Binary(comparison::greater_or_equal),
    "lessorequal"    => Function::Binary(comparison::less_or_equal),
    "and"            => Function::Binary(logic::and),
    "or"             => Function::Binary(logic::or),
    "ternary"        => Function::Ternary(logic::ternary),
    "negate"         => Function::Unary(unary::negate),
    "complement"     => Function::Unary(unary::complement),
    "unaryplus"      => Function::Unary(unary::unary_plus),
    "unaryminus"     => Function::Unary(unary::unary_minus),
    "sqrt"           => Function::Unary(builtin::sqrt),
    "exp"            => Function::Unary(builtin::exp),
    "ln"             => Function::Unary(builtin::ln),
    "log10"          => Function::Unary(builtin::log10),
    "sin"            => Function::Unary(builtin::sin),
    "cos"            => Function::Unary(builtin::cos),
    "tan"            => Function::Unary(builtin::tan),
    "asin"           => Function::Unary(builtin::asin),
    "acos"           => Function::Unary(builtin::acos),
    "atan"           => Function::Unary(builtin::atan),
    "sinh"           => Function::Unary(builtin::sinh),
    "cosh"           => Function::Unary(builtin::cosh),
    "tanh"           => Function::Unary(builtin::tanh),
    "abs"            => Function::Unary(builtin::abs),
    "round"          => Function::Unary(builtin::round),
    "ceil"           => Function::Unary(builtin::ceil),
    "floor"          => Function::Unary(builtin::floor),
    "sign"           => Function::Unary(builtin::sign),
    "min"            => Function::Variadic(min_max::min),
    "max"            => Function::Variadic(min_max::max),
    "sum"            => Function::Variadic(min_max::sum),
    "product"        => Function::Variadic(min_max::product),
}

static BUILTIN: LazyLock<Registry> = LazyLock::new(Registry::with_builtins);

/// A catalog of named functions, keyed by name and arity.
///
/// Names are matched case-insensitively. A name may carry several entries of
/// different fixed arities plus at most one variadic entry, which serves as
/// the fallback when no fixed arity matches.
///
/// ## Usage
///
/// Most callers use the shared [`Registry::builtin`] catalog implicitly
/// through [`Expression::parse`](crate::Expression::parse). To expose extra
/// functions, start from [`Registry::with_builtins`], [`register`] them, and
/// parse with [`Expression::parse_with`](crate::Expression::parse_with).
///
/// [`register`]: Registry::register
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: HashMap<String, Vec<Function>>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the builtin catalog.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (name, function) in BUILTIN_TABLE {
            registry.register(name, *function);
        }
        registry
    }

    /// The shared builtin catalog, built once per process.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Registers `function` under `name`.
    ///
    /// An existing entry of the same name and arity is replaced.
    ///
    /// # Example
    /// ```
    /// use vexl::{Expression, Function, Registry, Value};
    ///
    /// fn double(v: &Value) -> Value {
    ///     v.map(|x| 2.0 * x)
    /// }
    ///
    /// let mut registry = Registry::with_builtins();
    /// registry.register("double", Function::Unary(double));
    ///
    /// let expr = Expression::parse_with("double(21)", &registry).unwrap();
    /// assert_eq!(expr.evaluate(&[]).unwrap(), Value::scalar(42.0));
    /// ```
    pub fn register(&mut self, name: &str, function: Function) -> &mut Self {
        let entries = self.entries.entry(name.to_lowercase()).or_default();
        entries.retain(|existing| existing.arity() != function.arity());
        entries.push(function);
        self
    }

    /// Whether any function is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_lowercase())
    }

    /// Iterates over the registered names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Resolves a function by name for `arity` operands.
    ///
    /// An entry of exactly that arity wins; otherwise a variadic entry of the
    /// same name is used.
    ///
    /// # Errors
    /// - `UnknownFunction` if nothing is registered under `name`.
    /// - `ArityMismatch` if entries exist but none accepts `arity` operands.
    ///
    /// # Example
    /// ```
    /// use vexl::{LookupError, Registry};
    ///
    /// let registry = Registry::builtin();
    ///
    /// assert!(registry.lookup_function("MIN", 3).is_ok());
    /// assert!(matches!(registry.lookup_function("sin", 2),
    ///                  Err(LookupError::ArityMismatch { .. })));
    /// assert!(matches!(registry.lookup_function("nope", 1),
    ///                  Err(LookupError::UnknownFunction { .. })));
    /// ```
    pub fn lookup_function(&self, name: &str, arity: usize) -> Result<Function, LookupError> {
        let Some(entries) = self.entries.get(&name.to_lowercase()) else {
            return Err(LookupError::UnknownFunction { name: name.to_string(),
                                                      arity });
        };

        if let Some(exact) = entries.iter()
                                    .find(|f| f.arity() == Arity::Exact(arity))
        {
            return Ok(*exact);
        }

        if let Some(variadic) = entries.iter().find(|f| f.arity() == Arity::Variadic) {
            return Ok(*variadic);
        }

        let mut accepted = entries.iter()
                                  .filter_map(|f| match f.arity() {
                                      Arity::Exact(n) => Some(n),
                                      Arity::Variadic => None,
                                  })
                                  .collect::<Vec<_>>();
        accepted.sort_unstable();

        Err(LookupError::ArityMismatch { name: name.to_string(),
                                         arity,
                                         accepted })
    }

    /// Resolves the function behind an operator symbol for `arity` operands.
    ///
    /// # Errors
    /// Returns `UnknownFunction` for delimiters that name no function, and
    /// otherwise whatever [`Registry::lookup_function`] returns.
    pub fn lookup_operator(&self, op: Operator, arity: usize) -> Result<Function, LookupError> {
        op.function_name()
          .ok_or_else(|| LookupError::UnknownFunction { name: op.symbol().to_string(),
                                                        arity })
          .and_then(|name| self.lookup_function(name, arity))
    }
}
