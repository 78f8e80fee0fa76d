use std::{collections::BTreeSet, fmt, str::FromStr};

use crate::{
    context::{Context, Scope},
    error::RuntimeError,
    instruction::Instruction,
    interpreter::{
        evaluator::{
            core::{EvalOptions, EvalResult, Evaluator},
            function::core::Registry,
        },
        parser::core::{ParseResult, Parser},
        value::core::Value,
    },
};

/// A compiled expression: its source text and the program it compiles to.
///
/// Parsing happens once; the program can then be evaluated any number of
/// times against different contexts. An `Expression` is immutable apart from
/// [`Expression::reparse`], and can be shared freely between threads.
///
/// # Example
/// ```
/// use vexl::{Context, Expression, Value};
///
/// let expr = Expression::parse("x > 2 ? [x, 2 * x] : 0").unwrap();
///
/// let small = Context::new().with("x", 1.0);
/// let large = Context::new().with("x", 3.0);
///
/// assert_eq!(expr.evaluate(&[&small]).unwrap(), Value::scalar(0.0));
/// assert_eq!(expr.evaluate(&[&large]).unwrap(), Value::from([3.0, 6.0]));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    text:         String,
    instructions: Vec<Instruction>,
}

impl Default for Expression {
    fn default() -> Self {
        Self { text:         String::new(),
               instructions: vec![Instruction::Value(Value::scalar(0.0))], }
    }
}

impl Expression {
    /// Compiles `text` against the built-in function registry.
    ///
    /// # Errors
    /// Returns a [`ParseError`](crate::ParseError) when `text` is not a
    /// single well-formed expression or calls a function that does not exist
    /// for the given number of arguments.
    ///
    /// # Example
    /// ```
    /// use vexl::Expression;
    ///
    /// assert!(Expression::parse("sin(pi / 2)").is_ok());
    /// assert!(Expression::parse("sin(1, 2)").is_err());
    /// assert!(Expression::parse("1 +").is_err());
    /// ```
    pub fn parse(text: &str) -> ParseResult<Self> {
        Self::parse_with(text, Registry::builtin())
    }

    /// Compiles `text` against a custom function registry.
    ///
    /// # Errors
    /// Same as [`Expression::parse`].
    pub fn parse_with(text: &str, registry: &Registry) -> ParseResult<Self> {
        let instructions = Parser::new(text, registry).compile()?;

        Ok(Self { text: text.to_string(),
                  instructions })
    }

    /// Replaces this expression by the compilation of `text`.
    ///
    /// On failure the expression is left exactly as it was.
    ///
    /// # Errors
    /// Same as [`Expression::parse`].
    ///
    /// # Example
    /// ```
    /// use vexl::Expression;
    ///
    /// let mut expr = Expression::parse("1 + 1").unwrap();
    ///
    /// assert!(expr.reparse("1 +").is_err());
    /// assert_eq!(expr.text(), "1 + 1");
    ///
    /// expr.reparse("2 * 3").unwrap();
    /// assert_eq!(expr.text(), "2 * 3");
    /// ```
    pub fn reparse(&mut self, text: &str) -> ParseResult<()> {
        self.reparse_with(text, Registry::builtin())
    }

    /// Like [`Expression::reparse`], with a custom function registry.
    ///
    /// # Errors
    /// Same as [`Expression::parse`].
    pub fn reparse_with(&mut self, text: &str, registry: &Registry) -> ParseResult<()> {
        *self = Self::parse_with(text, registry)?;
        Ok(())
    }

    /// The source text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The compiled program.
    #[must_use]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Evaluates against `layers` with default options.
    ///
    /// # Errors
    /// Any [`RuntimeError`] raised while running the program.
    pub fn evaluate(&self, layers: &[&Context]) -> EvalResult<Value> {
        self.evaluate_with(layers, &EvalOptions::default())
    }

    /// Evaluates against `layers`.
    ///
    /// Layers are merged on top of the built-in constants, later layers
    /// overriding earlier ones. Unresolved identifiers read as `0` unless
    /// `options.strict` is set, in which case evaluation is refused before
    /// anything runs.
    ///
    /// # Errors
    /// `RuntimeError::UnresolvedIdentifiers` in strict mode, and any other
    /// [`RuntimeError`] raised while running the program.
    ///
    /// # Example
    /// ```
    /// use vexl::{Context, EvalOptions, Expression, RuntimeError, Value};
    ///
    /// let expr = Expression::parse("a + b").unwrap();
    /// let context = Context::new().with("a", 1.0);
    ///
    /// assert_eq!(expr.evaluate(&[&context]).unwrap(), Value::scalar(1.0));
    ///
    /// let strict = EvalOptions::default().strict(true);
    /// assert_eq!(expr.evaluate_with(&[&context], &strict),
    ///            Err(RuntimeError::UnresolvedIdentifiers { names: vec!["b".to_string()] }));
    /// ```
    #[tracing::instrument(level = "debug", skip_all, fields(expression = %self.text))]
    pub fn evaluate_with(&self, layers: &[&Context], options: &EvalOptions) -> EvalResult<Value> {
        let scope = Scope::new(layers);

        if options.strict {
            let unknowns = scope.unknowns(self);
            if !unknowns.is_empty() {
                return Err(RuntimeError::UnresolvedIdentifiers { names: unknowns.into_iter()
                                                                                 .collect(), });
            }
        }

        Evaluator::new(&scope, options).run(self)
    }

    /// Root names of identifiers that `layers` (plus the constants) do not
    /// resolve, including those of bound expressions, sorted.
    ///
    /// # Example
    /// ```
    /// use vexl::{Context, Expression};
    ///
    /// let expr = Expression::parse("a.b + c * pi + d").unwrap();
    /// let context = Context::new().with("d", 1.0);
    ///
    /// let unknowns = expr.resolve_unknowns(&[&context]);
    /// assert_eq!(unknowns.into_iter().collect::<Vec<_>>(), ["a", "c"]);
    /// ```
    #[must_use]
    pub fn resolve_unknowns(&self, layers: &[&Context]) -> BTreeSet<String> {
        Scope::new(layers).unknowns(self)
    }

    /// Whether every identifier resolves against `layers`.
    #[must_use]
    pub fn validate_variables(&self, layers: &[&Context]) -> bool {
        self.resolve_unknowns(layers).is_empty()
    }
}

impl FromStr for Expression {
    type Err = crate::error::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
