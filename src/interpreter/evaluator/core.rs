use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::{
    context::{Binding, Scope},
    error::RuntimeError,
    expression::Expression,
    instruction::Instruction,
    interpreter::{evaluator::utils, value::core::Value},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Default limit on how deeply bound expressions may nest.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// What to do with a text binding that does not parse as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversionFallback {
    /// Fail the evaluation with [`RuntimeError::TypeConversion`].
    #[default]
    Error,
    /// Substitute `0` and log a warning.
    Zero,
}

/// Knobs for a single evaluation.
///
/// # Example
/// ```
/// use vexl::{ConversionFallback, EvalOptions};
///
/// let options = EvalOptions::default().strict(true)
///                                     .conversion(ConversionFallback::Zero)
///                                     .max_depth(8);
///
/// assert!(options.strict);
/// assert_eq!(options.conversion, ConversionFallback::Zero);
/// assert_eq!(options.max_depth, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalOptions {
    /// Reject evaluation up front when any identifier is unresolved, instead
    /// of reading it as `0`.
    pub strict:     bool,
    /// Handling of text bindings that are not numbers.
    pub conversion: ConversionFallback,
    /// Maximum nesting of bound expressions.
    pub max_depth:  usize,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self { strict:     false,
               conversion: ConversionFallback::default(),
               max_depth:  DEFAULT_MAX_DEPTH, }
    }
}

impl EvalOptions {
    /// Sets strict mode.
    #[must_use]
    pub const fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets the text conversion fallback.
    #[must_use]
    pub const fn conversion(mut self, conversion: ConversionFallback) -> Self {
        self.conversion = conversion;
        self
    }

    /// Sets the maximum nesting of bound expressions.
    #[must_use]
    pub const fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Runs compiled programs against a [`Scope`].
///
/// One evaluator serves one top-level evaluation. It keeps track of the
/// chain of bound expressions currently being evaluated so that a cycle is
/// reported instead of recursing forever.
pub struct Evaluator<'e, 'a> {
    scope:   &'e Scope<'a>,
    options: &'e EvalOptions,
    active:  Vec<*const Expression>,
}

impl<'e, 'a> Evaluator<'e, 'a> {
    /// Creates an evaluator over `scope`.
    #[must_use]
    pub const fn new(scope: &'e Scope<'a>, options: &'e EvalOptions) -> Self {
        Self { scope,
               options,
               active: Vec::new() }
    }

    /// Evaluates `expression` and returns its single result.
    ///
    /// # Errors
    /// Any [`RuntimeError`] raised by an operation, a bound expression, an
    /// identifier conversion or by a malformed program.
    pub fn run(&mut self, expression: &Expression) -> EvalResult<Value> {
        self.active.push(std::ptr::from_ref(expression));
        let result = self.execute(expression.instructions());
        self.active.pop();
        result
    }

    /// Executes a program on a fresh stack.
    ///
    /// The program must leave exactly one value behind.
    fn execute(&mut self, program: &[Instruction]) -> EvalResult<Value> {
        let mut stack: Vec<Value> = Vec::with_capacity(program.len());

        for instruction in program {
            trace!(%instruction, depth = stack.len(), "dispatch");

            let operands = utils::pop_operands(&mut stack, instruction.pops(), instruction)?;

            let value = match instruction {
                Instruction::Value(value) => value.clone(),
                Instruction::Identifier(path) => self.load(path)?,
                Instruction::Call { function, .. } => function.call(&operands)?,
                Instruction::Vector(_) => Value::concat(&operands),
                Instruction::Index(_) => utils::index(&operands[0], &operands[1..])?,
                Instruction::IndexRange => {
                    utils::index_range(&operands[0], &operands[1], &operands[2])?
                },
            };

            stack.push(value);
        }

        match stack.len() {
            1 => stack.pop().ok_or(RuntimeError::InvalidStackSize { size: 0 }),
            size => Err(RuntimeError::InvalidStackSize { size }),
        }
    }

    /// Reads the value an identifier path refers to.
    fn load(&mut self, path: &[String]) -> EvalResult<Value> {
        let Some(binding) = self.scope.resolve(path) else {
            debug!(identifier = %path.join("."), "unresolved identifier reads as zero");
            return Ok(Value::scalar(0.0));
        };

        match binding {
            Binding::Number(n) => Ok(Value::scalar(*n)),
            Binding::Bool(b) => Ok(Value::from(*b)),
            Binding::Value(v) => Ok(v.clone()),
            Binding::Item(item) => Ok(item.value()),
            Binding::Text(text) => self.convert(path, text),
            Binding::Expression(expression) => self.nested(path, expression),
        }
    }

    /// Evaluates a bound expression against the same scope.
    fn nested(&mut self, path: &[String], expression: &Arc<Expression>) -> EvalResult<Value> {
        if self.active.contains(&Arc::as_ptr(expression)) {
            return Err(RuntimeError::CyclicReference { name: path.join(".") });
        }

        if self.active.len() > self.options.max_depth {
            return Err(RuntimeError::RecursionLimit { limit: self.options.max_depth });
        }

        debug!(identifier = %path.join("."), expression = %expression.text(), "evaluating bound expression");
        self.run(expression)
    }

    /// Parses a text binding as a number.
    fn convert(&self, path: &[String], text: &str) -> EvalResult<Value> {
        match text.trim().parse::<f64>() {
            Ok(n) => Ok(Value::scalar(n)),
            Err(_) if self.options.conversion == ConversionFallback::Zero => {
                warn!(identifier = %path.join("."), value = text, "text binding is not a number, using zero");
                Ok(Value::scalar(0.0))
            },
            Err(_) => Err(RuntimeError::TypeConversion { name:  path.join("."),
                                                         value: text.to_string(), }),
        }
    }
}
