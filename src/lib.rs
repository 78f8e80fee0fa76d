//! # vexl
//!
//! vexl compiles small infix math expressions over vectors of numbers into
//! postfix programs and evaluates them against layered, caller-supplied
//! variable contexts.
//!
//! Every value is a vector of `f64`; a scalar is a vector of length one.
//! Expressions may reference dotted variable paths (`joint.length`),
//! call built-in or registered functions, index and slice vectors, and refer
//! to other expressions bound in the context.
//!
//! ```
//! use vexl::{Context, Expression, Value};
//!
//! let expr = Expression::parse("sum(v * 2) + offset").unwrap();
//! let context = Context::new().with("v", [1.0, 2.0, 3.0]).with("offset", 0.5);
//!
//! assert_eq!(expr.evaluate(&[&context]).unwrap(), Value::scalar(12.5));
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Variable contexts and their merged view.
///
/// A [`Context`] is one layer of name bindings. Evaluation merges the
/// built-in constants and any number of caller layers into a [`Scope`],
/// later layers overriding earlier ones. Bindings may be plain numbers,
/// vectors, text, items with members, or other expressions.
pub mod context;
/// Provides unified error types for parsing and evaluation.
///
/// Parsing fails with a [`ParseError`], which carries the unconsumed input at
/// the point of failure; binding a function fails with a [`LookupError`];
/// running a program fails with a [`RuntimeError`].
pub mod error;
/// The compiled expression type and its evaluation entry points.
pub mod expression;
/// The postfix instruction set that expressions compile to.
pub mod instruction;
/// Orchestrates lexing, parsing, evaluation and value representation.
///
/// # Responsibilities
/// - Tokenizes source text and compiles it straight into instructions.
/// - Provides the vector value type and its broadcasting rules.
/// - Provides the function registry and the stack machine that runs
///   programs.
pub mod interpreter;
/// General utilities for safe numeric conversion and index handling.
pub mod util;

pub use crate::{
    context::{Binding, Context, ContextItem, EPSILON, Members, Scope},
    error::{LookupError, ParseError, RuntimeError},
    expression::Expression,
    instruction::Instruction,
    interpreter::{
        evaluator::{
            core::{ConversionFallback, DEFAULT_MAX_DEPTH, EvalOptions},
            function::core::{Arity, Function, Registry},
        },
        value::core::Value,
    },
};

/// Compiles and evaluates `source` against `layers` in one step.
///
/// Prefer [`Expression::parse`] plus [`Expression::evaluate`] when the same
/// expression is evaluated more than once.
///
/// # Errors
/// Returns the [`ParseError`] or [`RuntimeError`] that stopped evaluation.
///
/// # Examples
/// ```
/// use vexl::{Context, Value, evaluate};
///
/// let context = Context::new().with("x", 4.0);
///
/// assert_eq!(evaluate("sqrt(x) + 1", &[&context]).unwrap(), Value::scalar(3.0));
/// assert!(evaluate("sqrt(x", &[&context]).is_err());
/// ```
pub fn evaluate(source: &str, layers: &[&Context]) -> Result<Value, Box<dyn std::error::Error>> {
    let expression = Expression::parse(source)?;
    Ok(expression.evaluate(layers)?)
}
