/// Binary operator semantics.
///
/// Arithmetic, comparison, logic and power operations over [`Value`]s, all
/// built on the vector fold in [`Value::transform`] and
/// [`Value::broadcast`].
///
/// [`Value`]: crate::interpreter::value::core::Value
/// [`Value::transform`]: crate::interpreter::value::core::Value::transform
/// [`Value::broadcast`]: crate::interpreter::value::core::Value::broadcast
pub mod binary;

/// Unary operator semantics.
///
/// Arithmetic negation, logical negation and bitwise complement.
pub mod unary;

/// The stack machine.
///
/// Runs compiled programs, resolves identifiers against the merged context
/// and evaluates bound expressions with cycle and depth protection.
pub mod core;

/// Helpers shared by the stack machine: operand popping and indexing.
pub mod utils;

/// The function registry and the built-in function catalog.
pub mod function;
