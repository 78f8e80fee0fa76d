/// Elementwise mathematical builtins.
///
/// Contains the single-operand functions available by default, such as
/// `sqrt`, `sin` or `round`.
pub mod builtin;
/// Variadic folding builtins: `min`, `max`, `sum` and `product`.
///
/// These accept any number of operands and fold over all of their elements.
pub mod min_max;

/// The function registry.
///
/// Holds the builtin catalog and resolves names and operator symbols to
/// functions by arity.
pub mod core;
