/// The precedence-climbing driver and the parser state.
///
/// Owns the token stream and the program under construction, and decides
/// for each token whether it starts an operand, continues the expression or
/// ends it.
pub mod core;

/// Operands: literals, identifiers, function calls, groups, vector literals
/// and prefix operators.
pub mod unary;

/// Infix and postfix forms: binary operators, the ternary and indexing.
pub mod binary;

/// Helpers shared by the parsing routines.
pub mod utils;
