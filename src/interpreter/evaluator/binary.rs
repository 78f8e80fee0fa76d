/// Arithmetic operators: `+ - * / %` and the `..` range constructor.
pub mod arithmetic;
/// Relational and equality operators.
///
/// These fold with boolean AND, so a vector comparison is true at `i` only if
/// the left element compares true against every right element.
pub mod comparison;
/// Logical operators `&&` and `||`, and the ternary selection.
pub mod logic;
/// Two-operand numeric functions: `pow` and `atan2`.
pub mod power;
