/// The evaluator module runs compiled programs and computes results.
///
/// # Responsibilities
/// - Runs instruction sequences on a value stack.
/// - Resolves identifiers against the merged context, including bound
///   expressions with cycle and depth protection.
/// - Implements every operator and built-in function over vector values.
pub mod evaluator;
/// The lexer module tokenizes source text for the parser.
///
/// The lexer reads raw source text and produces numbers, identifier paths and
/// operators on demand, one token of lookahead at a time.
///
/// # Responsibilities
/// - Recognizes decimal literals, dotted and brace-quoted identifiers, and all
///   operator symbols.
/// - Reports unexpected characters and malformed numbers.
pub mod lexer;
/// The parser module compiles tokens into instructions.
///
/// A precedence-climbing parser that emits postfix instructions as it goes and
/// binds every function call against a registry at compile time.
pub mod parser;
/// The value module defines the vector value used throughout evaluation.
///
/// # Responsibilities
/// - Defines [`Value`](value::core::Value), a vector of `f64`.
/// - Implements the fold that combines two vectors of differing lengths.
/// - Defines truthiness and boolean conversion.
pub mod value;
