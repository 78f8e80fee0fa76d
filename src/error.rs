/// Parsing errors.
///
/// Defines all error types that can occur while tokenizing and compiling an
/// expression: unexpected tokens, unmatched delimiters, malformed numbers and
/// failed function lookups. Every variant carries the source text that was
/// left when the failure happened.
pub mod parse_error;
/// Registry lookup errors.
///
/// Raised when a function or operator cannot be bound for the requested
/// number of operands. These surface wrapped in a [`ParseError`].
pub mod lookup_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while a compiled expression is
/// evaluated, such as failed value conversions, unresolved identifiers in
/// strict mode, reference cycles and out of range indices.
pub mod runtime_error;

pub use lookup_error::LookupError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
