/// The `Value` type and its broadcasting rules.
///
/// Defines the vector-of-`f64` runtime value, the broadcasting fold used by
/// every binary operation, the reducers it folds with, and truthiness.
pub mod core;
