/// Numeric conversion helpers.
///
/// This module provides safe functions for converting between integer and
/// floating-point types without risking silent data loss. Indices and range
/// bounds arrive as `f64` elements of a [`Value`](crate::Value) and must be
/// turned into positions before they can address anything.
///
/// All functions return a `Result`, which is `Ok` if the conversion is valid,
/// or an error if the value is out of range or not finite.
pub mod num;
