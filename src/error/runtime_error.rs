#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur while evaluating a compiled
/// expression.
pub enum RuntimeError {
    /// A bound context value could not be converted to a number.
    TypeConversion {
        /// The dotted name the value was bound to.
        name:  String,
        /// The value as it was bound.
        value: String,
    },
    /// Strict evaluation found identifiers that no context layer resolves.
    UnresolvedIdentifiers {
        /// Root names of the unresolved identifiers, sorted.
        names: Vec<String>,
    },
    /// A bound expression refers back to itself, directly or indirectly.
    CyclicReference {
        /// The dotted name through which the cycle was entered.
        name: String,
    },
    /// Bound expressions were nested deeper than the configured limit.
    RecursionLimit {
        /// The configured maximum depth.
        limit: usize,
    },
    /// An index lies outside the indexed value.
    IndexOutOfBounds {
        /// The index as written (negative indices count from the end).
        index: i64,
        /// The size of the indexed value.
        size:  usize,
    },
    /// An index is not a finite number.
    InvalidIndex {
        /// The offending index value.
        value: f64,
    },
    /// A function received a different number of operands than it takes.
    ArgumentCountMismatch {
        /// The number of operands the function takes.
        expected: usize,
        /// The number of operands that were supplied.
        found:    usize,
    },
    /// An instruction needed more operands than the stack held.
    StackUnderflow {
        /// The instruction that was executing.
        instruction: String,
    },
    /// The program did not leave exactly one value on the stack.
    InvalidStackSize {
        /// The number of values left.
        size: usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TypeConversion { name, value } => {
                write!(f, "Failed to convert `{value}' (bound to `{name}') to a number")
            },
            Self::UnresolvedIdentifiers { names } => {
                write!(f, "The variables `{}' are unknown", names.join(", "))
            },
            Self::CyclicReference { name } => {
                write!(f, "Expression bound to `{name}' refers to itself")
            },
            Self::RecursionLimit { limit } => {
                write!(f, "Expressions are nested deeper than the limit of {limit}")
            },
            Self::IndexOutOfBounds { index, size } => {
                write!(f, "Index {index} is out of bounds for a value of size {size}")
            },
            Self::InvalidIndex { value } => write!(f, "Index `{value}' is not a finite number"),
            Self::ArgumentCountMismatch { expected, found } => {
                write!(f, "Number of arguments does not match (got {found}, expected {expected})")
            },
            Self::StackUnderflow { instruction } => {
                write!(f, "Not enough operands on the stack for `{instruction}'")
            },
            Self::InvalidStackSize { size } => write!(f, "Invalid stack size: {size}"),
        }
    }
}

impl std::error::Error for RuntimeError {}
