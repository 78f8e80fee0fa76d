#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents a failure to bind a name to a registered function.
pub enum LookupError {
    /// No function with this name is registered.
    UnknownFunction {
        /// The requested name.
        name:  String,
        /// The number of operands supplied.
        arity: usize,
    },
    /// Functions with this name exist, but none accepts the operand count and
    /// there is no variadic fallback.
    ArityMismatch {
        /// The requested name.
        name:     String,
        /// The number of operands supplied.
        arity:    usize,
        /// The fixed arities that are registered under this name.
        accepted: Vec<usize>,
    },
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownFunction { name, arity } => {
                write!(f, "Unknown function `{name}' for {arity} argument(s)")
            },
            Self::ArityMismatch { name,
                                  arity,
                                  accepted, } => {
                let accepted = accepted.iter()
                                       .map(ToString::to_string)
                                       .collect::<Vec<_>>()
                                       .join(" or ");
                write!(f,
                       "Function `{name}' takes {accepted} argument(s), but {arity} were supplied")
            },
        }
    }
}

impl std::error::Error for LookupError {}
