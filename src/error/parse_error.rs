use crate::error::LookupError;

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur during tokenizing or parsing.
///
/// Each variant keeps the `remaining` source text, starting at the token that
/// could not be handled, so callers can point at the offending spot.
pub enum ParseError {
    /// Found a token other than the one the grammar requires here.
    UnexpectedToken {
        /// Description of what was expected, e.g. `` `)' ``.
        expected:  String,
        /// The source text of the token that was found.
        found:     String,
        /// Unconsumed input, starting at `found`.
        remaining: String,
    },
    /// The input ended while the grammar still required something.
    UnexpectedEndOfInput {
        /// Description of what was expected.
        expected: String,
    },
    /// A character that does not start any token.
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// Unconsumed input, starting at `character`.
        remaining: String,
    },
    /// A numeric literal that does not form a valid number, like `1.2.3`.
    MalformedNumber {
        /// The literal as written.
        literal:   String,
        /// Unconsumed input, starting at the literal.
        remaining: String,
    },
    /// Input was left over after a complete expression.
    UnexpectedTrailingTokens {
        /// The first token that was not consumed.
        token:     String,
        /// Unconsumed input, starting at `token`.
        remaining: String,
    },
    /// Groups, vectors, calls or operators nested deeper than the parser
    /// accepts.
    NestingTooDeep {
        /// The maximum nesting depth.
        limit:     usize,
        /// Unconsumed input at the point where the limit was reached.
        remaining: String,
    },
    /// A function or operator could not be bound for its operand count.
    Lookup {
        /// The underlying lookup failure.
        error:     LookupError,
        /// Unconsumed input at the point of the failed lookup.
        remaining: String,
    },
}

impl ParseError {
    /// Returns the unconsumed source text at the point of failure.
    ///
    /// # Example
    /// ```
    /// use vexl::Expression;
    ///
    /// let err = Expression::parse("(1, 2)").unwrap_err();
    /// assert_eq!(err.remaining(), ", 2)");
    /// ```
    #[must_use]
    pub fn remaining(&self) -> &str {
        match self {
            Self::UnexpectedEndOfInput { .. } => "",
            Self::UnexpectedToken { remaining, .. }
            | Self::UnexpectedCharacter { remaining, .. }
            | Self::MalformedNumber { remaining, .. }
            | Self::UnexpectedTrailingTokens { remaining, .. }
            | Self::NestingTooDeep { remaining, .. }
            | Self::Lookup { remaining, .. } => remaining,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { expected,
                                    found,
                                    remaining, } => {
                write!(f, "Expected {expected} but got `{found}' [{remaining}]")
            },
            Self::UnexpectedEndOfInput { expected } => {
                write!(f, "Expected {expected} but got (nothing)")
            },
            Self::UnexpectedCharacter { character, remaining } => {
                write!(f, "Unexpected character `{character}' [{remaining}]")
            },
            Self::MalformedNumber { literal, remaining } => {
                write!(f, "Malformed number `{literal}' [{remaining}]")
            },
            Self::UnexpectedTrailingTokens { token, remaining } => {
                write!(f, "Unexpected `{token}' after expression [{remaining}]")
            },
            Self::NestingTooDeep { limit, remaining } => {
                write!(f, "Expression nested deeper than {limit} levels [{remaining}]")
            },
            Self::Lookup { error, remaining } => write!(f, "{error} [{remaining}]"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lookup { error, .. } => Some(error),
            _ => None,
        }
    }
}
