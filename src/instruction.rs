use std::fmt;

use crate::interpreter::{evaluator::function::core::Function, value::core::Value};

/// One step of a compiled expression.
///
/// A program is a flat `Vec<Instruction>` in postfix order: operands are
/// pushed before the instruction that consumes them. The parser emits it
/// directly, there is no syntax tree in between.
///
/// # Example
/// ```
/// use vexl::{Expression, Instruction, Value};
///
/// let expr = Expression::parse("1 + x").unwrap();
/// let program = expr.instructions();
///
/// assert_eq!(program[0], Instruction::Value(Value::scalar(1.0)));
/// assert_eq!(program[1], Instruction::Identifier(vec!["x".to_string()]));
/// assert!(matches!(&program[2], Instruction::Call { name, arity: 2, .. } if name == "+"));
/// ```
#[derive(Debug, Clone)]
pub enum Instruction {
    /// Pushes a constant.
    Value(Value),
    /// Resolves a dotted path against the context and pushes the result.
    Identifier(Vec<String>),
    /// Pops `arity` operands, calls `function`, pushes the result.
    Call {
        /// The operator symbol or function name as written.
        name:     String,
        /// The resolved function.
        function: Function,
        /// The number of operands to pop.
        arity:    usize,
    },
    /// Pops `n` values and pushes their concatenation.
    Vector(usize),
    /// Pops `n` index values and the indexed value, pushes the selection.
    Index(usize),
    /// Pops an end index, a start index and the indexed value, pushes the
    /// inclusive slice between them.
    IndexRange,
}

impl Instruction {
    /// The number of stack values this instruction pops.
    ///
    /// # Example
    /// ```
    /// use vexl::{Expression, Instruction};
    ///
    /// let expr = Expression::parse("v[1..2] + [a, b]").unwrap();
    /// let pops = expr.instructions().iter().map(Instruction::pops).collect::<Vec<_>>();
    ///
    /// assert_eq!(pops, [0, 0, 0, 3, 0, 0, 2, 2]);
    /// ```
    #[must_use]
    pub const fn pops(&self) -> usize {
        match self {
            Self::Value(_) | Self::Identifier(_) => 0,
            Self::Call { arity, .. } => *arity,
            Self::Vector(n) => *n,
            Self::Index(n) => *n + 1,
            Self::IndexRange => 3,
        }
    }
}

impl PartialEq for Instruction {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => a == b,
            (Self::Identifier(a), Self::Identifier(b)) => a == b,
            (Self::Call { name: a,
                          arity: n,
                          function: f, },
             Self::Call { name: b,
                          arity: m,
                          function: g, }) => a == b && n == m && f.arity() == g.arity(),
            (Self::Vector(a), Self::Vector(b)) | (Self::Index(a), Self::Index(b)) => a == b,
            (Self::IndexRange, Self::IndexRange) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "push {v}"),
            Self::Identifier(path) => write!(f, "load {}", path.join(".")),
            Self::Call { name, arity, .. } => write!(f, "call {name}/{arity}"),
            Self::Vector(n) => write!(f, "vector {n}"),
            Self::Index(n) => write!(f, "index {n}"),
            Self::IndexRange => write!(f, "index-range"),
        }
    }
}
