use tracing::debug;

use crate::{
    error::{LookupError, ParseError},
    instruction::Instruction,
    interpreter::{
        evaluator::function::core::{Function, Registry},
        lexer::{Lexeme, Operator, Token, Tokenizer},
        value::core::Value,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Maximum nesting of sub-expressions the parser descends into.
pub const MAX_NESTING: usize = 128;

/// Compiles source text into a postfix program.
///
/// Operands are emitted as they are read and every operator is emitted
/// after its operands, so the program can be run left to right on a stack.
/// Functions are bound against the registry while parsing.
///
/// # Example
/// ```
/// use vexl::{Instruction, Registry, Value, interpreter::parser::core::Parser};
///
/// let program = Parser::new("2 * (3 + 4)", Registry::builtin()).compile().unwrap();
///
/// assert_eq!(program[0], Instruction::Value(Value::scalar(2.0)));
/// assert_eq!(program[1], Instruction::Value(Value::scalar(3.0)));
/// assert_eq!(program[2], Instruction::Value(Value::scalar(4.0)));
/// assert!(matches!(&program[3], Instruction::Call { name, .. } if name == "+"));
/// assert!(matches!(&program[4], Instruction::Call { name, .. } if name == "*"));
/// ```
pub struct Parser<'s, 'r> {
    pub(super) tokens:   Tokenizer<'s>,
    pub(super) registry: &'r Registry,
    pub(super) program:  Vec<Instruction>,
    depth:               usize,
}

impl<'s, 'r> Parser<'s, 'r> {
    /// Creates a parser over `source` binding functions from `registry`.
    #[must_use]
    pub fn new(source: &'s str, registry: &'r Registry) -> Self {
        Self { tokens: Tokenizer::new(source),
               registry,
               program: Vec::new(),
               depth: 0 }
    }

    /// Parses the whole source and returns the program.
    ///
    /// Blank input compiles to a program pushing `0`.
    ///
    /// # Errors
    /// Any [`ParseError`]; the whole source must form exactly one
    /// expression.
    pub fn compile(mut self) -> ParseResult<Vec<Instruction>> {
        if self.tokens.text().trim().is_empty() {
            return Ok(vec![Instruction::Value(Value::scalar(0.0))]);
        }

        self.parse_expression(-1, false)?;

        if let Some(lexeme) = self.tokens.peek()?.cloned() {
            return Err(ParseError::UnexpectedTrailingTokens { token:     self.tokens
                                                                             .slice(&lexeme)
                                                                             .to_string(),
                                                              remaining: self.tokens
                                                                             .remaining()
                                                                             .to_string(), });
        }

        debug!(source = self.tokens.text(), instructions = self.program.len(), "compiled");
        Ok(self.program)
    }

    /// Parses operands and operators until an operator binds looser than
    /// `min_priority`, or equally loose when `left_assoc` is set, or until a
    /// closing delimiter or the end of input.
    ///
    /// The delimiter or operator that stops the loop is left unconsumed.
    ///
    /// # Errors
    /// `NestingTooDeep` past [`MAX_NESTING`] levels, `UnexpectedToken` when
    /// an operand follows an operand or a closing delimiter arrives before
    /// any operand, `UnexpectedEndOfInput` when the input ends before any
    /// operand, and anything the operand and operator routines return.
    pub fn parse_expression(&mut self, min_priority: i32, left_assoc: bool) -> ParseResult<()> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::NestingTooDeep { limit:     MAX_NESTING,
                                                    remaining: self.tokens.remaining().to_string(), });
        }

        self.depth += 1;
        let result = self.parse_operands(min_priority, left_assoc);
        self.depth -= 1;
        result
    }

    fn parse_operands(&mut self, min_priority: i32, left_assoc: bool) -> ParseResult<()> {
        let mut operands = 0usize;

        while let Some(lexeme) = self.tokens.peek()?.cloned() {
            match &lexeme.token {
                Token::Number(_) | Token::Identifier(_) if operands > 0 => {
                    return Err(self.unexpected("an operator", &lexeme));
                },
                Token::Number(n) => {
                    self.tokens.next()?;
                    self.program.push(Instruction::Value(Value::scalar(*n)));
                },
                Token::Identifier(path) => {
                    self.tokens.next()?;
                    self.parse_identifier(path.clone())?;
                },
                Token::Operator(op) if op.is_closing() => {
                    if operands == 0 {
                        return Err(self.unexpected("an expression", &lexeme));
                    }
                    return Ok(());
                },
                Token::Operator(op) if operands == 0 => self.parse_prefix(*op, &lexeme)?,
                Token::Operator(op) => {
                    let priority = op.priority();
                    if priority < min_priority || (priority == min_priority && left_assoc) {
                        return Ok(());
                    }
                    self.parse_infix(*op, &lexeme)?;
                },
            }

            operands += 1;
        }

        if operands == 0 {
            return Err(ParseError::UnexpectedEndOfInput { expected: "an expression".to_string() });
        }

        Ok(())
    }

    /// Consumes the operator `op` or fails.
    pub(super) fn expect(&mut self, op: Operator) -> ParseResult<()> {
        let expected = format!("`{}'", op.symbol());

        match self.tokens.peek()?.cloned() {
            Some(lexeme) if lexeme.token == Token::Operator(op) => {
                self.tokens.next()?;
                Ok(())
            },
            Some(lexeme) => Err(self.unexpected(&expected, &lexeme)),
            None => Err(ParseError::UnexpectedEndOfInput { expected }),
        }
    }

    /// Builds an `UnexpectedToken` error at `lexeme`.
    pub(super) fn unexpected(&self, expected: &str, lexeme: &Lexeme) -> ParseError {
        ParseError::UnexpectedToken { expected:  expected.to_string(),
                                      found:     self.tokens.slice(lexeme).to_string(),
                                      remaining: self.tokens.remaining().to_string(), }
    }

    /// Attaches the current position to a registry lookup failure.
    pub(super) fn bind(&self, lookup: Result<Function, LookupError>) -> ParseResult<Function> {
        lookup.map_err(|error| ParseError::Lookup { error,
                                                    remaining: self.tokens.remaining().to_string() })
    }

    /// Appends a call to `name` with `arity` operands.
    pub(super) fn emit_call(&mut self, name: impl Into<String>, function: Function, arity: usize) {
        self.program.push(Instruction::Call { name: name.into(),
                                              function,
                                              arity });
    }
}
