use std::ops::Range;

use logos::Logos;

use crate::{error::ParseError, interpreter::parser::core::ParseResult};

/// Whitespace the lexer skips between tokens.
const SKIPPED: [char; 4] = [' ', '\t', '\n', '\r'];

/// Represents a lexical token in the source input.
///
/// A token is a minimal but meaningful unit of text produced by the lexer:
/// a number, an identifier path, or an operator.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(error = LexError)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    /// Numeric literal tokens, such as `3`, `3.14`, `.5` or `2.1e-10`.
    ///
    /// A literal never swallows a following `..`, so `1..3` lexes as a range.
    #[regex(r"[0-9]+(\.[0-9]+)*([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"\.[0-9]+(\.[0-9]+)*([eE][+-]?[0-9]+)?", parse_number)]
    Number(f64),
    /// Identifier tokens, split into their dotted path segments.
    ///
    /// `joint.length` becomes `["joint", "length"]`. A brace-quoted name such
    /// as `{max speed}` forms a single segment and may contain any character
    /// except `}`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*(\.[a-zA-Z0-9_]+)*", parse_path)]
    #[regex(r"\{[^}]*\}", parse_quoted)]
    Identifier(Vec<String>),
    /// Operator and delimiter tokens.
    #[token("**", |_| Operator::Power)]
    #[token("^", |_| Operator::Power)]
    #[token("==", |_| Operator::Equal)]
    #[token(">=", |_| Operator::GreaterOrEqual)]
    #[token("<=", |_| Operator::LessOrEqual)]
    #[token("||", |_| Operator::Or)]
    #[token("&&", |_| Operator::And)]
    #[token("..", |_| Operator::Range)]
    #[token("*", |_| Operator::Multiply)]
    #[token("/", |_| Operator::Divide)]
    #[token("%", |_| Operator::Modulo)]
    #[token("+", |_| Operator::Plus)]
    #[token("-", |_| Operator::Minus)]
    #[token("!", |_| Operator::Negate)]
    #[token("~", |_| Operator::Complement)]
    #[token(">", |_| Operator::Greater)]
    #[token("<", |_| Operator::Less)]
    #[token("?", |_| Operator::TernaryTrue)]
    #[token(":", |_| Operator::TernaryFalse)]
    #[token("(", |_| Operator::GroupStart)]
    #[token(")", |_| Operator::GroupEnd)]
    #[token("[", |_| Operator::VectorStart)]
    #[token("]", |_| Operator::VectorEnd)]
    #[token(",", |_| Operator::Comma)]
    Operator(Operator),
}

/// Errors produced by the raw lexer, before they are given source context.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum LexError {
    /// The input does not start any token.
    #[default]
    UnexpectedCharacter,
    /// A numeric literal that does not parse, like `1.2.3`.
    MalformedNumber,
}

/// Operators and delimiters of the language.
///
/// Every operator carries a fixed priority and associativity, see
/// [`Operator::priority`] and [`Operator::left_assoc`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `%`
    Modulo,
    /// Binary `+`
    Plus,
    /// Binary `-`
    Minus,
    /// `**` or `^`
    Power,
    /// `..`
    Range,
    /// `!`
    Negate,
    /// `>`
    Greater,
    /// `<`
    Less,
    /// `>=`
    GreaterOrEqual,
    /// `<=`
    LessOrEqual,
    /// `==`
    Equal,
    /// `||`
    Or,
    /// `&&`
    And,
    /// `~`
    Complement,
    /// The `?` of a ternary.
    TernaryTrue,
    /// The `:` of a ternary.
    TernaryFalse,
    /// `(`
    GroupStart,
    /// `)`
    GroupEnd,
    /// `[`
    VectorStart,
    /// `]`
    VectorEnd,
    /// `,`
    Comma,
    /// Prefix `+`. Never produced by the lexer; the parser rewrites `Plus`.
    UnaryPlus,
    /// Prefix `-`. Never produced by the lexer; the parser rewrites `Minus`.
    UnaryMinus,
    /// The whole `?:` construct, used for registry lookup.
    Ternary,
}

impl Operator {
    /// Binding strength; higher binds tighter.
    ///
    /// # Example
    /// ```
    /// use vexl::interpreter::lexer::Operator;
    ///
    /// assert!(Operator::Multiply.priority() > Operator::Plus.priority());
    /// assert!(Operator::UnaryMinus.priority() < Operator::Power.priority());
    /// ```
    #[must_use]
    pub const fn priority(self) -> i32 {
        match self {
            Self::TernaryTrue | Self::TernaryFalse | Self::Ternary => 1,
            Self::Or => 2,
            Self::And => 3,
            Self::Equal => 4,
            Self::Greater | Self::Less | Self::GreaterOrEqual | Self::LessOrEqual => 5,
            Self::Plus | Self::Minus => 6,
            Self::Multiply | Self::Divide | Self::Modulo => 7,
            Self::Negate | Self::Complement => 8,
            Self::VectorStart | Self::VectorEnd => 9,
            Self::UnaryPlus | Self::UnaryMinus => 10,
            Self::Power | Self::Range | Self::GroupStart | Self::GroupEnd | Self::Comma => 11,
        }
    }

    /// Whether operators of equal priority group to the left.
    ///
    /// `**`, `..`, the ternary and all prefix operators group to the right.
    #[must_use]
    pub const fn left_assoc(self) -> bool {
        !matches!(self,
                  Self::Power
                  | Self::Range
                  | Self::Negate
                  | Self::Complement
                  | Self::UnaryPlus
                  | Self::UnaryMinus
                  | Self::TernaryTrue
                  | Self::TernaryFalse
                  | Self::Ternary)
    }

    /// Delimiters that end an expression without being consumed by it.
    #[must_use]
    pub const fn is_closing(self) -> bool {
        matches!(self, Self::GroupEnd | Self::VectorEnd | Self::Comma | Self::TernaryFalse)
    }

    /// Operators that take a left and a right operand.
    #[must_use]
    pub const fn is_binary(self) -> bool {
        matches!(self,
                 Self::Multiply
                 | Self::Divide
                 | Self::Modulo
                 | Self::Plus
                 | Self::Minus
                 | Self::Power
                 | Self::Range
                 | Self::Greater
                 | Self::Less
                 | Self::GreaterOrEqual
                 | Self::LessOrEqual
                 | Self::Equal
                 | Self::Or
                 | Self::And)
    }

    /// The canonical registry name this operator resolves to, if any.
    ///
    /// # Example
    /// ```
    /// use vexl::interpreter::lexer::Operator;
    ///
    /// assert_eq!(Operator::Power.function_name(), Some("pow"));
    /// assert_eq!(Operator::Comma.function_name(), None);
    /// ```
    #[must_use]
    pub const fn function_name(self) -> Option<&'static str> {
        Some(match self {
            Self::Plus => "plus",
            Self::Minus => "minus",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Modulo => "modulo",
            Self::Less => "less",
            Self::Greater => "greater",
            Self::LessOrEqual => "lessorequal",
            Self::GreaterOrEqual => "greaterorequal",
            Self::Equal => "equal",
            Self::Negate => "negate",
            Self::And => "and",
            Self::Or => "or",
            Self::Power => "pow",
            Self::Range => "range",
            Self::UnaryPlus => "unaryplus",
            Self::UnaryMinus => "unaryminus",
            Self::Ternary => "ternary",
            Self::Complement => "complement",
            Self::TernaryTrue
            | Self::TernaryFalse
            | Self::GroupStart
            | Self::GroupEnd
            | Self::VectorStart
            | Self::VectorEnd
            | Self::Comma => return None,
        })
    }

    /// The operator as written in source.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Plus | Self::UnaryPlus => "+",
            Self::Minus | Self::UnaryMinus => "-",
            Self::Power => "**",
            Self::Range => "..",
            Self::Negate => "!",
            Self::Greater => ">",
            Self::Less => "<",
            Self::GreaterOrEqual => ">=",
            Self::LessOrEqual => "<=",
            Self::Equal => "==",
            Self::Or => "||",
            Self::And => "&&",
            Self::Complement => "~",
            Self::TernaryTrue => "?",
            Self::TernaryFalse => ":",
            Self::Ternary => "?:",
            Self::GroupStart => "(",
            Self::GroupEnd => ")",
            Self::VectorStart => "[",
            Self::VectorEnd => "]",
            Self::Comma => ",",
        }
    }
}

/// A token together with the byte range it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    /// The token.
    pub token: Token,
    /// Byte range in the source text.
    pub span:  Range<usize>,
}

/// A lazy, restartable token stream with one token of lookahead.
///
/// Wraps the logos lexer. Tokens are produced on demand; [`Tokenizer::peek`]
/// caches the next one so it can be inspected without being consumed.
///
/// # Example
/// ```
/// use vexl::interpreter::lexer::{Operator, Token, Tokenizer};
///
/// let mut tokens = Tokenizer::new("a + 1");
///
/// assert_eq!(tokens.next().unwrap().unwrap().token,
///            Token::Identifier(vec!["a".to_string()]));
/// assert_eq!(tokens.peek().unwrap().unwrap().token, Token::Operator(Operator::Plus));
/// assert_eq!(tokens.remaining(), "+ 1");
/// tokens.next().unwrap();
/// assert_eq!(tokens.next().unwrap().unwrap().token, Token::Number(1.0));
/// assert!(tokens.at_end());
/// ```
pub struct Tokenizer<'s> {
    source: &'s str,
    lexer:  logos::Lexer<'s, Token>,
    peeked: Option<Lexeme>,
}

impl<'s> Tokenizer<'s> {
    /// Creates a tokenizer positioned at the start of `source`.
    #[must_use]
    pub fn new(source: &'s str) -> Self {
        Self { source,
               lexer: Token::lexer(source),
               peeked: None }
    }

    /// The full source text.
    #[must_use]
    pub const fn text(&self) -> &'s str {
        self.source
    }

    /// Restarts tokenizing from the beginning of the source.
    pub fn reset(&mut self) {
        self.lexer = Token::lexer(self.source);
        self.peeked = None;
    }

    /// Returns the next token without consuming it.
    ///
    /// # Errors
    /// Returns a `ParseError` when the input at the current position does not
    /// form a token.
    pub fn peek(&mut self) -> ParseResult<Option<&Lexeme>> {
        if self.peeked.is_none() {
            self.peeked = self.lex()?;
        }
        Ok(self.peeked.as_ref())
    }

    /// Consumes and returns the next token.
    ///
    /// # Errors
    /// Returns a `ParseError` when the input at the current position does not
    /// form a token.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> ParseResult<Option<Lexeme>> {
        match self.peeked.take() {
            Some(lexeme) => Ok(Some(lexeme)),
            None => self.lex(),
        }
    }

    /// Reports whether all input has been consumed.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.peeked.is_none() && self.lexer.remainder().trim_start_matches(SKIPPED).is_empty()
    }

    /// The unconsumed source text, starting at the peeked token if there is
    /// one.
    #[must_use]
    pub fn remaining(&self) -> &'s str {
        let offset = self.peeked
                         .as_ref()
                         .map_or_else(|| self.source.len() - self.lexer.remainder().len(),
                                      |lexeme| lexeme.span.start);
        self.source[offset..].trim_start_matches(SKIPPED)
    }

    /// The source text a lexeme was read from.
    #[must_use]
    pub fn slice(&self, lexeme: &Lexeme) -> &'s str {
        &self.source[lexeme.span.clone()]
    }

    fn lex(&mut self) -> ParseResult<Option<Lexeme>> {
        match self.lexer.next() {
            None => Ok(None),
            Some(Ok(token)) => Ok(Some(Lexeme { token,
                                                span: self.lexer.span() })),
            Some(Err(error)) => {
                let span = self.lexer.span();
                let remaining = self.source[span.start..].to_string();

                Err(match error {
                    LexError::MalformedNumber => {
                        ParseError::MalformedNumber { literal: self.lexer.slice().to_string(),
                                                      remaining }
                    },
                    LexError::UnexpectedCharacter => {
                        let character = remaining.chars().next().unwrap_or_default();
                        ParseError::UnexpectedCharacter { character, remaining }
                    },
                })
            },
        }
    }
}

/// Parses a numeric literal from the current token slice.
///
/// # Returns
/// - `Ok(f64)`: The parsed value.
/// - `Err(LexError::MalformedNumber)`: If the slice is not a valid number.
fn parse_number(lex: &logos::Lexer<Token>) -> Result<f64, LexError> {
    lex.slice().parse().map_err(|_| LexError::MalformedNumber)
}

/// Splits a plain identifier into its dotted path segments.
fn parse_path(lex: &logos::Lexer<Token>) -> Vec<String> {
    lex.slice().split('.').map(str::to_string).collect()
}

/// Strips the braces of a quoted identifier, keeping it as one segment.
fn parse_quoted(lex: &logos::Lexer<Token>) -> Vec<String> {
    let slice = lex.slice();
    vec![slice[1..slice.len() - 1].to_string()]
}
