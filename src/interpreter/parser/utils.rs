use crate::{
    error::ParseError,
    interpreter::{
        lexer::{Lexeme, Operator, Token},
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_, '_> {
    /// Parses a comma-separated list of expressions up to and including
    /// `closing`, returning the number of items.
    ///
    /// The opening delimiter must already be consumed. An immediately
    /// closed list is empty.
    ///
    /// # Errors
    /// `UnexpectedToken` when an item is followed by anything but a comma
    /// or `closing`, and `UnexpectedEndOfInput` when the list is not closed.
    pub(super) fn parse_list(&mut self, closing: Operator) -> ParseResult<usize> {
        let expected = format!("`,' or `{}'", closing.symbol());

        if matches!(self.tokens.peek()?, Some(Lexeme { token: Token::Operator(op), .. }) if *op == closing)
        {
            self.tokens.next()?;
            return Ok(0);
        }

        let mut count = 0;

        loop {
            self.parse_expression(-1, false)?;
            count += 1;

            match self.tokens.peek()?.cloned() {
                Some(Lexeme { token: Token::Operator(op), .. }) if op == closing => {
                    self.tokens.next()?;
                    return Ok(count);
                },
                Some(Lexeme { token: Token::Operator(Operator::Comma),
                              .. }) => {
                    self.tokens.next()?;
                },
                Some(lexeme) => return Err(self.unexpected(&expected, &lexeme)),
                None => return Err(ParseError::UnexpectedEndOfInput { expected }),
            }
        }
    }
}
