use crate::{
    instruction::Instruction,
    interpreter::{
        lexer::{Lexeme, Operator, Token},
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_, '_> {
    /// Parses an operand that starts with an operator token.
    ///
    /// Handles parenthesized groups, vector literals `[a, b, ...]` and the
    /// prefix operators `-`, `+`, `!` and `~`. A prefix operator takes as its
    /// operand everything that binds tighter than itself, so `-2 ** 2` is
    /// `-(2 ** 2)` while `-a * b` is `(-a) * b`.
    ///
    /// # Errors
    /// `UnexpectedToken` when `op` cannot start an operand, and whatever the
    /// nested parse returns.
    pub(super) fn parse_prefix(&mut self, op: Operator, lexeme: &Lexeme) -> ParseResult<()> {
        match op {
            Operator::GroupStart => {
                self.tokens.next()?;
                self.parse_expression(-1, false)?;
                self.expect(Operator::GroupEnd)
            },
            Operator::VectorStart => {
                self.tokens.next()?;
                let count = self.parse_list(Operator::VectorEnd)?;
                self.program.push(Instruction::Vector(count));
                Ok(())
            },
            Operator::Minus | Operator::Plus | Operator::Negate | Operator::Complement => {
                let prefix = match op {
                    Operator::Minus => Operator::UnaryMinus,
                    Operator::Plus => Operator::UnaryPlus,
                    other => other,
                };

                self.tokens.next()?;
                self.parse_expression(prefix.priority(), prefix.left_assoc())?;

                let function = self.bind(self.registry.lookup_operator(prefix, 1))?;
                self.emit_call(prefix.symbol(), function, 1);
                Ok(())
            },
            _ => Err(self.unexpected("an expression", lexeme)),
        }
    }

    /// Parses what follows an identifier: a call when a `(` comes next,
    /// otherwise a plain variable reference.
    ///
    /// # Errors
    /// `Lookup` when the registry has no function of that name taking the
    /// given number of arguments, and whatever parsing the arguments returns.
    pub(super) fn parse_identifier(&mut self, path: Vec<String>) -> ParseResult<()> {
        let is_call = matches!(self.tokens.peek()?,
                               Some(Lexeme { token: Token::Operator(Operator::GroupStart),
                                             .. }));

        if !is_call {
            self.program.push(Instruction::Identifier(path));
            return Ok(());
        }

        self.tokens.next()?;
        let arity = self.parse_list(Operator::GroupEnd)?;
        let name = path.join(".");
        let function = self.bind(self.registry.lookup_function(&name, arity))?;
        self.emit_call(name, function, arity);
        Ok(())
    }
}
