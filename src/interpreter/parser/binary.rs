use crate::{
    instruction::Instruction,
    interpreter::{
        lexer::{Lexeme, Operator},
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_, '_> {
    /// Parses an operator that follows a complete operand.
    ///
    /// This covers the binary operators, the ternary `c ? a : b` and
    /// postfix indexing `v[i, ...]`. An index list holding a single range
    /// `v[a..b]` compiles to a slice instead of an index of the range's
    /// elements.
    ///
    /// # Errors
    /// `UnexpectedToken` when `op` cannot follow an operand, and whatever
    /// parsing the right-hand side returns.
    pub(super) fn parse_infix(&mut self, op: Operator, lexeme: &Lexeme) -> ParseResult<()> {
        match op {
            Operator::TernaryTrue => {
                self.tokens.next()?;
                self.parse_expression(op.priority(), op.left_assoc())?;
                self.expect(Operator::TernaryFalse)?;
                self.parse_expression(Operator::TernaryFalse.priority(),
                                      Operator::TernaryFalse.left_assoc())?;

                let function = self.bind(self.registry.lookup_operator(Operator::Ternary, 3))?;
                self.emit_call(Operator::Ternary.symbol(), function, 3);
                Ok(())
            },
            Operator::VectorStart => {
                self.tokens.next()?;
                let count = self.parse_list(Operator::VectorEnd)?;

                if count == 1 && self.ends_with_range() {
                    self.program.pop();
                    self.program.push(Instruction::IndexRange);
                } else {
                    self.program.push(Instruction::Index(count));
                }
                Ok(())
            },
            op if op.is_binary() => {
                self.tokens.next()?;
                self.parse_expression(op.priority(), op.left_assoc())?;

                let function = self.bind(self.registry.lookup_operator(op, 2))?;
                self.emit_call(op.symbol(), function, 2);
                Ok(())
            },
            _ => Err(self.unexpected("a binary operator", lexeme)),
        }
    }

    fn ends_with_range(&self) -> bool {
        matches!(self.program.last(),
                 Some(Instruction::Call { name, arity: 2, .. }) if name == Operator::Range.symbol())
    }
}
