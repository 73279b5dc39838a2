use super::{
    op::{Associativity, BinOpKind, Precedence},
    Parser,
};
use crate::{error::Error, tokenizer::TokenKind, tree::NodeId};

impl Parser {
    /// Returns the binary operator at the cursor, if there is one.
    fn peek_bin_op(&self) -> Option<BinOpKind> {
        let token = self.current_token();
        if token.kind == TokenKind::BinaryOperator {
            BinOpKind::from_lexeme(&token.text)
        } else {
            None
        }
    }

    /// Parses an expression whose operators all bind at least as tightly as `precedence`.
    ///
    /// Calling this with [`Precedence::Any`] parses the `E` rule of the grammar; the `T` and `U`
    /// rules fall out of the precedence levels of the operators.
    pub(super) fn parse_expr(&mut self, precedence: Precedence) -> Result<NodeId, Error> {
        self.nested(|parser| {
            let lhs = parser.parse_prefix()?;
            parser.complete_expr(lhs, precedence)
        })
    }

    /// After parsing the left-hand-side of a potential binary expression, keep folding operators
    /// into it for as long as they bind at least as tightly as `precedence`.
    ///
    /// If we are parsing `1 + 2 * 3`, we parse `1`, then see `+`. The right-hand-side of `+` is
    /// parsed at the next higher precedence level, so it picks up `2 * 3` before returning, and
    /// we build `1 + (2 * 3)`. In `3 * 2 + 1`, the right-hand-side of `*` stops at `+`, since `+`
    /// binds less tightly; we build `3 * 2` first, then loop around and pick up `+ 1`.
    ///
    /// Right-associative operators (`^`) parse their right-hand-side at their own level instead,
    /// so that `2 ^ 3 ^ 2` nests to the right.
    fn complete_expr(&mut self, mut lhs: NodeId, precedence: Precedence) -> Result<NodeId, Error> {
        while let Some(op) = self.peek_bin_op() {
            let op_precedence = op.precedence();
            if op_precedence < precedence {
                break;
            }

            let op_token = self.next_token();
            let rhs_precedence = match op.associativity() {
                Associativity::Left => op_precedence.tighter(),
                Associativity::Right => op_precedence,
            };
            let rhs = self.parse_expr(rhs_precedence)?;
            lhs = self.builder.binary(op_token, lhs, rhs);
        }

        Ok(lhs)
    }
}
