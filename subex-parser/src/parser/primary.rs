use super::{op::{BinOpKind, Precedence}, Parser};
use crate::{
    error::{kind::{self, SyntaxReason}, Error},
    tokenizer::{Token, TokenKind},
    tree::NodeId,
};

impl Parser {
    /// Parses the `P` rule of the grammar: a single operand, possibly preceded by signs.
    pub(super) fn parse_prefix(&mut self) -> Result<NodeId, Error> {
        let token = self.current_token();
        match token.kind {
            TokenKind::UnaryOperator => self.parse_call(),
            TokenKind::Lambda => self.parse_lambda(),
            TokenKind::OpenParen => self.parse_paren(),
            TokenKind::Number | TokenKind::Identifier => {
                let token = self.next_token();
                Ok(self.builder.leaf(token))
            },
            TokenKind::BinaryOperator if BinOpKind::from_lexeme(&token.text).is_some_and(BinOpKind::is_sign) => {
                self.parse_sign()
            },
            TokenKind::EndOfInput => Err(self.error(kind::UnexpectedEof)),
            _ => Err(self.error(kind::SyntaxError {
                reason: SyntaxReason::ExpectedOperand { found: token.text.clone() },
            })),
        }
    }

    /// Parses a function application, such as `sqrt(x + 1)`. The argument must be parenthesized.
    fn parse_call(&mut self) -> Result<NodeId, Error> {
        let function = self.next_token();
        if self.current_token().kind != TokenKind::OpenParen {
            return Err(Error::new(vec![function.span.clone()], kind::SyntaxError {
                reason: SyntaxReason::MissingCallParens { function: function.text },
            }));
        }

        self.next_token();
        let arg = self.parse_expr(Precedence::Any)?;
        self.expect(TokenKind::CloseParen)?;
        Ok(self.builder.unary(function, arg))
    }

    /// Parses a signed operand, such as `-x`, into `0 - x`.
    fn parse_sign(&mut self) -> Result<NodeId, Error> {
        let sign = self.next_token();
        let operand = self.nested(Self::parse_prefix)?;

        let at = sign.span.start;
        let zero = self.builder.leaf(Token::new(TokenKind::Number, "0", at..at));
        Ok(self.builder.binary(sign, zero, operand))
    }

    /// Parses a lambda abstraction, such as `lambda x. x + 1`. The body extends as far to the
    /// right as possible.
    fn parse_lambda(&mut self) -> Result<NodeId, Error> {
        let lambda = self.next_token();
        let param = self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::Dot)?;
        let body = self.parse_expr(Precedence::Any)?;

        let param = self.builder.leaf(param);
        Ok(self.builder.lambda(lambda, param, body))
    }

    /// Parses a parenthesized expression. The parentheses leave no trace in the tree.
    fn parse_paren(&mut self) -> Result<NodeId, Error> {
        self.next_token();
        let expr = self.parse_expr(Precedence::Any)?;
        self.expect(TokenKind::CloseParen)?;
        Ok(expr)
    }
}
