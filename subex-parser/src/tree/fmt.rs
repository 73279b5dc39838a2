use std::fmt::{Display, Formatter, Result};
use super::NodeRef;
use crate::{parser::op::{Associativity, BinOpKind}, tokenizer::TokenKind};

/// Which side of a binary operator an operand is on.
#[derive(Clone, Copy, PartialEq)]
enum Side {
    Left,
    Right,
}

/// Returns true if `operand` must be wrapped in parentheses to keep its shape when printed on
/// the given side of `parent`.
fn needs_parens(operand: NodeRef, parent: Option<BinOpKind>, side: Side) -> bool {
    match operand.kind() {
        // a lambda body extends as far right as possible, so it always needs delimiting
        TokenKind::Lambda => true,
        TokenKind::BinaryOperator => {
            let (Some(parent), Some(op)) = (parent, BinOpKind::from_lexeme(operand.text())) else {
                return true;
            };
            let (outer, inner) = (parent.precedence(), op.precedence());
            if inner != outer {
                return inner < outer;
            }

            match parent.associativity() {
                Associativity::Left => side == Side::Right,
                Associativity::Right => side == Side::Left,
            }
        },
        _ => false,
    }
}

/// Formats one operand of a binary operator.
fn fmt_operand(f: &mut Formatter, operand: Option<NodeRef>, parent: Option<BinOpKind>, side: Side) -> Result {
    let Some(operand) = operand else {
        return Ok(());
    };

    if needs_parens(operand, parent, side) {
        write!(f, "({})", operand)
    } else {
        write!(f, "{}", operand)
    }
}

/// Formats the subtree as infix source text, with only the parentheses needed to parse back into
/// the same tree.
impl Display for NodeRef<'_> {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self.kind() {
            TokenKind::UnaryOperator => {
                write!(f, "{}(", self.text())?;
                if let Some(arg) = self.left() {
                    arg.fmt(f)?;
                }
                write!(f, ")")
            },
            TokenKind::Lambda => {
                write!(f, "{} ", self.text())?;
                if let Some(param) = self.left() {
                    param.fmt(f)?;
                }
                write!(f, ". ")?;
                if let Some(body) = self.right() {
                    body.fmt(f)?;
                }
                Ok(())
            },
            TokenKind::BinaryOperator => {
                let op = BinOpKind::from_lexeme(self.text());
                fmt_operand(f, self.left(), op, Side::Left)?;
                write!(f, " {} ", self.text())?;
                fmt_operand(f, self.right(), op, Side::Right)
            },
            _ => f.write_str(self.text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    fn reformat(source: &str) -> String {
        parse(source).unwrap().root().unwrap().to_string()
    }

    #[test]
    fn fmt_precedence() {
        assert_eq!(reformat("2+3*4"), "2 + 3 * 4");
        assert_eq!(reformat("(2+3)*4"), "(2 + 3) * 4");
        assert_eq!(reformat("((x))"), "x");
    }

    #[test]
    fn fmt_associativity() {
        assert_eq!(reformat("a - (b - c)"), "a - (b - c)");
        assert_eq!(reformat("(a - b) - c"), "a - b - c");
        assert_eq!(reformat("2^3^2"), "2 ^ 3 ^ 2");
        assert_eq!(reformat("(2^3)^2"), "(2 ^ 3) ^ 2");
    }

    #[test]
    fn fmt_sign_and_calls() {
        assert_eq!(reformat("-x"), "0 - x");
        assert_eq!(reformat("sqrt(x + 1) * 2"), "sqrt(x + 1) * 2");
    }

    #[test]
    fn fmt_lambda() {
        assert_eq!(reformat("lambda x. x + 1"), "lambda x. x + 1");
        assert_eq!(reformat("(lambda x. x) + 1"), "(lambda x. x) + 1");
        assert_eq!(reformat("2 * lambda y. y"), "2 * (lambda y. y)");
    }

    #[test]
    fn fmt_parses_back_to_same_tree() {
        for source in ["-(a + b) ^ -c", "lambda f. f * (lambda g. g - 1) / 3", "a / (b / c) + abs(0 - d)"] {
            let tree = parse(source).unwrap();
            let printed = tree.root().unwrap().to_string();
            let reparsed = parse(&printed).unwrap();
            assert_eq!(reparsed.root().unwrap().to_string(), printed);
            assert_eq!(
                reparsed.pre_order().map(|node| node.token().text.clone()).collect::<Vec<_>>(),
                tree.pre_order().map(|node| node.token().text.clone()).collect::<Vec<_>>(),
            );
        }
    }
}
