use std::collections::HashMap;
use subex_parser::{parser::op::BinOpKind, tokenizer::TokenKind, NodeId, NodeRef};

/// Builds the canonical form of a node from the canonical forms of its children.
pub(crate) fn compose(node: NodeRef, left: Option<&str>, right: Option<&str>) -> String {
    let (left, right) = (left.unwrap_or(""), right.unwrap_or(""));
    match node.kind() {
        TokenKind::UnaryOperator => format!("{}({})", node.text(), left),
        TokenKind::BinaryOperator => {
            let commutative = BinOpKind::from_lexeme(node.text()).is_some_and(BinOpKind::is_commutative);
            let (left, right) = if commutative && left > right {
                (right, left)
            } else {
                (left, right)
            };
            format!("{}({},{})", node.text(), left, right)
        },
        TokenKind::Lambda => format!("lambda({}.{})", left, right),
        _ => node.text().to_string(),
    }
}

/// Returns the canonical form of the subtree rooted at `node`.
///
/// Leaves render as their text, function applications as `name(arg)`, binary operations as
/// `op(left,right)` and lambdas as `lambda(param.body)`. The operands of `+` and `*` are put in
/// lexicographic order, so `a + b` and `b + a` have the same canonical form.
///
/// ```
/// use subex_analysis::canonical;
/// use subex_parser::parse;
///
/// let tree = parse("(b + a) * 2").unwrap();
/// assert_eq!(canonical(tree.root().unwrap()), "*(+(a,b),2)");
/// ```
pub fn canonical(node: NodeRef) -> String {
    // children are consumed as soon as their parent is composed
    let mut forms: HashMap<NodeId, String> = HashMap::new();
    for current in node.post_order() {
        let left = current.left().and_then(|child| forms.remove(&child.id()));
        let right = current.right().and_then(|child| forms.remove(&child.id()));
        forms.insert(current.id(), compose(current, left.as_deref(), right.as_deref()));
    }
    forms.remove(&node.id()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use subex_parser::{parse, tokenizer::Token, tree::TreeBuilder};
    use super::*;

    fn canonical_of(source: &str) -> String {
        canonical(parse(source).unwrap().root().unwrap())
    }

    #[test]
    fn leaves() {
        assert_eq!(canonical_of("x"), "x");
        assert_eq!(canonical_of("3.5"), "3.5");
    }

    #[test]
    fn commutative_operands_are_sorted() {
        assert_eq!(canonical_of("b + a"), "+(a,b)");
        assert_eq!(canonical_of("a + b"), "+(a,b)");
        assert_eq!(canonical_of("y * 2"), "*(2,y)");
    }

    #[test]
    fn other_operators_keep_order() {
        assert_eq!(canonical_of("b - a"), "-(b,a)");
        assert_eq!(canonical_of("b / a"), "/(b,a)");
        assert_eq!(canonical_of("b ^ a"), "^(b,a)");
    }

    #[test]
    fn nested() {
        let tree = parse("(a + b) + (b + a)").unwrap();
        let root = tree.root().unwrap();
        assert_eq!(canonical(root.left().unwrap()), canonical(root.right().unwrap()));
        assert_eq!(canonical(root), "+(+(a,b),+(a,b))");
    }

    #[test]
    fn functions_and_lambdas() {
        assert_eq!(canonical_of("cos(y + x)"), "cos(+(x,y))");
        assert_eq!(canonical_of("lambda x. x * 2"), "lambda(x.*(2,x))");
    }

    #[test]
    fn sign_includes_zero() {
        assert_eq!(canonical_of("-x"), "-(0,x)");
        assert_eq!(canonical_of("+x"), "+(0,x)");
    }

    #[test]
    fn deep_tree() {
        let mut builder = TreeBuilder::new();
        let mut root = builder.leaf(Token::new(TokenKind::Number, "1", 0..0));
        for _ in 0..20_000 {
            let one = builder.leaf(Token::new(TokenKind::Number, "1", 0..0));
            root = builder.binary(Token::new(TokenKind::BinaryOperator, "-", 0..0), root, one);
        }
        let tree = builder.finish(root);

        let form = canonical(tree.root().unwrap());
        assert!(form.starts_with("-(-(-("));
        assert!(form.ends_with(",1),1),1)"));
        assert_eq!(form.matches('1').count(), 20_001);
    }
}
