//! Detection of closed subexpressions, that is, subexpressions without free variables.

use log::debug;
use std::collections::{HashMap, HashSet};
use subex_parser::{tokenizer::TokenKind, NodeId, NodeRef, Tree};

/// The closedness of every node in one subtree, decided once for a fixed set of names bound
/// above it.
///
/// A node is closed if every identifier in its subtree is bound, either by a lambda inside the
/// subtree or by the names the checker was created with. Both operands of a binary operator see
/// the same bound names.
#[derive(Debug)]
pub struct ClosednessChecker<'tree> {
    root: NodeRef<'tree>,
    closed: HashMap<NodeId, bool>,
}

impl<'tree> ClosednessChecker<'tree> {
    /// Decides the closedness of `root` and every node below it, treating the names in `bound`
    /// as bound by lambdas above `root`.
    pub fn new(root: NodeRef<'tree>, bound: &HashSet<&str>) -> Self {
        // the innermost lambda strictly above each node, looking no higher than `root`
        let mut scopes: HashMap<NodeId, Option<NodeRef<'tree>>> = HashMap::new();
        for node in root.pre_order() {
            let scope = match node.parent() {
                _ if node == root => None,
                Some(parent) if parent.kind() == TokenKind::Lambda => Some(parent),
                Some(parent) => scopes.get(&parent.id()).copied().flatten(),
                None => None,
            };
            scopes.insert(node.id(), scope);
        }

        let mut closed: HashMap<NodeId, bool> = HashMap::new();
        for node in root.post_order() {
            let is_closed = |child: NodeRef| closed.get(&child.id()).copied().unwrap_or(false);
            let node_closed = match node.kind() {
                TokenKind::Number => true,
                TokenKind::Identifier => is_bound(node, &scopes, bound),
                TokenKind::Lambda => node.right().is_some_and(is_closed),
                _ => node.children().all(is_closed),
            };
            closed.insert(node.id(), node_closed);
        }

        debug!("decided closedness of {} nodes", closed.len());
        Self { root, closed }
    }

    /// The root of the subtree this checker covers.
    pub fn root(&self) -> NodeRef<'tree> {
        self.root
    }

    /// Returns whether `node` is closed, or [`None`] if it lies outside the subtree this checker
    /// covers.
    pub fn is_closed(&self, node: NodeRef<'tree>) -> Option<bool> {
        if !std::ptr::eq(node.tree(), self.root.tree()) {
            return None;
        }
        self.closed.get(&node.id()).copied()
    }
}

/// Returns true if the identifier `node` is bound by an enclosing lambda or by `bound`. The
/// parameter of a lambda is bound by that lambda.
fn is_bound(
    node: NodeRef,
    scopes: &HashMap<NodeId, Option<NodeRef>>,
    bound: &HashSet<&str>,
) -> bool {
    let name = node.text();
    let mut scope = scopes.get(&node.id()).copied().flatten();
    while let Some(lambda) = scope {
        if lambda.left().is_some_and(|param| param.text() == name) {
            return true;
        }
        scope = scopes.get(&lambda.id()).copied().flatten();
    }
    bound.contains(name)
}

/// Returns true if the subtree rooted at `node` has no free variables, ignoring any binding
/// lambdas above it.
///
/// ```
/// use subex_analysis::is_closed;
/// use subex_parser::parse;
///
/// let tree = parse("lambda x. x + 1").unwrap();
/// let lambda = tree.root().unwrap();
/// assert!(is_closed(lambda));
/// assert!(!is_closed(lambda.right().unwrap()));
/// ```
pub fn is_closed(node: NodeRef) -> bool {
    is_closed_with(node, &HashSet::new())
}

/// Returns true if the subtree rooted at `node` has no free variables other than the given names.
pub fn is_closed_with(node: NodeRef, bound: &HashSet<&str>) -> bool {
    ClosednessChecker::new(node, bound).is_closed(node).unwrap_or(false)
}

/// Finds the maximal closed subexpressions of the given tree, in pre-order.
///
/// A node is reported if it is closed and its parent is not, so no reported node lies inside
/// another. The parameter of a lambda counts as closed, so it is reported whenever the lambda
/// itself is not.
///
/// ```
/// use subex_analysis::find_maximally_closed;
/// use subex_parser::parse;
///
/// let tree = parse("y * (2 + 3)").unwrap();
/// let closed = find_maximally_closed(&tree);
/// assert_eq!(closed.len(), 1);
/// assert_eq!(closed[0].to_string(), "2 + 3");
/// ```
pub fn find_maximally_closed(tree: &Tree) -> Vec<NodeRef<'_>> {
    let Some(root) = tree.root() else {
        return Vec::new();
    };

    let checker = ClosednessChecker::new(root, &HashSet::new());
    let decided_closed = |node| checker.is_closed(node).unwrap_or(false);

    let closed = tree.pre_order()
        .filter(|node| decided_closed(*node))
        .filter(|node| node.parent().map_or(true, |parent| !decided_closed(parent)))
        .collect::<Vec<_>>();
    debug!("found {} maximally closed subexpressions", closed.len());
    closed
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use subex_parser::{parse, tokenizer::Token, tree::TreeBuilder};
    use super::*;

    /// Renders the nodes reported by [`find_maximally_closed`].
    fn closed(source: &str) -> Vec<String> {
        let tree = parse(source).unwrap();
        find_maximally_closed(&tree).iter().map(ToString::to_string).collect()
    }

    #[test]
    fn number_is_closed() {
        assert_eq!(closed("42"), vec!["42"]);
    }

    #[test]
    fn free_identifier() {
        assert!(closed("x").is_empty());
    }

    #[test]
    fn whole_tree_closed() {
        assert_eq!(closed("2 * (3 + 4)"), vec!["2 * (3 + 4)"]);
        assert_eq!(closed("lambda x. x * x"), vec!["lambda x. x * x"]);
    }

    #[test]
    fn closed_operands_of_open_expression() {
        assert_eq!(closed("(1 + 2) * x + sin(3)"), vec!["1 + 2", "sin(3)"]);
    }

    #[test]
    fn sign_zero_is_reported() {
        assert_eq!(closed("-x"), vec!["0"]);
    }

    #[test]
    fn lambda_with_free_variable() {
        let tree = parse("lambda x. y + 2").unwrap();
        let reported = find_maximally_closed(&tree);
        assert!(reported.iter().all(|node| node.kind() != TokenKind::Lambda));
        let texts = reported.iter().map(|node| node.text()).collect::<Vec<_>>();
        assert_eq!(texts, vec!["x", "2"]);
    }

    #[test]
    fn binding_reaches_nested_lambdas() {
        assert_eq!(closed("lambda x. lambda y. x + y"), vec!["lambda x. lambda y. x + y"]);
        assert_eq!(closed("lambda x. (lambda y. y) * x"), vec!["lambda x. (lambda y. y) * x"]);
    }

    #[test]
    fn binding_does_not_leak_to_sibling() {
        // the `x` on the right is outside the lambda
        assert_eq!(closed("(lambda x. x) + x"), vec!["lambda x. x"]);
    }

    #[test]
    fn standalone_closedness() {
        let tree = parse("lambda x. cos(x) + y").unwrap();
        let body = tree.root().unwrap().right().unwrap();
        assert!(!is_closed(body));
        assert!(!is_closed_with(body, &HashSet::from(["x"])));
        assert!(is_closed_with(body, &HashSet::from(["x", "y"])));
        assert!(is_closed_with(body.left().unwrap(), &HashSet::from(["x"])));
    }

    #[test]
    fn checker_is_fixed_to_its_bound_names() {
        let tree = parse("x + y").unwrap();
        let root = tree.root().unwrap();

        let bound = ClosednessChecker::new(root, &HashSet::from(["x", "y"]));
        let free = ClosednessChecker::new(root, &HashSet::new());
        assert_eq!(bound.is_closed(root), Some(true));
        assert_eq!(free.is_closed(root), Some(false));
        assert_eq!(bound.is_closed(root), Some(true));
    }

    #[test]
    fn checker_covers_only_its_subtree() {
        let numbers = parse("1 + 2").unwrap();
        let checker = ClosednessChecker::new(numbers.root().unwrap(), &HashSet::new());

        let other = parse("x + y").unwrap();
        let other_root = other.root().unwrap();
        assert_eq!(checker.is_closed(other_root), None);
        assert_eq!(checker.is_closed(other_root.left().unwrap()), None);

        let tree = parse("(1 + 2) * x").unwrap();
        let root = tree.root().unwrap();
        let sum = ClosednessChecker::new(root.left().unwrap(), &HashSet::new());
        assert_eq!(sum.is_closed(root.left().unwrap()), Some(true));
        assert_eq!(sum.is_closed(root), None);
        assert_eq!(sum.is_closed(root.right().unwrap()), None);
    }

    #[test]
    fn every_node_is_decided() {
        let tree = parse("lambda x. x + y").unwrap();
        let root = tree.root().unwrap();
        let checker = ClosednessChecker::new(root, &HashSet::new());
        assert_eq!(checker.is_closed(root), Some(false));

        let body = root.right().unwrap();
        assert_eq!(checker.is_closed(root.left().unwrap()), Some(true));
        assert_eq!(checker.is_closed(body.left().unwrap()), Some(true));
        assert_eq!(checker.is_closed(body.right().unwrap()), Some(false));
        assert_eq!(checker.is_closed(body), Some(false));
    }

    #[test]
    fn inner_lambda_shadows_nothing_outside() {
        // `y` is only bound inside the inner lambda
        let tree = parse("lambda x. (lambda y. y) + y").unwrap();
        let body = tree.root().unwrap().right().unwrap();
        let checker = ClosednessChecker::new(tree.root().unwrap(), &HashSet::new());
        assert_eq!(checker.is_closed(body.left().unwrap()), Some(true));
        assert_eq!(checker.is_closed(body.right().unwrap()), Some(false));
    }

    #[test]
    fn deep_tree() {
        let mut builder = TreeBuilder::new();
        let mut root = builder.leaf(Token::new(TokenKind::Identifier, "x", 0..0));
        for _ in 0..100_000 {
            let one = builder.leaf(Token::new(TokenKind::Number, "1", 0..0));
            root = builder.binary(Token::new(TokenKind::BinaryOperator, "+", 0..0), one, root);
        }
        let param = builder.leaf(Token::new(TokenKind::Identifier, "x", 0..0));
        let root = builder.lambda(Token::new(TokenKind::Lambda, "lambda", 0..0), param, root);
        let tree = builder.finish(root);

        assert!(is_closed(tree.root().unwrap()));
        assert_eq!(find_maximally_closed(&tree), vec![tree.root().unwrap()]);
    }
}
