use super::{Node, NodeId, Tree};
use crate::tokenizer::Token;

/// Assembles a [`Tree`] bottom-up.
///
/// Every constructor returns the [`NodeId`] of the new node and records it as the parent of the
/// children it was given. Call [`TreeBuilder::finish`] with the root to obtain the finished tree.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
}

impl TreeBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a node with the given token and children.
    ///
    /// # Panics
    ///
    /// Panics if a child was not created by this builder.
    pub fn node(&mut self, token: Token, left: Option<NodeId>, right: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        for child in left.into_iter().chain(right) {
            let child = &mut self.nodes[child.0];
            debug_assert!(child.parent.is_none(), "node attached to two parents");
            child.parent = Some(id);
        }

        self.nodes.push(Node {
            token,
            left,
            right,
            parent: None,
        });
        id
    }

    /// Creates a node without children.
    pub fn leaf(&mut self, token: Token) -> NodeId {
        self.node(token, None, None)
    }

    /// Creates a unary function application. The operand becomes the left child.
    pub fn unary(&mut self, token: Token, operand: NodeId) -> NodeId {
        self.node(token, Some(operand), None)
    }

    /// Creates a binary operation.
    pub fn binary(&mut self, token: Token, left: NodeId, right: NodeId) -> NodeId {
        self.node(token, Some(left), Some(right))
    }

    /// Creates a lambda abstraction. The parameter leaf becomes the left child and the body the
    /// right child.
    pub fn lambda(&mut self, token: Token, param: NodeId, body: NodeId) -> NodeId {
        self.node(token, Some(param), Some(body))
    }

    /// Finishes the tree with the given root.
    ///
    /// Nodes that are not reachable from `root` are discarded. The remaining nodes are renumbered
    /// in pre-order, so ids handed out by the builder are not valid in the finished tree.
    ///
    /// # Panics
    ///
    /// Panics if `root` was not created by this builder.
    pub fn finish(self, root: NodeId) -> Tree {
        // first pass: assign the new ids in pre-order
        let mut remap = vec![None; self.nodes.len()];
        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            remap[id.0] = Some(NodeId(order.len()));
            order.push(id);

            let node = &self.nodes[id.0];
            stack.extend(node.right);
            stack.extend(node.left);
        }

        // second pass: move the nodes into their new slots
        let lookup = |id: Option<NodeId>| id.and_then(|id| remap[id.0]);
        let mut slots = self.nodes.into_iter().map(Some).collect::<Vec<_>>();
        let nodes = order
            .into_iter()
            .filter_map(|old| slots[old.0].take())
            .map(|node| Node {
                left: lookup(node.left),
                right: lookup(node.right),
                parent: lookup(node.parent),
                token: node.token,
            })
            .collect::<Vec<_>>();

        let mut tree = Tree { nodes, root: Some(NodeId(0)) };
        tree.nodes[0].parent = None;
        tree
    }
}

#[cfg(test)]
mod tests {
    use crate::tokenizer::TokenKind;
    use pretty_assertions::assert_eq;
    use super::*;

    fn token(kind: TokenKind, text: &str) -> Token {
        Token::new(kind, text, 0..0)
    }

    #[test]
    fn finish_renumbers_in_pre_order() {
        let mut builder = TreeBuilder::new();
        let x = builder.leaf(token(TokenKind::Identifier, "x"));
        let param = builder.leaf(token(TokenKind::Identifier, "x"));
        let body = builder.unary(token(TokenKind::UnaryOperator, "abs"), x);
        let root = builder.lambda(token(TokenKind::Lambda, "lambda"), param, body);
        let tree = builder.finish(root);

        let ids = tree.pre_order().map(|node| node.id().index()).collect::<Vec<_>>();
        assert_eq!(ids, [0, 1, 2, 3]);
        assert_eq!(tree.root().unwrap().text(), "lambda");
    }

    #[test]
    fn finish_discards_unreachable_nodes() {
        let mut builder = TreeBuilder::new();
        builder.leaf(token(TokenKind::Number, "1"));
        let two = builder.leaf(token(TokenKind::Number, "2"));
        let tree = builder.finish(two);

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root().unwrap().text(), "2");
    }

    #[test]
    fn finish_on_inner_node_detaches_it() {
        let mut builder = TreeBuilder::new();
        let a = builder.leaf(token(TokenKind::Identifier, "a"));
        let b = builder.leaf(token(TokenKind::Identifier, "b"));
        let plus = builder.binary(token(TokenKind::BinaryOperator, "+"), a, b);
        let c = builder.leaf(token(TokenKind::Identifier, "c"));
        builder.binary(token(TokenKind::BinaryOperator, "*"), plus, c);
        let tree = builder.finish(plus);

        let root = tree.root().unwrap();
        assert!(root.is_root());
        assert_eq!(tree.len(), 3);
    }

    #[test]
    #[should_panic]
    fn foreign_child_panics() {
        let mut other = TreeBuilder::new();
        other.leaf(token(TokenKind::Number, "1"));
        let foreign = other.leaf(token(TokenKind::Number, "2"));

        let mut builder = TreeBuilder::new();
        builder.unary(token(TokenKind::UnaryOperator, "abs"), foreign);
    }

    #[test]
    #[should_panic]
    fn foreign_root_panics() {
        let mut other = TreeBuilder::new();
        other.leaf(token(TokenKind::Number, "1"));
        let foreign = other.leaf(token(TokenKind::Number, "2"));

        TreeBuilder::new().finish(foreign);
    }
}
