//! The expression tree.
//!
//! A [`Tree`] stores its nodes in an arena. Each node owns its children through their
//! [`NodeId`]s, and remembers its parent as a plain id that is only ever used to walk upwards.
//! Dropping the [`Tree`] drops the arena, and with it every node.

pub mod builder;
mod fmt;
pub mod iter;

use crate::tokenizer::{Token, TokenKind};
use std::hash::{Hash, Hasher};

pub use builder::TreeBuilder;
pub use iter::{Order, Traversal};

/// Identifies a node within the [`Tree`] it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the position of the node in its tree's arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// One syntax construct of the expression.
///
/// - [`TokenKind::Number`] and [`TokenKind::Identifier`] nodes are leaves.
/// - [`TokenKind::UnaryOperator`] nodes have only a `left` child, the argument.
/// - [`TokenKind::BinaryOperator`] nodes have both children.
/// - [`TokenKind::Lambda`] nodes have the bound identifier on the `left` and the body on the
///   `right`.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) token: Token,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    /// The token this node was built from.
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// The left child.
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// The right child.
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// The parent, or [`None`] for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns true if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// An immutable expression tree, produced by the parser or a [`TreeBuilder`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tree {
    /// The arena of nodes. Nodes are stored in pre-order, so the root (if any) is at index 0.
    nodes: Vec<Node>,

    /// The root node.
    root: Option<NodeId>,
}

impl Tree {
    /// Creates a tree with no nodes.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the root node, or [`None`] if the tree is empty.
    pub fn root(&self) -> Option<NodeRef<'_>> {
        self.root.map(|id| NodeRef { tree: self, id })
    }

    /// Returns the node with the given id, if it belongs to this tree.
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then_some(NodeRef { tree: self, id })
    }

    /// Returns the number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the height of the tree: 0 if it is empty, 1 if it holds a single leaf, and so on.
    pub fn height(&self) -> usize {
        self.root().map_or(0, |root| root.height())
    }

    /// Returns an iterator over the nodes of the tree in the given order.
    pub fn traverse(&self, order: Order) -> Traversal<'_> {
        Traversal::new(self, self.root, order)
    }

    /// Returns an iterator over the nodes in left, node, right order.
    pub fn in_order(&self) -> Traversal<'_> {
        self.traverse(Order::In)
    }

    /// Returns an iterator over the nodes in node, left, right order.
    pub fn pre_order(&self) -> Traversal<'_> {
        self.traverse(Order::Pre)
    }

    /// Returns an iterator over the nodes in left, right, node order.
    pub fn post_order(&self) -> Traversal<'_> {
        self.traverse(Order::Post)
    }
}

/// A borrowed handle to a node of a [`Tree`], used to navigate the tree in any direction.
///
/// Two handles are equal if they point at the same node of the same tree; equality never looks
/// at the node's contents.
#[derive(Clone, Copy)]
pub struct NodeRef<'tree> {
    tree: &'tree Tree,
    id: NodeId,
}

impl<'tree> NodeRef<'tree> {
    fn node(&self) -> &'tree Node {
        &self.tree.nodes[self.id.0]
    }

    fn with_id(&self, id: NodeId) -> NodeRef<'tree> {
        NodeRef { tree: self.tree, id }
    }

    /// The identity of this node within its tree.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The tree this node belongs to.
    pub fn tree(&self) -> &'tree Tree {
        self.tree
    }

    /// The token this node was built from.
    pub fn token(&self) -> &'tree Token {
        &self.node().token
    }

    /// Shorthand for `self.token().kind`.
    pub fn kind(&self) -> TokenKind {
        self.node().token.kind
    }

    /// Shorthand for `self.token().text`.
    pub fn text(&self) -> &'tree str {
        &self.node().token.text
    }

    pub fn left(&self) -> Option<NodeRef<'tree>> {
        self.node().left.map(|id| self.with_id(id))
    }

    pub fn right(&self) -> Option<NodeRef<'tree>> {
        self.node().right.map(|id| self.with_id(id))
    }

    pub fn parent(&self) -> Option<NodeRef<'tree>> {
        self.node().parent.map(|id| self.with_id(id))
    }

    /// Returns the children of this node, left first.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'tree>> {
        self.left().into_iter().chain(self.right())
    }

    /// Returns the ancestors of this node, starting with its parent and ending with the root.
    pub fn ancestors(&self) -> impl Iterator<Item = NodeRef<'tree>> {
        std::iter::successors(self.parent(), |node| node.parent())
    }

    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }

    pub fn is_root(&self) -> bool {
        self.node().parent.is_none()
    }

    /// Returns the height of the subtree rooted at this node. A leaf has height 1.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![(*self, 1)];
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.children().map(|child| (child, depth + 1)));
        }
        height
    }

    /// Returns the number of nodes in the subtree rooted at this node, including itself.
    pub fn node_count(&self) -> usize {
        self.pre_order().count()
    }

    /// Returns an iterator over the subtree rooted at this node in the given order.
    pub fn traverse(&self, order: Order) -> Traversal<'tree> {
        Traversal::new(self.tree, Some(self.id), order)
    }

    pub fn pre_order(&self) -> Traversal<'tree> {
        self.traverse(Order::Pre)
    }

    pub fn in_order(&self) -> Traversal<'tree> {
        self.traverse(Order::In)
    }

    pub fn post_order(&self) -> Traversal<'tree> {
        self.traverse(Order::Post)
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl Hash for NodeRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("text", &self.text())
            .finish()
    }
}
