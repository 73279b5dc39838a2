use std::str::FromStr;
use super::{NodeId, NodeRef, Tree};

/// The order in which a [`Traversal`] visits nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Node, then left subtree, then right subtree.
    Pre,

    /// Left subtree, then node, then right subtree.
    In,

    /// Left subtree, then right subtree, then node.
    Post,
}

impl FromStr for Order {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pre" => Ok(Self::Pre),
            "in" => Ok(Self::In),
            "post" => Ok(Self::Post),
            _ => Err("expected one of `pre`, `in`, or `post`"),
        }
    }
}

/// An iterator that iteratively traverses a tree (or one of its subtrees) in a given [`Order`].
///
/// This iterator is created by [`Tree::traverse`] and [`NodeRef::traverse`].
pub struct Traversal<'tree> {
    tree: &'tree Tree,
    order: Order,

    /// Pending nodes. A node marked `true` has already had its children scheduled and is yielded
    /// when popped.
    stack: Vec<(NodeId, bool)>,
}

impl<'tree> Traversal<'tree> {
    pub(crate) fn new(tree: &'tree Tree, start: Option<NodeId>, order: Order) -> Self {
        Self {
            tree,
            order,
            stack: start.map(|id| (id, false)).into_iter().collect(),
        }
    }
}

impl<'tree> Iterator for Traversal<'tree> {
    type Item = NodeRef<'tree>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (id, expanded) = self.stack.pop()?;
            if expanded {
                return Some(NodeRef { tree: self.tree, id });
            }

            // push in reverse, so that the first item to visit ends up on top
            let node = &self.tree.nodes[id.0];
            let left = node.left.map(|id| (id, false));
            let right = node.right.map(|id| (id, false));
            let this = Some((id, true));
            let scheduled = match self.order {
                Order::Pre => [right, left, this],
                Order::In => [right, this, left],
                Order::Post => [this, right, left],
            };
            self.stack.extend(scheduled.into_iter().flatten());
        }
    }
}
