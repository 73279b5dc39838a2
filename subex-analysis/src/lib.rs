//! Structural analyses over expression trees produced by [`subex_parser`].
//!
//! - [`canonical`] renders a subtree as a signature that is equal for subtrees that only differ
//!   in the order of the operands of `+` and `*`.
//! - [`subexpr::find`] reports the maximal repeated subexpressions of a tree.
//! - [`closed::find_maximally_closed`] reports the maximal subexpressions without free variables.
//!
//! Every analysis only reads the tree, and every result borrows from it.

pub mod canonical;
pub mod closed;
pub mod subexpr;

pub use canonical::canonical;
pub use closed::{find_maximally_closed, is_closed};
pub use subexpr::RepeatedSubexpression;
