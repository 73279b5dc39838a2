//! Detection of repeated subexpressions.
//!
//! Two subtrees are considered the same subexpression if their [canonical forms](crate::canonical)
//! are equal, so `a + b` and `b + a` are occurrences of one pattern. [`find`] reports the largest
//! repeated patterns first and skips smaller patterns that only ever occur inside an already
//! reported one.

use crate::canonical::compose;
use log::{debug, trace};
use std::{
    cmp::Ordering,
    collections::{HashMap, HashSet},
    fmt,
};
use subex_parser::{tokenizer::TokenKind, NodeId, NodeRef, Tree};

/// A subexpression that occurs more than once in a tree.
///
/// The occurrences borrow from the tree that was analyzed, so a report cannot outlive it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatedSubexpression<'tree> {
    /// The canonical form shared by every occurrence.
    pub canonical: String,

    /// The root of every occurrence, in post-order.
    pub occurrences: Vec<NodeRef<'tree>>,

    /// The number of occurrences.
    pub count: usize,

    /// The height of each occurrence.
    pub height: usize,

    /// The number of nodes in each occurrence.
    pub node_count: usize,
}

impl RepeatedSubexpression<'_> {
    /// Returns true if the occurrences are bare identifiers or numbers.
    ///
    /// Such repetitions are rarely interesting to report, but [`find`] keeps them so that callers
    /// can decide for themselves.
    pub fn is_trivial(&self) -> bool {
        self.occurrences
            .first()
            .is_some_and(|node| matches!(node.kind(), TokenKind::Identifier | TokenKind::Number))
    }

    /// Compares two reports by the order in which [`find`] considers them: taller patterns
    /// first, then more frequent, then larger, then by canonical form.
    fn report_order(&self, other: &Self) -> Ordering {
        other.height.cmp(&self.height)
            .then_with(|| other.count.cmp(&self.count))
            .then_with(|| other.node_count.cmp(&self.node_count))
            .then_with(|| self.canonical.cmp(&other.canonical))
    }
}

impl fmt::Display for RepeatedSubexpression<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} -> count: {}", self.canonical, self.count)
    }
}

/// Per-node facts gathered in a single post-order pass.
struct Facts {
    canonical: String,
    height: usize,
    node_count: usize,
}

/// Computes the canonical form, height and node count of every node, bottom-up.
fn gather(tree: &Tree) -> HashMap<NodeId, Facts> {
    let mut facts: HashMap<NodeId, Facts> = HashMap::with_capacity(tree.len());
    for node in tree.post_order() {
        let left = node.left().and_then(|child| facts.get(&child.id()));
        let right = node.right().and_then(|child| facts.get(&child.id()));
        let fact = Facts {
            canonical: compose(
                node,
                left.map(|fact| fact.canonical.as_str()),
                right.map(|fact| fact.canonical.as_str()),
            ),
            height: 1 + left.map_or(0, |f| f.height).max(right.map_or(0, |f| f.height)),
            node_count: 1 + left.map_or(0, |f| f.node_count) + right.map_or(0, |f| f.node_count),
        };
        facts.insert(node.id(), fact);
    }
    facts
}

/// Finds the maximal repeated subexpressions of the given tree.
///
/// Every subtree is grouped by its canonical form, and groups with a single occurrence are
/// dropped. The remaining groups are considered tallest first (then by count, node count, and
/// canonical form). A group is skipped if every one of its occurrences lies inside an occurrence
/// of a group that was already reported; otherwise it is reported, and its occurrences are marked
/// as covered.
///
/// The result is deterministic for a given tree.
///
/// ```
/// use subex_analysis::subexpr::find;
/// use subex_parser::parse;
///
/// let tree = parse("(a + b) * (a + b) + (b + a)").unwrap();
/// let repeated = find(&tree);
/// assert_eq!(repeated[0].canonical, "+(a,b)");
/// assert_eq!(repeated[0].count, 3);
/// ```
pub fn find(tree: &Tree) -> Vec<RepeatedSubexpression<'_>> {
    let facts = gather(tree);

    // group by canonical form, remembering first-seen order so that grouping itself does not
    // depend on hash iteration order
    let mut buckets: Vec<RepeatedSubexpression> = Vec::new();
    let mut index_of: HashMap<&str, usize> = HashMap::new();
    for node in tree.post_order() {
        let Some(fact) = facts.get(&node.id()) else {
            continue;
        };
        match index_of.get(fact.canonical.as_str()) {
            Some(&index) => {
                let bucket = &mut buckets[index];
                bucket.occurrences.push(node);
                bucket.count += 1;
            },
            None => {
                index_of.insert(fact.canonical.as_str(), buckets.len());
                buckets.push(RepeatedSubexpression {
                    canonical: fact.canonical.clone(),
                    occurrences: vec![node],
                    count: 1,
                    height: fact.height,
                    node_count: fact.node_count,
                });
            },
        }
    }
    debug!("grouped {} nodes into {} distinct subexpressions", tree.len(), buckets.len());

    let mut candidates = buckets.into_iter()
        .filter(|bucket| bucket.count >= 2)
        .collect::<Vec<_>>();
    candidates.sort_by(RepeatedSubexpression::report_order);

    let mut covered: HashSet<NodeId> = HashSet::new();
    let mut accepted = Vec::new();
    for candidate in candidates {
        let subsumed = candidate.occurrences.iter()
            .all(|node| node.ancestors().any(|ancestor| covered.contains(&ancestor.id())));
        if subsumed {
            trace!("skipping {}: every occurrence is already covered", candidate.canonical);
            continue;
        }

        covered.extend(candidate.occurrences.iter().map(NodeRef::id));
        accepted.push(candidate);
    }

    debug!("found {} repeated subexpressions", accepted.len());
    accepted
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use subex_parser::parse;
    use super::*;

    /// Renders the reports of [`find`] as `canonical -> count: n` lines.
    fn reports(source: &str) -> Vec<String> {
        let tree = parse(source).unwrap();
        find(&tree).iter().map(ToString::to_string).collect()
    }

    #[test]
    fn no_repetition() {
        assert!(reports("a + b").is_empty());
        assert!(reports("42").is_empty());
    }

    #[test]
    fn repeated_leaf() {
        assert_eq!(reports("x * x"), vec!["x -> count: 2"]);
    }

    #[test]
    fn commutative_occurrences_merge() {
        assert_eq!(reports("(a + b) * (b + a)"), vec!["+(a,b) -> count: 2"]);
    }

    #[test]
    fn non_commutative_occurrences_stay_apart() {
        // a and b are each repeated, but a - b and b - a are different patterns
        assert_eq!(reports("(a - b) * (b - a)"), vec!["a -> count: 2", "b -> count: 2"]);
    }

    #[test]
    fn tallest_first() {
        let tree = parse("(a + b) * (a + b) + (a + b)").unwrap();
        let repeated = find(&tree);
        assert_eq!(repeated.len(), 1);
        assert_eq!(repeated[0].canonical, "+(a,b)");
        assert_eq!(repeated[0].count, 3);
        assert_eq!(repeated[0].height, 2);
        assert_eq!(repeated[0].node_count, 3);
        assert!(repeated[0].occurrences.iter().all(|node| node.text() == "+"));
    }

    #[test]
    fn partially_covered_pattern_is_reported() {
        // the `x` inside `cos(x)` is covered, but the trailing `x` is not
        assert_eq!(
            reports("cos(x) + cos(x) + x"),
            vec!["cos(x) -> count: 2", "x -> count: 3"],
        );
    }

    #[test]
    fn ties_break_by_count_then_canonical() {
        assert_eq!(
            reports("a * b + a * b + a * b + c * d + c * d"),
            vec!["*(a,b) -> count: 3", "*(c,d) -> count: 2"],
        );
        assert_eq!(
            reports("y * z + c * d + c * d + y * z"),
            vec!["*(c,d) -> count: 2", "*(y,z) -> count: 2"],
        );
    }

    #[test]
    fn triviality() {
        let tree = parse("x * x + (1 + y) * (y + 1)").unwrap();
        let repeated = find(&tree);
        let trivial = repeated.iter()
            .map(|report| (report.canonical.as_str(), report.is_trivial()))
            .collect::<Vec<_>>();
        assert_eq!(trivial, vec![("+(1,y)", false), ("x", true)]);
    }
}
