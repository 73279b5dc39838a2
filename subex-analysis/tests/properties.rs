use proptest::prelude::*;
use std::collections::HashSet;
use subex_analysis::{canonical, closed::find_maximally_closed, is_closed, subexpr::find};
use subex_parser::{parse, tokenizer::keyword::UNARY_FUNCTIONS, NodeId};

/// Generates well-formed source text, parenthesizing every compound operand.
fn expression() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        "[a-e]",
        (0u32..20).prop_map(|n| n.to_string()),
    ];
    leaf.prop_recursive(5, 48, 2, |inner| {
        prop_oneof![
            (inner.clone(), prop::sample::select(vec!["+", "-", "*", "/", "^"]), inner.clone())
                .prop_map(|(left, op, right)| format!("({left}) {op} ({right})")),
            (prop::sample::select(UNARY_FUNCTIONS.to_vec()), inner.clone())
                .prop_map(|(function, arg)| format!("{function}({arg})")),
            ("[a-e]", inner.clone())
                .prop_map(|(param, body)| format!("(lambda {param}. {body})")),
            inner.prop_map(|operand| format!("-({operand})")),
        ]
    })
}

proptest! {
    #[test]
    fn commutative_operands(
        a in expression(),
        b in expression(),
        op in prop::sample::select(vec!["+", "*"]),
    ) {
        let ab = parse(&format!("({a}) {op} ({b})")).unwrap();
        let ba = parse(&format!("({b}) {op} ({a})")).unwrap();
        prop_assert_eq!(canonical(ab.root().unwrap()), canonical(ba.root().unwrap()));
    }

    #[test]
    fn tree_shape(source in expression()) {
        let tree = parse(&source).unwrap();
        let root = tree.root().unwrap();
        prop_assert_eq!(tree.len(), root.pre_order().count());
        prop_assert_eq!(tree.height(), root.height());

        for node in tree.pre_order() {
            let counts = node.children().map(|child| child.node_count());
            let heights = node.children().map(|child| child.height());
            prop_assert_eq!(node.pre_order().count(), node.node_count());
            prop_assert_eq!(node.node_count(), 1 + counts.sum::<usize>());
            prop_assert_eq!(node.height(), 1 + heights.max().unwrap_or(0));

            for child in node.children() {
                prop_assert_eq!(child.parent(), Some(node));
            }
        }
    }

    #[test]
    fn display_parses_back(source in expression()) {
        let tree = parse(&source).unwrap();
        let root = tree.root().unwrap();
        let reparsed = parse(&root.to_string()).unwrap();
        prop_assert_eq!(canonical(root), canonical(reparsed.root().unwrap()));
    }

    #[test]
    fn repeated_reports_are_ordered(source in expression()) {
        let tree = parse(&source).unwrap();
        let repeated = find(&tree);

        for report in &repeated {
            prop_assert!(report.count >= 2);
            prop_assert_eq!(report.count, report.occurrences.len());
            for node in &report.occurrences {
                prop_assert_eq!(&canonical(*node), &report.canonical);
                prop_assert_eq!(node.height(), report.height);
            }
        }
        for pair in repeated.windows(2) {
            prop_assert!(pair[0].height >= pair[1].height);
        }
    }

    #[test]
    fn closed_reports_are_maximal(source in expression()) {
        let tree = parse(&source).unwrap();
        let closed = find_maximally_closed(&tree);
        let reported = closed.iter().map(|node| node.id()).collect::<HashSet<NodeId>>();

        for node in &closed {
            prop_assert!(node.ancestors().all(|ancestor| !reported.contains(&ancestor.id())));
        }

        // away from lambdas, closedness only depends on the subtree
        if !source.contains("lambda") {
            for node in &closed {
                prop_assert!(is_closed(*node));
            }
        }
    }
}
