use std::collections::HashMap;

use huffman_text::{analyze, build_huffman_tree, code_for, decode, encode, CodingError, Node};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_round_trip(text in "\\PC{1,200}") {
        let frequencies = analyze(&text).unwrap();
        let tree = build_huffman_tree(&frequencies).unwrap();

        let bits = encode(&tree, tree.leaves(), &text).unwrap();
        prop_assert!(!bits.is_empty());
        prop_assert_eq!(decode(&tree, &bits).unwrap(), text);
    }

    #[test]
    fn test_tree_shape(text in "[a-h ]{1,300}") {
        let tree = build_huffman_tree(&analyze(&text).unwrap()).unwrap();
        prop_assert!(tree.check_invariants());

        for (_, node) in tree.iter() {
            if let Node::Internal { frequency, left, right, .. } = node {
                let l = tree.node(*left).unwrap();
                let r = tree.node(*right).unwrap();
                prop_assert_eq!(*frequency, l.frequency() + r.frequency());
            }
        }
        prop_assert_eq!(tree.root_node().frequency(), text.chars().count() as u64);
    }

    #[test]
    fn test_prefix_free(text in "[a-z0-9]{2,300}") {
        let tree = build_huffman_tree(&analyze(&text).unwrap()).unwrap();
        prop_assume!(!tree.is_single_leaf());

        let codes: HashMap<char, Vec<bool>> = tree
            .leaves()
            .iter()
            .map(|(&c, &id)| (c, code_for(&tree, id)))
            .collect();

        for (a, code_a) in &codes {
            for (b, code_b) in &codes {
                if a != b {
                    prop_assert!(!code_b.starts_with(code_a), "{:?} is a prefix of {:?}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_dropping_last_bit_truncates(text in "[a-e]{1,100}") {
        let tree = build_huffman_tree(&analyze(&text).unwrap()).unwrap();
        prop_assume!(!tree.is_single_leaf());

        let last = text.chars().last().unwrap();
        let last_len = code_for(&tree, tree.leaves()[&last]).len();
        prop_assume!(last_len > 1);

        let mut bits = encode(&tree, tree.leaves(), &text).unwrap();
        bits.pop();
        prop_assert_eq!(
            decode(&tree, &bits),
            Err(CodingError::TruncatedStream { consumed: bits.len() })
        );
    }
}
