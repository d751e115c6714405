//! Property-based tests for partial path parsing
//!
//! These tests verify that parsing is total (errors, never panics), that
//! path sets behave like sets, and that selecting a child selects its parent.

use super::{PartialTree, PartialsParser};
use proptest::prelude::*;

fn segment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-z][a-z0-9_]{0,8}",
        1 => Just("*".to_string()),
    ]
}

fn path_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        proptest::collection::vec(segment_strategy(), 1..4).prop_map(|segments| segments.join(".")),
        (
            "[a-z]{1,6}",
            proptest::collection::vec("[a-z]{1,6}", 1..4),
        )
            .prop_map(|(prefix, group)| format!("{}.{{{}}}", prefix, group.join(","))),
    ]
}

proptest! {
    #[test]
    fn parse_never_panics(input in "[a-z.{},* ]{0,30}") {
        let _ = PartialsParser::parse([input]);
    }

    #[test]
    fn generated_paths_always_parse(paths in proptest::collection::vec(path_strategy(), 1..5)) {
        prop_assert!(PartialsParser::parse(&paths).unwrap().is_some());
    }

    #[test]
    fn duplicate_paths_are_idempotent(paths in proptest::collection::vec(path_strategy(), 1..5)) {
        let once = PartialsParser::parse(&paths).unwrap();
        let doubled: Vec<&String> = paths.iter().chain(paths.iter()).collect();
        let twice = PartialsParser::parse(doubled).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn path_order_does_not_matter(paths in proptest::collection::vec(path_strategy(), 1..5)) {
        let forward = PartialsParser::parse(&paths).unwrap();
        let reversed = PartialsParser::parse(paths.iter().rev()).unwrap();
        prop_assert_eq!(forward, reversed);
    }

    #[test]
    fn child_selector_keeps_parent(parent in "[a-z]{1,8}", child in "[a-z]{1,8}") {
        let tree: PartialTree = PartialTree::parse([format!("{parent}.{child}")]).unwrap().unwrap();
        prop_assert!(tree.contains(&parent));
        prop_assert!(tree.get(&parent).unwrap().contains(&child));
    }
}
