//! Property tests for the output formatter.

use std::collections::HashMap;

use proptest::prelude::*;

use wampa::domain::services::format;
use wampa::Source;

fn file_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z]{1,8}\\.md").unwrap()
}

fn content() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 #\\n]{0,40}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: output depends on the source list, not on how the content map was built.
    #[test]
    fn property_format_ignores_map_insertion_order(
        entries in proptest::collection::vec((file_name(), content()), 0..8),
    ) {
        let sources: Vec<Source> = entries
            .iter()
            .map(|(name, _)| Source::parse(name.clone()))
            .collect();

        let forward: HashMap<String, String> = entries.iter().cloned().collect();
        let backward: HashMap<String, String> = entries.iter().rev().cloned().collect();
        let mut rebuilt = HashMap::with_capacity(64);
        for name in forward.keys() {
            rebuilt.insert(name.clone(), forward[name].clone());
        }

        let a = format(&sources, &forward);
        let b = format(&sources, &rebuilt);
        prop_assert_eq!(&a, &b);

        // Reversed insertion picks the first entry for duplicate names; only
        // compare when names are unique.
        if forward.len() == entries.len() {
            prop_assert_eq!(&a, &format(&sources, &backward));
        }
    }

    /// PROPERTY: each present source contributes one delimiter line, in list order.
    #[test]
    fn property_format_emits_one_block_per_present_source(
        names in proptest::collection::vec(file_name(), 0..8),
        present in proptest::collection::vec(any::<bool>(), 8),
    ) {
        let sources: Vec<Source> = names.iter().map(|n| Source::parse(n.clone())).collect();
        let contents: HashMap<String, String> = names
            .iter()
            .zip(&present)
            .filter(|(_, keep)| **keep)
            .map(|(n, _)| (n.clone(), format!("body of {n}")))
            .collect();

        let out = String::from_utf8(format(&sources, &contents)).unwrap();

        let expected: Vec<String> = names
            .iter()
            .filter(|n| contents.contains_key(*n))
            .map(|n| format!("[//]: # \"filepath: {n}\""))
            .collect();
        let delimiters: Vec<String> = out
            .lines()
            .filter(|l| l.starts_with("[//]: # \"filepath: "))
            .map(str::to_string)
            .collect();

        prop_assert_eq!(delimiters, expected.clone());
        if expected.is_empty() {
            prop_assert_eq!(out, "");
        } else {
            prop_assert!(!out.ends_with("\n\n"));
        }
    }
}
