//! Property tests for the snapshot differ.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use proptest::prelude::*;

use wampa::domain::entities::{ChangeKind, ModMarker, Snapshot, SnapshotTable};
use wampa::domain::services::diff;

/// (exists, mtime tick, len) per path index
type RawTable = HashMap<u8, (bool, u8, u8)>;

fn raw_table() -> impl Strategy<Value = RawTable> {
    proptest::collection::hash_map(0u8..12, (any::<bool>(), 0u8..3, 0u8..3), 0..10)
}

fn build(raw: &RawTable) -> SnapshotTable {
    raw.iter()
        .map(|(idx, (exists, tick, len))| {
            let path = PathBuf::from(format!("/src/{idx}.md"));
            let snapshot = if *exists {
                let modified = SystemTime::UNIX_EPOCH + Duration::from_secs(u64::from(*tick));
                Snapshot::present(&path, ModMarker::new(Some(modified), u64::from(*len)))
            } else {
                Snapshot::missing(&path)
            };
            (path, snapshot)
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: every path gets exactly the change its presence and equality call for.
    #[test]
    fn property_diff_reports_each_change_exactly_once(
        current_raw in raw_table(),
        previous_raw in raw_table(),
    ) {
        let current = build(&current_raw);
        let previous = build(&previous_raw);

        let changes = diff(&current, &previous);

        let unique: HashSet<_> = changes.iter().map(|c| c.path.clone()).collect();
        prop_assert_eq!(unique.len(), changes.len());

        for change in &changes {
            let expected = match (current.get(&change.path), previous.get(&change.path)) {
                (Some(_), None) => ChangeKind::New,
                (None, Some(_)) => ChangeKind::Removed,
                (Some(cur), Some(prev)) => {
                    prop_assert_ne!(cur, prev);
                    ChangeKind::Modified
                }
                (None, None) => unreachable!("diff reported an unknown path"),
            };
            prop_assert_eq!(change.kind, expected);
        }

        let all_paths: HashSet<_> = current.keys().chain(previous.keys()).cloned().collect();
        for path in all_paths {
            let changed = match (current.get(&path), previous.get(&path)) {
                (Some(cur), Some(prev)) => cur != prev,
                _ => true,
            };
            prop_assert_eq!(changed, unique.contains(&path));
        }
    }

    /// PROPERTY: a table never differs from itself.
    #[test]
    fn property_diff_of_identical_tables_is_empty(raw in raw_table()) {
        let table = build(&raw);
        prop_assert!(diff(&table, &table).is_empty());
    }
}
