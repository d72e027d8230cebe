//! Diff finalizer
//!
//! Turns an accumulated [`ChangeMapping`] into a [`DependencyDiff`]. An empty
//! mapping means the block has no net change and yields `None`, which is not
//! the same as a diff with three empty lists.

use crate::domain::{ChangeKind, ChangeMapping, DependencyDiff};

/// Partition the mapping by change kind, or `None` if nothing changed
pub fn finalize(mapping: ChangeMapping) -> Option<DependencyDiff> {
    if mapping.is_empty() {
        return None;
    }

    let mut diff = DependencyDiff::default();
    for change in mapping {
        match change.kind {
            ChangeKind::Removed => diff.removed.push(change),
            ChangeKind::Added => diff.added.push(change),
            ChangeKind::Updated => diff.updated.push(change),
        }
    }
    Some(diff)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::git::DiffLine;
    use crate::reconcile::apply_line;
    use proptest::prelude::*;

    const NAMES: [&str; 4] = ["axios", "jest", "lodash", "react"];

    /// Added or removed declaration over a small name pool so records collide
    fn arb_line() -> impl Strategy<Value = DiffLine> {
        (any::<bool>(), 0..NAMES.len(), 1..4u8).prop_map(|(added, idx, major)| {
            let content = format!("\"{}\": \"{}.0.0\",", NAMES[idx], major);
            if added {
                DiffLine::added(content)
            } else {
                DiffLine::removed(content)
            }
        })
    }

    proptest! {
        /// Every live record lands in exactly the list matching its kind
        #[test]
        fn finalize_partitions_mapping(lines in prop::collection::vec(arb_line(), 0..12)) {
            let mut mapping = ChangeMapping::new();
            for line in &lines {
                apply_line(&mut mapping, line).unwrap();
            }
            let expected: Vec<_> = mapping.iter().cloned().collect();

            match finalize(mapping) {
                None => prop_assert!(expected.is_empty()),
                Some(diff) => {
                    prop_assert_eq!(diff.total(), expected.len());
                    prop_assert!(diff.removed.iter().all(|c| c.kind == ChangeKind::Removed));
                    prop_assert!(diff.added.iter().all(|c| c.kind == ChangeKind::Added));
                    prop_assert!(diff.updated.iter().all(|c| c.kind == ChangeKind::Updated));
                    for change in &expected {
                        let list = match change.kind {
                            ChangeKind::Removed => &diff.removed,
                            ChangeKind::Added => &diff.added,
                            ChangeKind::Updated => &diff.updated,
                        };
                        prop_assert!(list.contains(change));
                    }
                }
            }
        }
    }
}
