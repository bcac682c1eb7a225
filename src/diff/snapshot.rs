//! Per-file size deltas between two snapshots of one group

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;

/// Relative file path (or page route) to byte size, in discovery order
pub type SizeSnapshot = IndexMap<String, u64>;

/// Size change of a single file between the base and head snapshots
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDiff {
    /// File path or page route
    pub filename: String,
    /// Size on the base branch, 0 when absent
    pub before: u64,
    /// Size on the head branch, 0 when absent
    pub after: u64,
    /// `after - before`
    pub delta: i64,
}

impl FileDiff {
    /// Create a diff entry, deriving the delta
    pub fn new(filename: impl Into<String>, before: u64, after: u64) -> Self {
        Self {
            filename: filename.into(),
            before,
            after,
            delta: after as i64 - before as i64,
        }
    }

    /// Classify the entry by comparing its sizes
    ///
    /// # Examples
    ///
    /// ```
    /// use size_report::diff::{DiffStatus, FileDiff};
    ///
    /// assert_eq!(FileDiff::new("a.js", 0, 500).status(), DiffStatus::Added);
    /// assert_eq!(FileDiff::new("a.js", 500, 0).status(), DiffStatus::Removed);
    /// assert_eq!(FileDiff::new("a.js", 500, 500).status(), DiffStatus::Unchanged);
    /// assert_eq!(FileDiff::new("a.js", 500, 600).status(), DiffStatus::Modified);
    /// ```
    pub fn status(&self) -> DiffStatus {
        if self.delta == 0 {
            DiffStatus::Unchanged
        } else if self.before == 0 {
            DiffStatus::Added
        } else if self.after == 0 {
            DiffStatus::Removed
        } else {
            DiffStatus::Modified
        }
    }
}

/// Row status shown in report tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffStatus {
    /// Same size on both branches
    Unchanged,
    /// Only present on the head branch
    Added,
    /// Only present on the base branch
    Removed,
    /// Present on both with different sizes
    Modified,
}

/// Union of two key sequences: `first` in order, then unseen keys of `second`
///
/// Duplicates are dropped on their first occurrence.
///
/// # Examples
///
/// ```
/// use size_report::diff::ordered_union;
///
/// let keys = ordered_union(["b", "a"], ["a", "c", "b", "d"]);
/// assert_eq!(keys, vec!["b", "a", "c", "d"]);
/// ```
pub fn ordered_union<'a>(
    first: impl IntoIterator<Item = &'a str>,
    second: impl IntoIterator<Item = &'a str>,
) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    first
        .into_iter()
        .chain(second)
        .filter(|key| seen.insert(*key))
        .collect()
}

/// Reconcile two snapshots into one diff per file present on either side
///
/// # Examples
///
/// ```
/// use size_report::diff::{diff_snapshots, SizeSnapshot};
///
/// let before = SizeSnapshot::from([("index.js".to_string(), 1000)]);
/// let after = SizeSnapshot::from([
///     ("index.js".to_string(), 1200),
///     ("chunk.js".to_string(), 300),
/// ]);
///
/// let diffs = diff_snapshots(&before, &after);
/// assert_eq!(diffs.len(), 2);
/// assert_eq!(diffs[0].delta, 200);
/// assert_eq!(diffs[1].before, 0);
/// ```
pub fn diff_snapshots(before: &SizeSnapshot, after: &SizeSnapshot) -> Vec<FileDiff> {
    ordered_union(
        before.keys().map(String::as_str),
        after.keys().map(String::as_str),
    )
    .into_iter()
    .map(|filename| {
        FileDiff::new(
            filename,
            before.get(filename).copied().unwrap_or(0),
            after.get(filename).copied().unwrap_or(0),
        )
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(entries: &[(&str, u64)]) -> SizeSnapshot {
        entries
            .iter()
            .map(|(name, size)| (name.to_string(), *size))
            .collect()
    }

    #[test]
    fn test_diff_snapshots_orders_base_keys_first() {
        let before = snapshot(&[("b.js", 10), ("a.js", 20)]);
        let after = snapshot(&[("c.js", 5), ("a.js", 25), ("b.js", 10)]);

        let names: Vec<_> = diff_snapshots(&before, &after)
            .into_iter()
            .map(|d| d.filename)
            .collect();

        assert_eq!(names, vec!["b.js", "a.js", "c.js"]);
    }

    #[test]
    fn test_diff_snapshots_treats_missing_side_as_zero() {
        let before = snapshot(&[("removed.js", 400)]);
        let after = snapshot(&[("added.js", 300)]);

        let diffs = diff_snapshots(&before, &after);

        assert_eq!(diffs[0], FileDiff::new("removed.js", 400, 0));
        assert_eq!(diffs[0].delta, -400);
        assert_eq!(diffs[1], FileDiff::new("added.js", 0, 300));
        assert_eq!(diffs[1].delta, 300);
    }

    #[test]
    fn test_diff_snapshots_with_empty_inputs_is_empty() {
        assert!(diff_snapshots(&SizeSnapshot::new(), &SizeSnapshot::new()).is_empty());
    }

    #[test]
    fn test_status_prefers_unchanged_over_added() {
        // Zero on both sides is unchanged, not added
        assert_eq!(FileDiff::new("empty.js", 0, 0).status(), DiffStatus::Unchanged);
    }

    use proptest::prelude::*;

    fn arb_snapshot() -> impl Strategy<Value = SizeSnapshot> {
        prop::collection::vec(("[a-e]{1,2}\\.js", 0u64..100_000), 0..12)
            .prop_map(|entries| entries.into_iter().collect())
    }

    proptest! {
        /// Property: every filename of either side appears exactly once
        #[test]
        fn prop_every_file_appears_once(before in arb_snapshot(), after in arb_snapshot()) {
            let diffs = diff_snapshots(&before, &after);
            let names: HashSet<&str> = diffs.iter().map(|d| d.filename.as_str()).collect();

            prop_assert_eq!(names.len(), diffs.len());
            for key in before.keys().chain(after.keys()) {
                prop_assert!(names.contains(key.as_str()));
            }
        }

        /// Property: delta is after minus before with zero for missing keys
        #[test]
        fn prop_delta_matches_sizes(before in arb_snapshot(), after in arb_snapshot()) {
            for diff in diff_snapshots(&before, &after) {
                let b = before.get(&diff.filename).copied().unwrap_or(0);
                let a = after.get(&diff.filename).copied().unwrap_or(0);
                prop_assert_eq!(diff.before, b);
                prop_assert_eq!(diff.after, a);
                prop_assert_eq!(diff.delta, a as i64 - b as i64);
            }
        }

        /// Property: diffing a snapshot against itself yields no change
        #[test]
        fn prop_self_diff_is_all_zero(snapshot in arb_snapshot()) {
            let diffs = diff_snapshots(&snapshot, &snapshot);
            prop_assert_eq!(diffs.len(), snapshot.len());
            prop_assert!(diffs.iter().all(|d| d.delta == 0));
        }
    }
}
