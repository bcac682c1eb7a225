//! Snapshot diffs across named groups (packages, applications)

use indexmap::IndexMap;
use log::debug;
use rayon::prelude::*;

use super::snapshot::{diff_snapshots, ordered_union, FileDiff, SizeSnapshot};

/// Group name (manifest `name`) to that group's size snapshot
pub type GroupedSnapshots = IndexMap<String, SizeSnapshot>;

/// Group name to its per-file diffs, only for groups that survived the noise filter
pub type GroupedDiff = IndexMap<String, Vec<FileDiff>>;

/// Net change (bytes) below which a package group is dropped
pub const PACKAGE_NOISE_THRESHOLD: u64 = 10;

/// Net change (bytes) below which an application group is dropped
pub const APPLICATION_NOISE_THRESHOLD: u64 = 10;

/// Signed sum of all deltas in a group
///
/// Offsetting changes cancel out: `[+6, -5]` nets to `+1`.
pub fn net_delta(diffs: &[FileDiff]) -> i64 {
    diffs.iter().map(|d| d.delta).sum()
}

/// Diff every group present on either side, dropping groups whose net change
/// is below `noise_threshold`
///
/// Group order follows [`ordered_union`]; a group missing on one side is
/// diffed against an empty snapshot.
///
/// # Examples
///
/// ```
/// use size_report::diff::{aggregate, GroupedSnapshots, SizeSnapshot, PACKAGE_NOISE_THRESHOLD};
///
/// let before = GroupedSnapshots::from([(
///     "@scope/ui".to_string(),
///     SizeSnapshot::from([("/dist/index.js".to_string(), 1000)]),
/// )]);
/// let after = GroupedSnapshots::from([(
///     "@scope/ui".to_string(),
///     SizeSnapshot::from([("/dist/index.js".to_string(), 1004)]),
/// )]);
///
/// // A 4 byte net change is noise
/// assert!(aggregate(&before, &after, PACKAGE_NOISE_THRESHOLD).is_empty());
/// ```
pub fn aggregate(
    before: &GroupedSnapshots,
    after: &GroupedSnapshots,
    noise_threshold: u64,
) -> GroupedDiff {
    let empty = SizeSnapshot::new();
    let groups = ordered_union(
        before.keys().map(String::as_str),
        after.keys().map(String::as_str),
    );

    let surviving: Vec<(String, Vec<FileDiff>)> = groups
        .par_iter()
        .filter_map(|group| {
            let diffs = diff_snapshots(
                before.get(*group).unwrap_or(&empty),
                after.get(*group).unwrap_or(&empty),
            );
            let net = net_delta(&diffs);

            if net.unsigned_abs() < noise_threshold {
                debug!(
                    "Dropping group {} (net change {} B is below {} B)",
                    group, net, noise_threshold
                );
                return None;
            }

            Some((group.to_string(), diffs))
        })
        .collect();

    surviving.into_iter().collect()
}
