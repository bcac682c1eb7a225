//! Size snapshot reconciliation
//!
//! - [`snapshot`]: per-file deltas between two flat size maps
//! - [`grouped`]: the same reconciliation across packages/applications, with
//!   noise suppression for groups whose net change is negligible

pub mod grouped;
pub mod snapshot;

pub use grouped::{
    aggregate, net_delta, GroupedDiff, GroupedSnapshots, APPLICATION_NOISE_THRESHOLD,
    PACKAGE_NOISE_THRESHOLD,
};
pub use snapshot::{diff_snapshots, ordered_union, DiffStatus, FileDiff, SizeSnapshot};
