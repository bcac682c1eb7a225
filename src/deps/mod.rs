//! Dependency change resolution
//!
//! Compares the runtime dependencies of each group between the base and head
//! branches using npm minimum-satisfying versions, and prices every change
//! through a [`SizeLookup`].

mod change;
pub mod range;
pub mod registry;
mod resolver;

pub use change::{ChangeKind, DependencyChange};
pub use range::{min_version, version_bump, VersionBump, VersionRange};
pub use registry::{CachedLookup, LookupError, NpmRegistry, OfflineLookup};
pub use resolver::{resolve_dependency_changes, resolve_grouped_dependency_changes, SizeLookup};
