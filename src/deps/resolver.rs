//! Reconcile two dependency manifests into reportable changes

use indexmap::IndexMap;
use log::{debug, info};
use rayon::prelude::*;
use semver::Version;

use super::change::{describe, DependencyChange};
use super::range::{min_version, version_bump, VersionBump};
use crate::diff::ordered_union;
use crate::manifest::DependencyManifest;

/// Unpacked size of a published package version
///
/// Implementations never fail: any lookup problem yields 0.
pub trait SizeLookup: Sync {
    /// Unpacked size in bytes of `package` at exactly `version`
    fn unpacked_size(&self, package: &str, version: &str) -> u64;
}

impl<T: SizeLookup + ?Sized> SizeLookup for &T {
    fn unpacked_size(&self, package: &str, version: &str) -> u64 {
        (**self).unpacked_size(package, version)
    }
}

/// A change decided from the manifests alone, before any size lookup
#[derive(Debug)]
enum PlannedChange<'a> {
    Added {
        package: &'a str,
        range: &'a str,
        min: Version,
    },
    Changed {
        package: &'a str,
        previous: &'a str,
        updated: &'a str,
        bump: Option<VersionBump>,
        base_min: Version,
        head_min: Version,
    },
    Removed {
        package: &'a str,
        range: &'a str,
        min: Version,
    },
}

impl PlannedChange<'_> {
    fn materialize(&self, lookup: &dyn SizeLookup) -> DependencyChange {
        match self {
            PlannedChange::Added {
                package,
                range,
                min,
            } => DependencyChange::added(
                package,
                range,
                lookup.unpacked_size(package, &min.to_string()),
            ),
            PlannedChange::Changed {
                package,
                previous,
                updated,
                bump,
                base_min,
                head_min,
            } => {
                let (base_size, head_size) = rayon::join(
                    || lookup.unpacked_size(package, &base_min.to_string()),
                    || lookup.unpacked_size(package, &head_min.to_string()),
                );
                DependencyChange::changed(package, previous, updated, *bump, base_size, head_size)
            }
            PlannedChange::Removed {
                package,
                range,
                min,
            } => DependencyChange::removed(
                package,
                range,
                lookup.unpacked_size(package, &min.to_string()),
            ),
        }
    }
}

fn is_workspace(range: &str) -> bool {
    range.contains("workspace")
}

fn declared<'a>(manifest: &'a DependencyManifest, package: &str) -> Option<&'a str> {
    manifest
        .get(package)
        .map(String::as_str)
        .filter(|range| !range.is_empty())
}

fn plan<'a>(base: &'a DependencyManifest, head: &'a DependencyManifest) -> Vec<PlannedChange<'a>> {
    let mut planned = Vec::new();

    for (package, head_range) in head {
        let base_range = declared(base, package);
        if is_workspace(head_range) || base_range.is_some_and(is_workspace) {
            debug!("Skipping workspace dependency {}", package);
            continue;
        }

        let head_min = min_version(head_range);

        let Some(base_range) = base_range else {
            if let Some(min) = head_min {
                planned.push(PlannedChange::Added {
                    package,
                    range: head_range,
                    min,
                });
            }
            continue;
        };

        let (Some(base_min), Some(head_min)) = (min_version(base_range), head_min) else {
            debug!(
                "Skipping {}: no minimum version for {} or {}",
                package, base_range, head_range
            );
            continue;
        };
        if base_min == head_min {
            continue;
        }

        let bump = if head_min > base_min {
            match version_bump(&base_min, &head_min) {
                Some(bump) => Some(bump),
                None => continue,
            }
        } else {
            None
        };

        planned.push(PlannedChange::Changed {
            package,
            previous: base_range,
            updated: head_range,
            bump,
            base_min,
            head_min,
        });
    }

    for (package, base_range) in base {
        if is_workspace(base_range) || declared(head, package).is_some() {
            continue;
        }
        if let Some(min) = min_version(base_range) {
            planned.push(PlannedChange::Removed {
                package,
                range: base_range,
                min,
            });
        }
    }

    planned
}

/// Categorize every dependency change between two manifests of one group
///
/// Head dependencies come first in head order, followed by removals in base
/// order. Workspace references, unresolvable ranges and equal minimum
/// versions produce no entry. Size lookups run concurrently.
///
/// # Examples
///
/// ```
/// use size_report::deps::{resolve_dependency_changes, ChangeKind, SizeLookup};
/// use size_report::manifest::DependencyManifest;
///
/// struct Fixed;
/// impl SizeLookup for Fixed {
///     fn unpacked_size(&self, _package: &str, _version: &str) -> u64 {
///         1024
///     }
/// }
///
/// let base = DependencyManifest::new();
/// let head = DependencyManifest::from([("left-pad".to_string(), "^1.3.0".to_string())]);
///
/// let changes = resolve_dependency_changes(&base, &head, &Fixed);
/// assert_eq!(changes.len(), 1);
/// assert_eq!(changes[0].kind, ChangeKind::Added);
/// assert_eq!(changes[0].diff_text, "`1.02 kB`");
/// ```
pub fn resolve_dependency_changes(
    base: &DependencyManifest,
    head: &DependencyManifest,
    lookup: &dyn SizeLookup,
) -> Vec<DependencyChange> {
    let planned = plan(base, head);

    let changes: Vec<DependencyChange> = planned
        .par_iter()
        .map(|change| change.materialize(lookup))
        .collect();

    for change in &changes {
        debug!("Dependency change: {}", describe(change));
    }
    changes
}

/// Resolve dependency changes for every group present on either branch
///
/// Groups follow base order, then head-only groups; a group missing on one
/// side is compared against an empty manifest.
pub fn resolve_grouped_dependency_changes(
    base: &IndexMap<String, DependencyManifest>,
    head: &IndexMap<String, DependencyManifest>,
    lookup: &dyn SizeLookup,
) -> IndexMap<String, Vec<DependencyChange>> {
    let empty = DependencyManifest::new();

    let grouped: IndexMap<String, Vec<DependencyChange>> = ordered_union(
        base.keys().map(String::as_str),
        head.keys().map(String::as_str),
    )
    .into_iter()
    .map(|group| {
        let changes = resolve_dependency_changes(
            base.get(group).unwrap_or(&empty),
            head.get(group).unwrap_or(&empty),
            lookup,
        );
        (group.to_string(), changes)
    })
    .collect();

    info!(
        "Resolved {} dependency changes across {} groups",
        grouped.values().map(Vec::len).sum::<usize>(),
        grouped.len()
    );
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deps::ChangeKind;
    use parking_lot::Mutex;
    use std::collections::HashMap;

    /// Lookup answering from a fixed table and recording every query
    struct TableLookup {
        sizes: HashMap<(String, String), u64>,
        queries: Mutex<Vec<(String, String)>>,
    }

    impl TableLookup {
        fn new(entries: &[(&str, &str, u64)]) -> Self {
            Self {
                sizes: entries
                    .iter()
                    .map(|(p, v, s)| ((p.to_string(), v.to_string()), *s))
                    .collect(),
                queries: Mutex::new(Vec::new()),
            }
        }

        fn queried(&self) -> Vec<(String, String)> {
            let mut queries = self.queries.lock().clone();
            queries.sort();
            queries
        }
    }

    impl SizeLookup for TableLookup {
        fn unpacked_size(&self, package: &str, version: &str) -> u64 {
            self.queries
                .lock()
                .push((package.to_string(), version.to_string()));
            self.sizes
                .get(&(package.to_string(), version.to_string()))
                .copied()
                .unwrap_or(0)
        }
    }

    fn manifest(entries: &[(&str, &str)]) -> DependencyManifest {
        entries
            .iter()
            .map(|(name, range)| (name.to_string(), range.to_string()))
            .collect()
    }

    #[test]
    fn test_added_dependency_uses_minimum_version_size() {
        let lookup = TableLookup::new(&[("left-pad", "1.3.0", 1024)]);
        let head = manifest(&[("left-pad", "^1.3.0")]);

        let changes = resolve_dependency_changes(&manifest(&[]), &head, &lookup);

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, ChangeKind::Added);
        assert_eq!(changes[0].updated_version.as_deref(), Some("^1.3.0"));
        assert_eq!(changes[0].bundle_size_text, "`1.02 kB`");
        assert_eq!(changes[0].diff_text, "`1.02 kB`");
    }

    #[test]
    fn test_equal_minimums_are_not_reported() {
        let lookup = TableLookup::new(&[]);
        let base = manifest(&[("react", "^18.2.0")]);
        let head = manifest(&[("react", ">=18.2.0 <19")]);

        assert!(resolve_dependency_changes(&base, &head, &lookup).is_empty());
        assert!(lookup.queried().is_empty());
    }

    #[test]
    fn test_update_reports_bump_and_size_delta() {
        let lookup = TableLookup::new(&[("zod", "3.21.0", 1000), ("zod", "3.22.0", 1200)]);
        let base = manifest(&[("zod", "^3.21.0")]);
        let head = manifest(&[("zod", "^3.22.0")]);

        let changes = resolve_dependency_changes(&base, &head, &lookup);

        assert_eq!(changes[0].kind, ChangeKind::Updated);
        assert_eq!(changes[0].bump, Some(VersionBump::Minor));
        assert_eq!(changes[0].previous_version.as_deref(), Some("^3.21.0"));
        assert_eq!(changes[0].bundle_size_text, "`+1 kB` → `+1.2 kB`");
        assert_eq!(changes[0].diff_text, "`+200 B (+20%)`");
        assert_eq!(
            lookup.queried(),
            vec![
                ("zod".to_string(), "3.21.0".to_string()),
                ("zod".to_string(), "3.22.0".to_string())
            ]
        );
    }

    #[test]
    fn test_lower_minimum_is_a_downgrade() {
        let lookup = TableLookup::new(&[]);
        let base = manifest(&[("react", "^18.2.0")]);
        let head = manifest(&[("react", "^17.0.2")]);

        let changes = resolve_dependency_changes(&base, &head, &lookup);

        assert_eq!(changes[0].kind, ChangeKind::Downgraded);
        assert_eq!(changes[0].bump, None);
    }

    #[test]
    fn test_workspace_references_are_skipped_on_either_side() {
        let lookup = TableLookup::new(&[]);
        let base = manifest(&[("@scope/a", "workspace:*"), ("@scope/b", "^1.0.0")]);
        let head = manifest(&[("@scope/a", "^2.0.0"), ("@scope/b", "workspace:^")]);

        assert!(resolve_dependency_changes(&base, &head, &lookup).is_empty());
    }

    #[test]
    fn test_unresolvable_ranges_are_skipped() {
        let lookup = TableLookup::new(&[]);
        let base = manifest(&[("a", "^1.0.0"), ("gone", "github:user/gone")]);
        let head = manifest(&[("a", "latest"), ("b", "file:../b")]);

        assert!(resolve_dependency_changes(&base, &head, &lookup).is_empty());
    }

    #[test]
    fn test_removals_follow_head_entries_in_base_order() {
        let lookup = TableLookup::new(&[("lodash", "4.17.21", 1_400_000)]);
        let base = manifest(&[("lodash", "^4.17.21"), ("zod", "^3.0.0"), ("clsx", "^1.0.0")]);
        let head = manifest(&[("clsx", "^2.0.0"), ("left-pad", "1.3.0")]);

        let changes = resolve_dependency_changes(&base, &head, &lookup);
        let summary: Vec<_> = changes
            .iter()
            .map(|c| (c.package.as_str(), c.kind))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("clsx", ChangeKind::Updated),
                ("left-pad", ChangeKind::Added),
                ("lodash", ChangeKind::Removed),
                ("zod", ChangeKind::Removed),
            ]
        );
        assert_eq!(changes[2].bundle_size_text, "`-1.4 MB`");
    }

    #[test]
    fn test_empty_base_range_counts_as_absent() {
        let lookup = TableLookup::new(&[]);
        let base = manifest(&[("a", "")]);
        let head = manifest(&[("a", "^1.0.0")]);

        let changes = resolve_dependency_changes(&base, &head, &lookup);
        assert_eq!(changes[0].kind, ChangeKind::Added);
    }

    #[test]
    fn test_grouped_resolution_covers_groups_on_either_side() {
        let lookup = TableLookup::new(&[]);
        let base = IndexMap::from([("old".to_string(), manifest(&[("a", "^1.0.0")]))]);
        let head = IndexMap::from([("new".to_string(), manifest(&[("b", "^1.0.0")]))]);

        let grouped = resolve_grouped_dependency_changes(&base, &head, &lookup);

        assert_eq!(grouped.keys().cloned().collect::<Vec<_>>(), vec!["old", "new"]);
        assert_eq!(grouped["old"][0].kind, ChangeKind::Removed);
        assert_eq!(grouped["new"][0].kind, ChangeKind::Added);
    }
}
