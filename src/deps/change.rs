//! Categorized dependency changes and their display texts

use serde::Serialize;

use super::range::VersionBump;
use crate::fmt::{format_percentage, format_signed_bytes, format_size, percentage};
use crate::i18n::MessageKey;

/// How a dependency changed between the base and head manifests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Only declared on the head branch
    Added,
    /// Minimum version moved up
    Updated,
    /// Minimum version did not move up
    Downgraded,
    /// Only declared on the base branch
    Removed,
}

impl ChangeKind {
    /// Status label key for report tables
    pub fn message_key(&self) -> MessageKey {
        match self {
            ChangeKind::Added => MessageKey::PackageAdded,
            ChangeKind::Updated => MessageKey::PackageUpdated,
            ChangeKind::Downgraded => MessageKey::PackageDowngraded,
            ChangeKind::Removed => MessageKey::PackageRemoved,
        }
    }
}

/// One reportable dependency change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyChange {
    /// Dependency name
    pub package: String,
    /// Change category
    pub kind: ChangeKind,
    /// Declared range on the base branch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_version: Option<String>,
    /// Declared range on the head branch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_version: Option<String>,
    /// Semver distance of an update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bump: Option<VersionBump>,
    /// Rendered size cell
    pub bundle_size_text: String,
    /// Rendered change cell
    pub diff_text: String,
}

impl DependencyChange {
    /// A dependency only present on the head branch
    ///
    /// # Examples
    ///
    /// ```
    /// use size_report::deps::{ChangeKind, DependencyChange};
    ///
    /// let change = DependencyChange::added("left-pad", "^1.3.0", 1024);
    /// assert_eq!(change.kind, ChangeKind::Added);
    /// assert_eq!(change.bundle_size_text, "`1.02 kB`");
    /// assert_eq!(change.diff_text, change.bundle_size_text);
    /// ```
    pub fn added(package: &str, updated_version: &str, size: u64) -> Self {
        let text = format!("`{}`", format_size(size));
        Self {
            package: package.to_string(),
            kind: ChangeKind::Added,
            previous_version: None,
            updated_version: Some(updated_version.to_string()),
            bump: None,
            bundle_size_text: text.clone(),
            diff_text: text,
        }
    }

    /// A dependency only present on the base branch
    pub fn removed(package: &str, previous_version: &str, size: u64) -> Self {
        let text = format!("`-{}`", format_size(size));
        Self {
            package: package.to_string(),
            kind: ChangeKind::Removed,
            previous_version: Some(previous_version.to_string()),
            updated_version: None,
            bump: None,
            bundle_size_text: text.clone(),
            diff_text: text,
        }
    }

    /// A dependency whose minimum version moved between branches
    ///
    /// `bump` is `None` for downgrades.
    ///
    /// # Examples
    ///
    /// ```
    /// use size_report::deps::{DependencyChange, VersionBump};
    ///
    /// let change = DependencyChange::changed(
    ///     "zod",
    ///     "^3.21.0",
    ///     "^3.22.0",
    ///     Some(VersionBump::Minor),
    ///     1000,
    ///     1200,
    /// );
    /// assert_eq!(change.bundle_size_text, "`+1 kB` → `+1.2 kB`");
    /// assert_eq!(change.diff_text, "`+200 B (+20%)`");
    /// ```
    pub fn changed(
        package: &str,
        previous_version: &str,
        updated_version: &str,
        bump: Option<VersionBump>,
        base_size: u64,
        head_size: u64,
    ) -> Self {
        let kind = if bump.is_some() {
            ChangeKind::Updated
        } else {
            ChangeKind::Downgraded
        };

        let sign = if base_size > 0 { "+" } else { "" };
        let bundle_size_text = format!(
            "`{}{}` → `{}{}`",
            sign,
            format_size(base_size),
            sign,
            format_size(head_size)
        );

        let delta = head_size as i64 - base_size as i64;
        let percent = percentage(delta, base_size as i64)
            .map(|p| format!(" ({})", format_percentage(p)))
            .unwrap_or_default();
        let diff_text = format!("`{}{}`", format_signed_bytes(delta), percent);

        Self {
            package: package.to_string(),
            kind,
            previous_version: Some(previous_version.to_string()),
            updated_version: Some(updated_version.to_string()),
            bump,
            bundle_size_text,
            diff_text,
        }
    }

    /// Version shown in the package cell: head range, else base range
    pub fn display_version(&self) -> &str {
        self.updated_version
            .as_deref()
            .or(self.previous_version.as_deref())
            .unwrap_or_default()
    }
}

/// One-line summary of a change for logs
pub(crate) fn describe(change: &DependencyChange) -> String {
    format!(
        "{} {:?} {} -> {} ({})",
        change.package,
        change.kind,
        change.previous_version.as_deref().unwrap_or("-"),
        change.updated_version.as_deref().unwrap_or("-"),
        change.diff_text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removed_texts_are_negative_sizes() {
        let change = DependencyChange::removed("lodash", "^4.17.21", 1_400_000);
        assert_eq!(change.bundle_size_text, "`-1.4 MB`");
        assert_eq!(change.diff_text, "`-1.4 MB`");
        assert_eq!(change.previous_version.as_deref(), Some("^4.17.21"));
        assert!(change.updated_version.is_none());
    }

    #[test]
    fn test_changed_without_base_size_omits_plus_and_percentage() {
        let change = DependencyChange::changed("zod", "^3.0.0", "^3.1.0", Some(VersionBump::Minor), 0, 500);
        assert_eq!(change.bundle_size_text, "`0 B` → `500 B`");
        assert_eq!(change.diff_text, "`+500 B`");
    }

    #[test]
    fn test_downgrade_has_no_bump() {
        let change = DependencyChange::changed("react", "^18.2.0", "^17.0.2", None, 300_000, 280_000);
        assert_eq!(change.kind, ChangeKind::Downgraded);
        assert_eq!(change.diff_text, "`-20 kB (-7%)`");
    }

    #[test]
    fn test_unchanged_size_diff_text_is_zero() {
        let change = DependencyChange::changed("a", "1.0.0", "1.0.1", Some(VersionBump::Patch), 100, 100);
        assert_eq!(change.diff_text, "`0 B (0%)`");
    }

    #[test]
    fn test_display_version_prefers_updated() {
        let added = DependencyChange::added("a", "^2.0.0", 1);
        let removed = DependencyChange::removed("a", "^1.0.0", 1);
        assert_eq!(added.display_version(), "^2.0.0");
        assert_eq!(removed.display_version(), "^1.0.0");
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let change = DependencyChange::added("a", "^1.0.0", 1);
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(json["kind"], "added");
        assert!(json.get("previous_version").is_none());
    }
}
