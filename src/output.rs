//! JSON output formatting for CI integration

use indexmap::IndexMap;
use serde::Serialize;

use crate::comparison::Comparison;
use crate::config::{Compression, ReportSettings};
use crate::deps::DependencyChange;
use crate::diff::{net_delta, DiffStatus, FileDiff, GroupedDiff};
use crate::i18n::Locale;
use crate::publish::PublishOutcome;

/// JSON output structure for CI tools
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Report language
    pub locale: Locale,
    /// Compression the sizes were measured with
    pub compression: Compression,
    /// Changed application groups
    pub applications: Vec<GroupSummary>,
    /// Changed package groups
    pub packages: Vec<GroupSummary>,
    /// Dependency changes per package, packages without changes left out
    pub dependencies: IndexMap<String, Vec<DependencyChange>>,
    /// Rendered markdown report, empty when nothing changed
    pub report: String,
    /// Publishing result (if the report was published)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<PublishOutcome>,
}

/// One group's diff in JSON output
#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary {
    /// Group name
    pub name: String,
    /// Sum of head sizes in bytes
    pub total_size: u64,
    /// Signed net change in bytes
    pub net_delta: i64,
    /// Per-file rows
    pub files: Vec<FileSummary>,
}

/// One file row in JSON output
#[derive(Debug, Clone, Serialize)]
pub struct FileSummary {
    /// File path or page route
    pub filename: String,
    /// Size on the base branch
    pub before: u64,
    /// Size on the head branch
    pub after: u64,
    /// Signed change
    pub delta: i64,
    /// Row classification
    pub status: DiffStatus,
}

impl From<&FileDiff> for FileSummary {
    fn from(diff: &FileDiff) -> Self {
        Self {
            filename: diff.filename.clone(),
            before: diff.before,
            after: diff.after,
            delta: diff.delta,
            status: diff.status(),
        }
    }
}

fn summarize(groups: &GroupedDiff) -> Vec<GroupSummary> {
    groups
        .iter()
        .map(|(name, files)| GroupSummary {
            name: name.clone(),
            total_size: files.iter().map(|f| f.after).sum(),
            net_delta: net_delta(files),
            files: files.iter().map(FileSummary::from).collect(),
        })
        .collect()
}

impl JsonOutput {
    /// Build JSON output from a finished comparison
    pub fn new(comparison: &Comparison, settings: &ReportSettings) -> Self {
        Self {
            locale: settings.locale,
            compression: settings.compression,
            applications: summarize(&comparison.applications),
            packages: summarize(&comparison.packages),
            dependencies: comparison
                .dependencies
                .iter()
                .filter(|(_, changes)| !changes.is_empty())
                .map(|(name, changes)| (name.clone(), changes.clone()))
                .collect(),
            report: comparison.report.clone(),
            published: None,
        }
    }

    /// Add the publishing result
    pub fn with_published(mut self, outcome: PublishOutcome) -> Self {
        self.published = Some(outcome);
        self
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| anyhow::anyhow!("Failed to serialize JSON output: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comparison() -> Comparison {
        Comparison {
            applications: GroupedDiff::new(),
            packages: GroupedDiff::from([(
                "@scope/ui".to_string(),
                vec![
                    FileDiff::new("/dist/index.js", 1000, 1500),
                    FileDiff::new("/dist/old.js", 200, 0),
                ],
            )]),
            dependencies: IndexMap::from([
                (
                    "@scope/ui".to_string(),
                    vec![DependencyChange::added("left-pad", "^1.3.0", 1024)],
                ),
                ("@scope/utils".to_string(), Vec::new()),
            ]),
            report: "## NPM Packages".to_string(),
        }
    }

    #[test]
    fn test_group_summary_totals() {
        let output = JsonOutput::new(&comparison(), &ReportSettings::default());

        assert_eq!(output.packages.len(), 1);
        assert_eq!(output.packages[0].total_size, 1500);
        assert_eq!(output.packages[0].net_delta, 300);
        assert_eq!(output.packages[0].files[1].status, DiffStatus::Removed);
    }

    #[test]
    fn test_packages_without_dependency_changes_are_left_out() {
        let output = JsonOutput::new(&comparison(), &ReportSettings::default());
        assert_eq!(output.dependencies.len(), 1);
        assert!(output.dependencies.contains_key("@scope/ui"));
    }

    #[test]
    fn test_serialized_shape() {
        let output = JsonOutput::new(&comparison(), &ReportSettings::default())
            .with_published(PublishOutcome::Updated(12));
        let value: serde_json::Value = serde_json::from_str(&output.to_json().unwrap()).unwrap();

        assert_eq!(value["locale"], "en");
        assert_eq!(value["compression"], "gzip");
        assert_eq!(value["packages"][0]["files"][0]["status"], "modified");
        assert_eq!(value["dependencies"]["@scope/ui"][0]["kind"], "added");
        assert_eq!(value["published"]["updated"], 12);
    }

    #[test]
    fn test_unpublished_output_has_no_published_key() {
        let output = JsonOutput::new(&comparison(), &ReportSettings::default());
        let json = output.to_json().unwrap();
        assert!(!json.contains("\"published\""));
    }
}
