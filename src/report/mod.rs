//! Markdown report rendering
//!
//! [`ReportRenderer`] turns grouped diffs and dependency changes into one
//! markdown document. It performs no I/O; an empty document means nothing
//! worth reporting, and the caller decides what to post instead.

mod deps_table;
mod diff_table;
mod icons;
mod table;

use indexmap::IndexMap;
use log::debug;

pub use deps_table::dependency_table;
pub use diff_table::{diff_table, status_key, TableTotals};
pub use icons::{delta_text, severity_icon};
pub use table::markdown_table;

use crate::config::{ReportSettings, TableKind};
use crate::deps::DependencyChange;
use crate::diff::{ordered_union, GroupedDiff};
use crate::i18n::Translator;

const APPLICATIONS_HEADING: &str = "## NextJS Applications\n\n";
const PACKAGES_HEADING: &str = "## NPM Packages\n\n";
const DEPENDENCY_HEADING: &str = "#### 🧩 Dependency Changes";

/// Renders the full report for one comparison
pub struct ReportRenderer<'a> {
    settings: &'a ReportSettings,
    messages: &'a dyn Translator,
}

impl<'a> ReportRenderer<'a> {
    /// Create a renderer bound to resolved settings and a message table
    pub fn new(settings: &'a ReportSettings, messages: &'a dyn Translator) -> Self {
        Self { settings, messages }
    }

    /// Assemble the report document
    ///
    /// Applications come first, then one entry per package in the union of
    /// `packages` and `dependencies` keys. A package entry shows its file
    /// table and its dependency table under a shared heading, skipping
    /// whichever is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexmap::IndexMap;
    /// use size_report::config::ReportSettings;
    /// use size_report::diff::{FileDiff, GroupedDiff};
    /// use size_report::i18n::Messages;
    /// use size_report::report::ReportRenderer;
    ///
    /// let settings = ReportSettings::default();
    /// let messages = Messages::default();
    /// let renderer = ReportRenderer::new(&settings, &messages);
    ///
    /// let packages = GroupedDiff::from([(
    ///     "@scope/ui".to_string(),
    ///     vec![FileDiff::new("/dist/index.js", 1000, 1500)],
    /// )]);
    /// let report = renderer.render(&GroupedDiff::new(), &packages, &IndexMap::new());
    ///
    /// assert!(report.starts_with("## NPM Packages\n\n\n### 📦 @scope/ui\n**Total Sizes:** 1.5 kB"));
    /// assert_eq!(renderer.render(&GroupedDiff::new(), &GroupedDiff::new(), &IndexMap::new()), "");
    /// ```
    pub fn render(
        &self,
        applications: &GroupedDiff,
        packages: &GroupedDiff,
        dependencies: &IndexMap<String, Vec<DependencyChange>>,
    ) -> String {
        let mut sections = Vec::new();

        if !applications.is_empty() {
            sections.push(APPLICATIONS_HEADING.to_string());
        }
        for (name, files) in applications {
            let table = diff_table(
                files,
                self.settings.options_for(TableKind::Applications),
                TableKind::Applications,
                self.messages,
            );
            sections.push(format!(
                "### 📄 {} <sub>(nextjs static files diff)</sub>\n{}",
                name, table
            ));
        }

        let names = ordered_union(
            packages.keys().map(String::as_str),
            dependencies.keys().map(String::as_str),
        );

        let mut has_packages_heading = false;
        for name in names {
            let files = packages.get(name).map(Vec::as_slice).unwrap_or_default();
            let changes = dependencies.get(name).map(Vec::as_slice).unwrap_or_default();

            if files.is_empty() && changes.is_empty() {
                debug!("Nothing to report for package {}", name);
                continue;
            }
            if !has_packages_heading {
                has_packages_heading = true;
                sections.push(PACKAGES_HEADING.to_string());
            }

            if !files.is_empty() {
                let table = diff_table(
                    files,
                    self.settings.options_for(TableKind::Packages),
                    TableKind::Packages,
                    self.messages,
                );
                sections.push(format!("### 📦 {}\n{}", name, table));
            }

            if !changes.is_empty() {
                if files.is_empty() {
                    sections.push(format!("### 📦 {}\n", name));
                }
                sections.push(format!(
                    "{}\n\n{}",
                    DEPENDENCY_HEADING,
                    dependency_table(changes, self.messages)
                ));
            }
        }

        sections.join("\n")
    }
}
