//! One base-vs-head comparison, from build snapshots to report text

use indexmap::IndexMap;
use log::info;

use crate::config::ReportSettings;
use crate::deps::{resolve_grouped_dependency_changes, DependencyChange, SizeLookup};
use crate::diff::{aggregate, GroupedDiff, APPLICATION_NOISE_THRESHOLD, PACKAGE_NOISE_THRESHOLD};
use crate::i18n::Translator;
use crate::manifest::BuildSnapshot;
use crate::publish::{empty_report_message, with_footer};
use crate::report::ReportRenderer;

/// Result of comparing two build snapshots
#[derive(Debug, Clone)]
pub struct Comparison {
    /// Application groups whose net change cleared the noise threshold
    pub applications: GroupedDiff,
    /// Package groups whose net change cleared the noise threshold
    pub packages: GroupedDiff,
    /// Dependency changes per package, including packages with none
    pub dependencies: IndexMap<String, Vec<DependencyChange>>,
    /// Rendered markdown, empty when nothing is worth reporting
    pub report: String,
}

impl Comparison {
    /// Whether the rendered report has no sections
    pub fn is_empty(&self) -> bool {
        self.report.is_empty()
    }

    /// Body to post on the pull request
    ///
    /// An empty report is replaced by the localized "nothing changed"
    /// message, mentioning `commit` when known. Either way the footer
    /// carrying the publish marker is appended.
    pub fn comment_body(&self, messages: &dyn Translator, commit: Option<&str>) -> String {
        if self.is_empty() {
            with_footer(&empty_report_message(messages, commit), messages)
        } else {
            with_footer(&self.report, messages)
        }
    }
}

/// Diff both snapshots, resolve dependency changes and render the report
///
/// Package groups, application groups and dependency lookups are computed
/// in parallel; rendering happens once all three are done.
///
/// # Examples
///
/// ```
/// use size_report::comparison::compare;
/// use size_report::config::ReportSettings;
/// use size_report::deps::OfflineLookup;
/// use size_report::i18n::Messages;
/// use size_report::manifest::BuildSnapshot;
///
/// let snapshot = BuildSnapshot::default();
/// let comparison = compare(
///     &snapshot,
///     &snapshot,
///     &ReportSettings::default(),
///     &OfflineLookup,
///     &Messages::default(),
/// );
///
/// assert!(comparison.is_empty());
/// assert!(comparison.comment_body(&Messages::default(), None).starts_with("### 🔍 No files have been changed"));
/// ```
pub fn compare(
    base: &BuildSnapshot,
    head: &BuildSnapshot,
    settings: &ReportSettings,
    lookup: &dyn SizeLookup,
    messages: &dyn Translator,
) -> Comparison {
    info!("Comparing build snapshots");

    let base_manifests = base.dependency_manifests();
    let head_manifests = head.dependency_manifests();

    let ((packages, applications), dependencies) = rayon::join(
        || {
            rayon::join(
                || aggregate(&base.packages, &head.packages, PACKAGE_NOISE_THRESHOLD),
                || {
                    aggregate(
                        &base.applications,
                        &head.applications,
                        APPLICATION_NOISE_THRESHOLD,
                    )
                },
            )
        },
        || resolve_grouped_dependency_changes(&base_manifests, &head_manifests, lookup),
    );

    info!(
        "{} package groups and {} application groups changed",
        packages.len(),
        applications.len()
    );

    let report =
        ReportRenderer::new(settings, messages).render(&applications, &packages, &dependencies);

    Comparison {
        applications,
        packages,
        dependencies,
        report,
    }
}
