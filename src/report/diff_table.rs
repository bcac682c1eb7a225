//! Per-group file size tables with totals and a collapsed unchanged section

use serde::Serialize;

use super::icons::{delta_text, severity_icon};
use super::table::markdown_table;
use crate::config::{RenderOptions, TableKind};
use crate::diff::{DiffStatus, FileDiff};
use crate::fmt::format_size;
use crate::i18n::{MessageKey, Translator};

/// Totals over the rows a table walked (everything not ignored)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableTotals {
    /// Sum of head sizes
    pub total_size: u64,
    /// Sum of deltas
    pub total_delta: i64,
}

impl TableTotals {
    /// Size the walked rows had on the base branch
    pub fn baseline(&self) -> i64 {
        self.total_size as i64 - self.total_delta
    }
}

/// Status label key for a row
pub fn status_key(status: DiffStatus) -> MessageKey {
    match status {
        DiffStatus::Unchanged => MessageKey::StatusUnchanged,
        DiffStatus::Added => MessageKey::StatusAdded,
        DiffStatus::Removed => MessageKey::StatusRemoved,
        DiffStatus::Modified => MessageKey::StatusModified,
    }
}

fn size_cell(size: u64) -> String {
    if size == 0 {
        "`-`".to_string()
    } else {
        format!("`{}`", format_size(size))
    }
}

/// Rows of one table, split by the change threshold
#[derive(Debug, Default)]
pub(crate) struct TableRows {
    pub(crate) changed: Vec<Vec<String>>,
    pub(crate) unchanged: Vec<Vec<String>>,
    pub(crate) totals: TableTotals,
}

/// Walk the diffs, applying ignore patterns and the change threshold
pub(crate) fn collect_rows(
    files: &[FileDiff],
    options: &RenderOptions,
    messages: &dyn Translator,
) -> TableRows {
    let mut rows = TableRows::default();

    for file in files {
        if let Some(pattern) = &options.ignore_patterns {
            if pattern.matches(&file.filename) {
                continue;
            }
        }

        rows.totals.total_size += file.after;
        rows.totals.total_delta += file.delta;

        let below_threshold = file.delta.unsigned_abs() < options.minimum_change_threshold;
        if below_threshold && options.omit_unchanged {
            continue;
        }

        let row = vec![
            format!("**{}**", file.filename),
            format!("`{}`", messages.text(status_key(file.status()))),
            size_cell(file.before),
            size_cell(file.after),
            format!("`{}`", delta_text(file.delta, file.before as i64)),
        ];

        if below_threshold && options.collapse_unchanged {
            rows.unchanged.push(row);
        } else {
            rows.changed.push(row);
        }
    }

    rows
}

/// Render the totals block and tables for one group
///
/// # Examples
///
/// ```
/// use size_report::config::{ReportSettings, TableKind};
/// use size_report::diff::FileDiff;
/// use size_report::i18n::Messages;
/// use size_report::report::diff_table;
///
/// let settings = ReportSettings::default();
/// let files = vec![FileDiff::new("index.js", 1000, 1200)];
/// let output = diff_table(
///     &files,
///     settings.options_for(TableKind::Packages),
///     TableKind::Packages,
///     &Messages::default(),
/// );
///
/// assert!(output.starts_with("**Total Sizes:** 1.2 kB\n\n**Total Changes:** +200 B (+20%) 🚨"));
/// assert!(output.contains("| **index.js** | `Modified` | `1 kB` | `1.2 kB` | `+200 B (+20%)` |"));
/// ```
pub fn diff_table(
    files: &[FileDiff],
    options: &RenderOptions,
    kind: TableKind,
    messages: &dyn Translator,
) -> String {
    let (first_column, unchanged_label) = match kind {
        TableKind::Applications => (MessageKey::PageRoute, MessageKey::ViewUnchangedPageRoutes),
        TableKind::Packages => (MessageKey::PackageFile, MessageKey::ViewUnchangedPackageFiles),
    };
    let headers = [
        messages.text(first_column),
        messages.text(MessageKey::DiffStatus),
        messages.text(MessageKey::BeforeSize),
        messages.text(MessageKey::AfterSize),
        messages.text(MessageKey::SizeChanged),
    ];

    let rows = collect_rows(files, options, messages);

    let mut output = markdown_table(&headers, &rows.changed);
    if !rows.unchanged.is_empty() {
        output.push_str(&format!(
            "\n\n<details><summary>ℹ️ <strong>{}</strong></summary>\n\n{}\n\n</details>\n\n",
            messages.text(unchanged_label),
            markdown_table(&headers, &rows.unchanged)
        ));
    }

    let totals = rows.totals;
    let total_change = format!(
        "**{}:** {} {}",
        messages.text(MessageKey::TotalChange),
        delta_text(totals.total_delta, totals.baseline()),
        severity_icon(totals.total_delta, totals.baseline())
    );

    let mut summary = Vec::with_capacity(3);
    if options.show_total {
        summary.push(format!(
            "**{}:** {}",
            messages.text(MessageKey::TotalSize),
            format_size(totals.total_size)
        ));
    }
    summary.push(total_change);
    summary.push(String::new());

    format!("{}{}", summary.join("\n\n"), output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IgnorePattern;
    use crate::i18n::{Locale, Messages};

    fn options(threshold: u64) -> RenderOptions {
        RenderOptions {
            show_total: true,
            collapse_unchanged: true,
            omit_unchanged: false,
            minimum_change_threshold: threshold,
            ignore_patterns: None,
        }
    }

    fn en() -> Messages {
        Messages::new(Locale::En)
    }

    #[test]
    fn test_row_above_threshold_is_shown_inline() {
        let files = vec![FileDiff::new("index.js", 1000, 1200)];
        let rows = collect_rows(&files, &options(100), &en());

        assert_eq!(rows.changed.len(), 1);
        assert!(rows.unchanged.is_empty());
        assert_eq!(rows.changed[0][1], "`Modified`");
        assert_eq!(rows.changed[0][4], "`+200 B (+20%)`");
    }

    #[test]
    fn test_added_row_shows_dash_for_missing_side() {
        let files = vec![FileDiff::new("chunk.js", 0, 500)];
        let rows = collect_rows(&files, &options(10), &en());

        assert_eq!(
            rows.changed[0],
            vec!["**chunk.js**", "`Added`", "`-`", "`500 B`", "`+500 B`"]
        );
    }

    #[test]
    fn test_rows_below_threshold_are_collapsed() {
        let files = vec![
            FileDiff::new("big.js", 1000, 5000),
            FileDiff::new("same.js", 300, 300),
        ];

        let output = diff_table(&files, &options(10), TableKind::Packages, &en());

        assert!(output.contains("<details><summary>ℹ️ <strong>View Unchanged Package Files</strong></summary>"));
        let (visible, collapsed) = output.split_once("<details>").unwrap();
        assert!(visible.contains("big.js"));
        assert!(!visible.contains("same.js"));
        assert!(collapsed.contains("| **same.js** | `Unchanged` | `300 B` | `300 B` | `-` |"));
        assert!(output.ends_with("</details>\n\n"));
    }

    #[test]
    fn test_rows_below_threshold_are_omitted_but_still_counted() {
        let files = vec![
            FileDiff::new("big.js", 1000, 5000),
            FileDiff::new("small.js", 300, 305),
        ];
        let mut opts = options(10);
        opts.omit_unchanged = true;

        let rows = collect_rows(&files, &opts, &en());

        assert_eq!(rows.changed.len(), 1);
        assert!(rows.unchanged.is_empty());
        assert_eq!(rows.totals.total_size, 5305);
        assert_eq!(rows.totals.total_delta, 4005);
    }

    #[test]
    fn test_rows_below_threshold_inline_when_not_collapsing() {
        let files = vec![FileDiff::new("small.js", 300, 305)];
        let mut opts = options(10);
        opts.collapse_unchanged = false;

        let rows = collect_rows(&files, &opts, &en());
        assert_eq!(rows.changed.len(), 1);
    }

    #[test]
    fn test_ignored_rows_are_excluded_from_totals_and_sections() {
        let files = vec![
            FileDiff::new("index.js", 1000, 1100),
            FileDiff::new("index.js.map", 9000, 9001),
            FileDiff::new("app.js.map", 0, 40_000),
        ];
        let mut opts = options(10);
        opts.ignore_patterns = Some(IgnorePattern::new("*.map").unwrap());

        let output = diff_table(&files, &opts, TableKind::Packages, &en());

        assert!(!output.contains(".map"));
        assert!(output.starts_with("**Total Sizes:** 1.1 kB\n\n**Total Changes:** +100 B (+10%) ⚠️"));
    }

    #[test]
    fn test_brace_ignore_pattern_excludes_every_alternative() {
        let files = vec![
            FileDiff::new("index.mjs", 1000, 1100),
            FileDiff::new("index.js", 2000, 2500),
            FileDiff::new("index.css", 300, 900),
        ];
        let mut opts = options(10);
        opts.ignore_patterns = Some(IgnorePattern::new("*.{js,css}").unwrap());

        let output = diff_table(&files, &opts, TableKind::Packages, &en());

        assert!(!output.contains("**index.js**"));
        assert!(!output.contains("**index.css**"));
        assert!(output.contains("**index.mjs**"));
        assert!(output.starts_with("**Total Sizes:** 1.1 kB\n\n**Total Changes:** +100 B (+10%) ⚠️"));
    }

    #[test]
    fn test_hidden_total_size_keeps_change_line() {
        let files = vec![FileDiff::new("a.js", 0, 500)];
        let mut opts = options(10);
        opts.show_total = false;

        let output = diff_table(&files, &opts, TableKind::Packages, &en());

        assert!(output.starts_with("**Total Changes:** +500 B 🆕\n\n| File |"));
        assert!(!output.contains("Total Sizes"));
    }

    #[test]
    fn test_all_rows_ignored_leaves_only_totals() {
        let files = vec![FileDiff::new("a.map", 0, 500)];
        let mut opts = options(10);
        opts.ignore_patterns = Some(IgnorePattern::new("*.map").unwrap());

        let output = diff_table(&files, &opts, TableKind::Packages, &en());

        assert_eq!(output, "**Total Sizes:** 0 B\n\n**Total Changes:** - 🆕\n\n");
    }

    #[test]
    fn test_application_tables_use_route_labels() {
        let files = vec![FileDiff::new("/about", 5000, 5000)];
        let output = diff_table(&files, &options(1000), TableKind::Applications, &en());

        assert!(output.contains("View Unchanged Page Routes"));
        assert!(output.contains("| 🪧 Page Routes | Status |"));
    }

    #[test]
    fn test_korean_labels() {
        let files = vec![FileDiff::new("a.js", 100, 200)];
        let output = diff_table(&files, &options(10), TableKind::Packages, &Messages::new(Locale::Ko));

        assert!(output.starts_with("**전체 파일 사이즈:** 200 B"));
        assert!(output.contains("`수정됨`"));
    }
}
