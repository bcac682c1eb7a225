//! Dependency change tables

use super::table::markdown_table;
use crate::deps::DependencyChange;
use crate::i18n::{MessageKey, Translator};

const PACKAGE_INFO_URL: &str = "https://bundlephobia.com/package";

/// Render one group's dependency changes as a markdown table
///
/// # Examples
///
/// ```
/// use size_report::deps::DependencyChange;
/// use size_report::i18n::Messages;
/// use size_report::report::dependency_table;
///
/// let changes = vec![DependencyChange::added("left-pad", "^1.3.0", 1024)];
/// let table = dependency_table(&changes, &Messages::default());
///
/// assert!(table.ends_with(
///     "| [`left-pad@^1.3.0`](https://bundlephobia.com/package/left-pad@^1.3.0) \
///      | `Added` | `-` | `^1.3.0` | `1.02 kB` | `1.02 kB` |"
/// ));
/// ```
pub fn dependency_table(changes: &[DependencyChange], messages: &dyn Translator) -> String {
    let headers = [
        messages.text(MessageKey::DependencyPackage),
        messages.text(MessageKey::DiffStatus),
        messages.text(MessageKey::PreviousVersion),
        messages.text(MessageKey::UpdatedVersion),
        messages.text(MessageKey::BundleSize),
        messages.text(MessageKey::SizeChanged),
    ];

    let rows: Vec<Vec<String>> = changes
        .iter()
        .map(|change| {
            let pinned = format!("{}@{}", change.package, change.display_version());
            vec![
                format!("[`{}`]({}/{})", pinned, PACKAGE_INFO_URL, pinned),
                format!("`{}`", messages.text(change.kind.message_key())),
                format!("`{}`", change.previous_version.as_deref().unwrap_or("-")),
                format!("`{}`", change.updated_version.as_deref().unwrap_or("-")),
                change.bundle_size_text.clone(),
                change.diff_text.clone(),
            ]
        })
        .collect();

    markdown_table(&headers, &rows)
}
