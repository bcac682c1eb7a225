//! Posting the report to a pull request
//!
//! One comment per pull request: a previous report is found by its footer
//! marker and edited in place, otherwise a new comment is created.

mod gh;

use thiserror::Error;

use crate::i18n::{MessageKey, Translator};

pub use gh::{require_gh, GhCliStore};

/// Text embedded in every posted report, used to find it again
pub const MARKER: &str = "size-report action";

/// Project homepage linked from the report footer
pub const HOMEPAGE: &str = env!("CARGO_PKG_REPOSITORY");

/// Comment publishing errors
#[derive(Debug, Error)]
pub enum PublishError {
    /// The comments API call exited unsuccessfully
    #[error("`{command}` failed: {stderr}")]
    CommandFailed {
        /// Command line that failed
        command: String,
        /// Trimmed stderr of the command
        stderr: String,
    },

    /// The comments API returned something that is not a comment list
    #[error("unexpected comments response: {message}")]
    MalformedResponse {
        /// Parse failure detail
        message: String,
    },

    /// The command could not be started
    #[error("failed to run gh: {0}")]
    Spawn(#[from] std::io::Error),
}

/// An existing pull request comment
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct IssueComment {
    /// Comment id
    pub id: u64,
    /// Markdown body
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,
}

fn null_as_empty<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    use serde::Deserialize;
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Whether publishing created or replaced the report comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishOutcome {
    /// A new comment was posted
    Created,
    /// The comment with this id was overwritten
    Updated(u64),
}

/// Comment storage for one pull request
pub trait CommentStore {
    /// Every comment currently on the pull request
    fn list(&self) -> Result<Vec<IssueComment>, PublishError>;

    /// Post a new comment
    fn create(&self, body: &str) -> Result<(), PublishError>;

    /// Replace the body of an existing comment
    fn update(&self, id: u64, body: &str) -> Result<(), PublishError>;
}

/// Append the footer that links back to the project and carries [`MARKER`]
///
/// # Examples
///
/// ```
/// use size_report::i18n::{Locale, Messages};
/// use size_report::publish::with_footer;
///
/// let body = with_footer("report", &Messages::new(Locale::Ko));
/// assert!(body.starts_with("report\n\n<sub>powered by: "));
/// assert!(body.contains("/blob/main/README.ko.md\">size-report action</a></sub>"));
/// ```
pub fn with_footer(report: &str, messages: &dyn Translator) -> String {
    format!(
        "{}\n\n<sub>powered by: <a href=\"{}/blob/main/{}\">{}</a></sub>",
        report,
        HOMEPAGE,
        messages.text(MessageKey::Readme),
        MARKER
    )
}

/// Body posted when no group or dependency changed
///
/// # Examples
///
/// ```
/// use size_report::i18n::Messages;
/// use size_report::publish::empty_report_message;
///
/// let message = empty_report_message(&Messages::default(), Some("abc1234"));
/// assert_eq!(
///     message,
///     "### 🔍 No files have been changed\n\nLatest commit: abc1234\n\nPlease check your commit."
/// );
/// ```
pub fn empty_report_message(messages: &dyn Translator, commit: Option<&str>) -> String {
    let mut parts = vec![messages.text(MessageKey::EmptyTitle).to_string()];
    if let Some(sha) = commit {
        parts.push(format!("{} {}", messages.text(MessageKey::EmptyLatestCommit), sha));
    }
    parts.push(messages.text(MessageKey::EmptyCheckCommit).to_string());
    parts.join("\n\n")
}

/// Create or replace the report comment
///
/// `body` is posted as given; callers add the footer with [`with_footer`].
pub fn publish_report(
    store: &dyn CommentStore,
    body: &str,
) -> Result<PublishOutcome, PublishError> {
    let previous = store
        .list()?
        .into_iter()
        .find(|comment| comment.body.contains(MARKER));

    match previous {
        Some(comment) => {
            log::info!("Updating report comment {}", comment.id);
            store.update(comment.id, body)?;
            Ok(PublishOutcome::Updated(comment.id))
        }
        None => {
            log::info!("Creating report comment");
            store.create(body)?;
            Ok(PublishOutcome::Created)
        }
    }
}
