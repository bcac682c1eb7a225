//! Pull request comments through the GitHub CLI

use std::process::Output;

use super::{CommentStore, IssueComment, PublishError};
use crate::error::SizeReportError;
use crate::infra::{CommandExecutor, RealCommandExecutor};

/// Fail early with install instructions when `gh` is not on PATH
pub fn require_gh() -> Result<(), SizeReportError> {
    which::which("gh").map(|_| ()).map_err(|_| SizeReportError::ToolMissing {
        tool: "gh".to_string(),
        install_cmd: "brew install gh  (or see https://cli.github.com)".to_string(),
        docs_url: Some("https://cli.github.com/manual/gh_api".to_string()),
    })
}

/// Comment store for one pull request, backed by `gh api`
///
/// Authentication is whatever `gh` is configured with (`GH_TOKEN` in CI).
pub struct GhCliStore<CE: CommandExecutor = RealCommandExecutor> {
    repo: String,
    pr: u64,
    cmd_executor: CE,
}

impl GhCliStore<RealCommandExecutor> {
    /// Store for pull request `pr` of `owner/name`
    pub fn new(repo: impl Into<String>, pr: u64) -> Self {
        Self::with_executor(repo, pr, RealCommandExecutor)
    }
}

impl<CE: CommandExecutor> GhCliStore<CE> {
    /// Store with a custom command executor (for testing)
    pub fn with_executor(repo: impl Into<String>, pr: u64, cmd_executor: CE) -> Self {
        Self {
            repo: repo.into(),
            pr,
            cmd_executor,
        }
    }

    fn gh_api(&self, args: &[String]) -> Result<Output, PublishError> {
        log::debug!("gh api {}", args.join(" "));
        let output = self
            .cmd_executor
            .execute(|cmd| cmd.arg("api").args(args), "gh")?;

        if !output.status.success() {
            return Err(PublishError::CommandFailed {
                command: format!("gh api {}", args.first().map(String::as_str).unwrap_or("")),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output)
    }
}

impl<CE: CommandExecutor> CommentStore for GhCliStore<CE> {
    fn list(&self) -> Result<Vec<IssueComment>, PublishError> {
        let output = self.gh_api(&[
            format!("repos/{}/issues/{}/comments", self.repo, self.pr),
            "--paginate".to_string(),
            "--jq".to_string(),
            ".[] | {id, body}".to_string(),
        ])?;

        String::from_utf8_lossy(&output.stdout)
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line).map_err(|e| PublishError::MalformedResponse {
                    message: e.to_string(),
                })
            })
            .collect()
    }

    fn create(&self, body: &str) -> Result<(), PublishError> {
        self.gh_api(&[
            format!("repos/{}/issues/{}/comments", self.repo, self.pr),
            "--method".to_string(),
            "POST".to_string(),
            "-f".to_string(),
            format!("body={}", body),
        ])?;
        Ok(())
    }

    fn update(&self, id: u64, body: &str) -> Result<(), PublishError> {
        self.gh_api(&[
            format!("repos/{}/issues/comments/{}", self.repo, id),
            "--method".to_string(),
            "PATCH".to_string(),
            "-f".to_string(),
            format!("body={}", body),
        ])?;
        Ok(())
    }
}
