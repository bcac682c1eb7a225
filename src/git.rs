//! Git metadata for the empty-report message

use crate::infra::{CommandExecutor, RealCommandExecutor};
use thiserror::Error;

/// Git operation errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Git command failed with an error message
    #[error("Git command failed: {0}")]
    CommandFailed(String),

    /// Git output contained invalid UTF-8
    #[error("Invalid UTF-8 in git output")]
    InvalidUtf8,

    /// IO error occurred while executing git command
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Git repository interface with dependency injection for testability
pub struct GitRepository<CE: CommandExecutor = RealCommandExecutor> {
    cmd_executor: CE,
}

impl GitRepository<RealCommandExecutor> {
    /// Create a new GitRepository with real command execution
    pub fn new() -> Self {
        Self {
            cmd_executor: RealCommandExecutor,
        }
    }
}

impl Default for GitRepository<RealCommandExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<CE: CommandExecutor> GitRepository<CE> {
    /// Create a GitRepository with a custom command executor (for testing)
    pub fn with_executor(cmd_executor: CE) -> Self {
        Self { cmd_executor }
    }

    /// Full hash of the checked-out commit
    ///
    /// Returns `Ok(None)` when git is not installed or the working directory
    /// is not a repository.
    pub fn head_commit(&self) -> Result<Option<String>, GitError> {
        let output = match self
            .cmd_executor
            .execute(|cmd| cmd.args(["rev-parse", "HEAD"]), "git")
        {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(GitError::Io(e)),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("not a git repository") {
                return Ok(None);
            }
            return Err(GitError::CommandFailed(stderr.trim().to_string()));
        }

        let hash = String::from_utf8(output.stdout)
            .map_err(|_| GitError::InvalidUtf8)?
            .trim()
            .to_string();

        Ok(Some(hash).filter(|h| !h.is_empty()))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::infra::ScriptedExecutor;

    #[test]
    fn test_head_commit_trims_output() {
        let executor = ScriptedExecutor::new().respond(0, "3f2a9c1d0e\n", "");
        let repo = GitRepository::with_executor(executor);

        assert_eq!(repo.head_commit().unwrap(), Some("3f2a9c1d0e".to_string()));
        assert_eq!(repo.cmd_executor.calls()[0], vec!["git", "rev-parse", "HEAD"]);
    }

    #[test]
    fn test_outside_repository_is_none() {
        let executor = ScriptedExecutor::new().respond(
            128,
            "",
            "fatal: not a git repository (or any of the parent directories): .git",
        );
        let repo = GitRepository::with_executor(executor);

        assert_eq!(repo.head_commit().unwrap(), None);
    }

    #[test]
    fn test_missing_git_is_none() {
        let executor = ScriptedExecutor::new().fail(std::io::ErrorKind::NotFound);
        let repo = GitRepository::with_executor(executor);

        assert_eq!(repo.head_commit().unwrap(), None);
    }

    #[test]
    fn test_other_failures_are_errors() {
        let executor =
            ScriptedExecutor::new().respond(128, "", "fatal: ambiguous argument 'HEAD'\n");
        let repo = GitRepository::with_executor(executor);

        assert!(matches!(
            repo.head_commit(),
            Err(GitError::CommandFailed(ref msg)) if msg == "fatal: ambiguous argument 'HEAD'"
        ));
    }

    #[test]
    fn test_empty_output_is_none() {
        let executor = ScriptedExecutor::new().respond(0, "\n", "");
        let repo = GitRepository::with_executor(executor);

        assert_eq!(repo.head_commit().unwrap(), None);
    }
}
