//! Infrastructure traits for abstracting I/O operations.
//!
//! Snapshot and config loading go through [`FileSystem`]; the npm registry,
//! git and GitHub CLI collaborators go through [`CommandExecutor`], so every
//! external effect can be swapped out in tests.

use std::io;
use std::path::Path;
use std::process::{Command, Output};

/// Trait for abstracting filesystem operations.
pub trait FileSystem {
    /// Read the entire contents of a file into a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write a slice of bytes to a file.
    fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()>;
}

/// Real filesystem implementation that delegates to std::fs.
#[derive(Debug, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
        std::fs::write(path, contents)
    }
}

/// Trait for abstracting command execution.
pub trait CommandExecutor {
    /// Execute a command and return its output (stdout, stderr, status).
    fn output(&self, cmd: &mut Command) -> io::Result<Output>;

    /// Execute a command built with a closure and return its output.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use size_report::infra::{CommandExecutor, RealCommandExecutor};
    ///
    /// let executor = RealCommandExecutor;
    /// let output = executor.execute(|cmd| cmd.args(["view", "left-pad@1.3.0", "--json"]), "npm")?;
    /// # Ok::<(), std::io::Error>(())
    /// ```
    fn execute<F>(&self, builder: F, program: &str) -> io::Result<Output>
    where
        F: FnOnce(&mut Command) -> &mut Command,
    {
        let mut cmd = Command::new(program);
        builder(&mut cmd);
        self.output(&mut cmd)
    }
}

/// Real command executor that delegates to std::process::Command.
#[derive(Debug, Clone, Copy)]
pub struct RealCommandExecutor;

impl CommandExecutor for RealCommandExecutor {
    fn output(&self, cmd: &mut Command) -> io::Result<Output> {
        cmd.output()
    }
}

/// Create an ExitStatus with the given exit code for use in test mocks.
///
/// This avoids spawning actual processes (like `Command::new("true")`) in tests.
#[cfg(all(test, unix))]
pub fn mock_exit_status(code: i32) -> std::process::ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    std::process::ExitStatus::from_raw(code << 8) // Unix stores exit code in upper bits
}

#[cfg(all(test, windows))]
pub fn mock_exit_status(code: i32) -> std::process::ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    std::process::ExitStatus::from_raw(code as u32)
}

/// Command executor that replays canned outputs and records every invocation
#[cfg(test)]
pub(crate) struct ScriptedExecutor {
    responses: parking_lot::Mutex<std::collections::VecDeque<io::Result<Output>>>,
    calls: parking_lot::Mutex<Vec<Vec<String>>>,
}

#[cfg(test)]
impl ScriptedExecutor {
    pub(crate) fn new() -> Self {
        Self {
            responses: parking_lot::Mutex::new(Default::default()),
            calls: parking_lot::Mutex::new(Vec::new()),
        }
    }

    /// Queue a response with the given exit code, stdout and stderr
    pub(crate) fn respond(self, code: i32, stdout: &str, stderr: &str) -> Self {
        self.responses.lock().push_back(Ok(Output {
            status: mock_exit_status(code),
            stdout: stdout.as_bytes().to_vec(),
            stderr: stderr.as_bytes().to_vec(),
        }));
        self
    }

    /// Queue a spawn failure
    pub(crate) fn fail(self, kind: io::ErrorKind) -> Self {
        self.responses
            .lock()
            .push_back(Err(io::Error::new(kind, "spawn failed")));
        self
    }

    /// Program and arguments of every executed command, in order
    pub(crate) fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().clone()
    }
}

#[cfg(test)]
impl CommandExecutor for ScriptedExecutor {
    fn output(&self, cmd: &mut Command) -> io::Result<Output> {
        let mut call = vec![cmd.get_program().to_string_lossy().into_owned()];
        call.extend(cmd.get_args().map(|arg| arg.to_string_lossy().into_owned()));
        self.calls.lock().push(call);

        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(io::Error::other("no scripted response left")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn test_real_filesystem_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("snapshot.json");

        let fs = RealFileSystem;
        fs.write(&file_path, b"{}").unwrap();

        assert_eq!(fs.read_to_string(&file_path).unwrap(), "{}");
    }

    #[test]
    fn test_real_filesystem_read_nonexistent_file_returns_error() {
        let fs = RealFileSystem;
        let result = fs.read_to_string(Path::new("/nonexistent/file.txt"));
        assert!(result.is_err());
    }

    #[test]
    #[cfg(unix)]
    fn test_real_command_executor_execute_with_builder() {
        let executor = RealCommandExecutor;

        let output = executor
            .execute(|cmd| cmd.arg("test_output"), "echo")
            .unwrap();

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("test_output"));
    }

    #[test]
    fn test_real_command_executor_nonexistent_command_returns_error() {
        let executor = RealCommandExecutor;
        let mut cmd = Command::new("nonexistent_command_xyz_123");

        let result = executor.output(&mut cmd);
        assert!(result.is_err());
    }

    #[test]
    #[cfg(unix)]
    fn test_scripted_executor_replays_in_order_and_records_calls() {
        let executor = ScriptedExecutor::new()
            .respond(0, "first", "")
            .respond(1, "", "boom");

        let first = executor.execute(|cmd| cmd.arg("a"), "tool").unwrap();
        let second = executor.execute(|cmd| cmd.args(["b", "c"]), "tool").unwrap();
        let third = executor.execute(|cmd| cmd, "tool");

        assert!(first.status.success());
        assert!(!second.status.success());
        assert!(third.is_err());
        assert_eq!(
            executor.calls(),
            vec![
                vec!["tool".to_string(), "a".to_string()],
                vec!["tool".to_string(), "b".to_string(), "c".to_string()],
                vec!["tool".to_string()],
            ]
        );
    }
}
