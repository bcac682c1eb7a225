//! Completions command implementation
//!
//! Handles the `size-report completions` command which generates
//! shell completion scripts for bash, zsh, fish, etc.

use clap::Command;
use clap_complete::{generate, Shell};
use std::io::Write;

/// Generate shell completion scripts
///
/// Outputs completion script for the specified shell to stdout.
/// Users can redirect this to their shell's completion directory.
///
/// # Examples
///
/// ```bash
/// # Bash
/// size-report completions bash > /etc/bash_completion.d/size-report
///
/// # Zsh
/// size-report completions zsh > ~/.zfunc/_size-report
///
/// # Fish
/// size-report completions fish > ~/.config/fish/completions/size-report.fish
/// ```
pub fn cmd_completions(shell: Shell, cli: &mut Command) {
    write_completions(shell, cli, &mut std::io::stdout());
}

/// Write the completion script for `cli` to `out`
pub fn write_completions(shell: Shell, cli: &mut Command, out: &mut dyn Write) {
    let bin_name = cli.get_name().to_string();
    generate(shell, cli, bin_name, out);
}
