//! Command handlers for size-report CLI
//!
//! This module contains all command implementations, organized by functionality.
//! Each submodule handles a specific CLI command.

pub mod check_config;
pub mod completions;
pub mod report;

// Re-export command functions for convenient access
pub use check_config::cmd_check_config;
pub use completions::cmd_completions;
pub use report::{cmd_report, PublishTarget, ReportArgs};
