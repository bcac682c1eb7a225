//! Check-config command implementation
//!
//! Handles the `size-report check-config` command which validates
//! `.size-report.toml` and lists every problem found.

use anyhow::Result;
use console::style;
use std::path::Path;

use crate::config::{
    ConfigLoader, ValidationIssue, ValidationResult, ValidationSeverity, ValidatorRegistry,
    CONFIG_FILE_NAME,
};
use crate::error::SizeReportError;
use crate::fmt::{CHECKMARK, CROSSMARK, INFO, WARNING};

/// Validate the configuration in `config_dir`
///
/// # Examples
///
/// ```no_run
/// use size_report::cmd::check_config::cmd_check_config;
/// use std::path::Path;
///
/// cmd_check_config(Path::new("."))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns [`SizeReportError::InvalidConfig`] when any error-severity issue
/// is found, after printing all of them.
pub fn cmd_check_config(config_dir: &Path) -> Result<()> {
    let config_path = config_dir.join(CONFIG_FILE_NAME);
    if !ConfigLoader::exists(config_dir) {
        println!(
            "{} No {} found, defaults apply",
            INFO,
            style(CONFIG_FILE_NAME).cyan()
        );
    }

    let config = ConfigLoader::load(config_dir)?;
    let result = ValidatorRegistry::with_defaults().validate_all(&config);

    for issue in &result.issues {
        println!("{}", format_issue(issue));
    }

    if result.has_errors() {
        return Err(SizeReportError::InvalidConfig {
            path: config_path,
            message: summary(&result),
        }
        .into());
    }

    println!(
        "{} {} is valid",
        CHECKMARK,
        style(config_path.display()).bold()
    );
    Ok(())
}

fn format_issue(issue: &ValidationIssue) -> String {
    let (marker, severity) = match issue.severity {
        ValidationSeverity::Error => (CROSSMARK, style(issue.severity.as_str()).red().bold()),
        ValidationSeverity::Warning => (WARNING, style(issue.severity.as_str()).yellow()),
        ValidationSeverity::Info => (INFO, style(issue.severity.as_str()).dim()),
    };

    let mut line = format!(
        "{} {} {}: {}",
        marker,
        severity,
        style(&issue.field).cyan(),
        issue.message
    );
    if let Some(suggestion) = &issue.suggestion {
        line.push_str(&format!("\n   {}", style(suggestion).dim()));
    }
    line
}

fn summary(result: &ValidationResult) -> String {
    let fields: Vec<&str> = result.errors().iter().map(|i| i.field.as_str()).collect();
    format!("{} invalid value(s): {}", fields.len(), fields.join(", "))
}
