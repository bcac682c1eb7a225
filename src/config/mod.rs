//! Configuration for size-report
//!
//! This module provides:
//! - .size-report.toml config file support with CLI overrides
//! - Validation that reports every problem at once
//! - The immutable [`ReportSettings`] handed to the renderer

pub mod file;
pub mod loader;
pub mod settings;
pub mod validator;

pub use file::{ConfigFile, ConfigOverrides, CONFIG_FILE_NAME};
pub use loader::ConfigLoader;
pub use settings::{
    check_build_script, Compression, IgnorePattern, RenderOptions, ReportSettings, TableKind,
    APPLICATION_CHANGE_THRESHOLD, PACKAGE_CHANGE_THRESHOLD,
};
pub use validator::{
    ConfigValidator, ValidationIssue, ValidationResult, ValidationSeverity, ValidatorRegistry,
};
