//! Enhanced error types with contextual suggestions
//!
//! Provides structured error types that include:
//! - Actionable error messages
//! - Suggested fixes and recovery actions
//! - Documentation links
//! - Proper exit codes for CI/CD
//! - The localized one-line failure message shown to pull-request authors
//!
//! # Examples
//!
//! ```
//! use size_report::error::SizeReportError;
//! use size_report::i18n::{Locale, Messages};
//!
//! let error = SizeReportError::UnsupportedCompression {
//!     value: "zstd".to_string(),
//! };
//!
//! assert_eq!(error.exit_code(), 78);
//! let message = error.localized(&Messages::new(Locale::En));
//! assert!(message.contains("`none`, `gzip`, or `brotli`"));
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::i18n::{MessageKey, Translator};
use crate::manifest::ManifestError;
use crate::publish::PublishError;

/// size-report errors with contextual suggestions
#[derive(Error, Debug)]
pub enum SizeReportError {
    /// Required tool is not installed
    #[error("Tool not installed: {tool}")]
    ToolMissing {
        /// Tool name
        tool: String,
        /// Installation command
        install_cmd: String,
        /// Optional documentation URL
        docs_url: Option<String>,
    },

    /// Report language is not one of the bundled locales
    #[error("Unsupported language: '{value}'")]
    UnsupportedLocale {
        /// Configured value
        value: String,
    },

    /// Compression type is not one of none, gzip, brotli
    #[error("Unsupported compression type: '{value}'")]
    UnsupportedCompression {
        /// Configured value
        value: String,
    },

    /// Build script invokes a package manager itself
    #[error("Build script '{script}' invokes a package manager")]
    PackageManagerInBuildScript {
        /// Configured build script
        script: String,
    },

    /// Ignore pattern is not a valid glob
    #[error("Invalid ignore pattern: '{pattern}'")]
    InvalidIgnorePattern {
        /// Configured pattern
        pattern: String,
        #[source]
        /// Glob parse error
        source: glob::PatternError,
    },

    /// Configuration file failed to parse or validate
    #[error("Invalid configuration in {path}: {message}")]
    InvalidConfig {
        /// Path to config file
        path: PathBuf,
        /// What was wrong
        message: String,
    },

    /// Build snapshot or manifest problem
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Comment could not be published
    #[error("publish error: {0}")]
    Publish(#[from] PublishError),

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },
}

impl SizeReportError {
    /// Get actionable suggestion for resolving this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use size_report::error::SizeReportError;
    ///
    /// let error = SizeReportError::ToolMissing {
    ///     tool: "gh".to_string(),
    ///     install_cmd: "brew install gh".to_string(),
    ///     docs_url: None,
    /// };
    ///
    /// assert!(error.suggestion().unwrap().contains("brew install gh"));
    /// ```
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::ToolMissing { install_cmd, .. } => Some(format!("Install with: {}", install_cmd)),
            Self::UnsupportedLocale { .. } => Some(format!(
                "Set language to one of: {}",
                crate::i18n::Locale::SUPPORTED.join(", ")
            )),
            Self::UnsupportedCompression { .. } => {
                Some("Set compression to one of: none, gzip, brotli".to_string())
            }
            Self::PackageManagerInBuildScript { .. } => Some(
                "Use the script name only (e.g. \"build\"); the package manager is detected automatically"
                    .to_string(),
            ),
            Self::InvalidIgnorePattern { .. } => {
                Some("Use glob syntax, e.g. \"**/*.map\" or \"*.{js,css}\"".to_string())
            }
            Self::InvalidConfig { .. } => {
                Some("Run 'size-report check-config' to see every problem".to_string())
            }
            Self::Manifest(ManifestError::MissingName { location }) => Some(format!(
                "Add a \"name\" field to the package.json recorded under {}",
                location
            )),
            Self::Manifest(ManifestError::Read { path, .. }) => Some(format!(
                "Ensure the builder wrote {} before running size-report",
                path.display()
            )),
            Self::Manifest(ManifestError::Parse { .. }) => Some(
                "The snapshot must be a JSON object with packages, applications and manifests"
                    .to_string(),
            ),
            Self::Publish(PublishError::CommandFailed { .. }) => {
                Some("Check that GH_TOKEN has write access to pull requests".to_string())
            }
            Self::Publish(_) => Some("Run with RUST_LOG=debug to see the gh invocation".to_string()),
            Self::Io { context, .. } => Some(format!(
                "Check file permissions and that {} is accessible",
                context
            )),
        }
    }

    /// Get documentation URL for this error.
    pub fn docs_url(&self) -> Option<&str> {
        match self {
            Self::ToolMissing { docs_url, .. } => docs_url.as_deref(),
            Self::UnsupportedLocale { .. }
            | Self::UnsupportedCompression { .. }
            | Self::PackageManagerInBuildScript { .. }
            | Self::InvalidIgnorePattern { .. }
            | Self::InvalidConfig { .. } => Some("https://github.com/size-report/size-report#configuration"),
            Self::Manifest(_) => Some("https://github.com/size-report/size-report#build-snapshots"),
            _ => None,
        }
    }

    /// Get appropriate exit code for this error.
    ///
    /// Returns Unix-style exit codes based on the error type, following sysexits.h conventions.
    ///
    /// # Examples
    ///
    /// ```
    /// use size_report::error::SizeReportError;
    ///
    /// let error = SizeReportError::ToolMissing {
    ///     tool: "gh".to_string(),
    ///     install_cmd: "brew install gh".to_string(),
    ///     docs_url: None,
    /// };
    ///
    /// assert_eq!(error.exit_code(), 127); // Command not found
    /// ```
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ToolMissing { .. } => 127, // Command not found (Unix convention)
            Self::UnsupportedLocale { .. } => 78, // EX_CONFIG
            Self::UnsupportedCompression { .. } => 78,
            Self::PackageManagerInBuildScript { .. } => 78,
            Self::InvalidIgnorePattern { .. } => 78,
            Self::InvalidConfig { .. } => 78,
            Self::Manifest(ManifestError::Read { .. }) => 66, // EX_NOINPUT
            Self::Manifest(_) => 65,                         // EX_DATAERR
            Self::Publish(_) => 69,                          // EX_UNAVAILABLE
            Self::Io { .. } => 74,                           // EX_IOERR
        }
    }

    /// Message key of the one-line failure message shown to report readers
    pub fn message_key(&self) -> MessageKey {
        match self {
            Self::UnsupportedLocale { .. } => MessageKey::UnsupportedLanguage,
            Self::UnsupportedCompression { .. } => MessageKey::InvalidCompressionType,
            Self::PackageManagerInBuildScript { .. } => MessageKey::IncludePmInBuildScript,
            Self::Manifest(ManifestError::MissingName { .. }) => MessageKey::InvalidPackageName,
            _ => MessageKey::InternalError,
        }
    }

    /// Localized one-line failure message
    pub fn localized(&self, messages: &dyn Translator) -> String {
        let text = messages.text(self.message_key());
        match self {
            Self::Manifest(ManifestError::MissingName { location }) => {
                format!("{}{})", text, location)
            }
            _ => text.to_string(),
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with suggestions and documentation links
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(sr_error) = Self::find(error) {
            if let Some(suggestion) = sr_error.suggestion() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    style("help:").cyan().bold(),
                    suggestion
                ));
            }

            if let Some(docs) = sr_error.docs_url() {
                output.push_str(&format!("{} {}\n", style("docs:").blue(), docs));
            }
        }

        output
    }

    /// Localized failure message for any error reaching the CLI boundary
    ///
    /// Errors that are not a [`SizeReportError`] map to the generic internal
    /// error message.
    pub fn summary(error: &anyhow::Error, messages: &dyn Translator) -> String {
        match Self::find(error) {
            Some(sr_error) => sr_error.localized(messages),
            None => messages.text(MessageKey::InternalError).to_string(),
        }
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        Self::find(error).map_or(1, SizeReportError::exit_code)
    }

    fn find(error: &anyhow::Error) -> Option<&SizeReportError> {
        error
            .chain()
            .find_map(|cause| cause.downcast_ref::<SizeReportError>())
    }
}
