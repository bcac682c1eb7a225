//! Configuration validation system
//!
//! Unlike [`ReportSettings::from_config`], which stops at the first problem,
//! validators collect every issue so `check-config` can report them together.
//!
//! [`ReportSettings::from_config`]: super::ReportSettings::from_config

use parking_lot::Mutex;
use std::sync::Arc;

use super::file::ConfigFile;
use super::settings::{check_build_script, Compression, IgnorePattern};
use crate::i18n::Locale;

/// Validation severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    /// Informational message
    Info,
    /// Warning - should be addressed but not blocking
    Warning,
    /// Error - must be fixed
    Error,
}

impl ValidationSeverity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationSeverity::Info => "INFO",
            ValidationSeverity::Warning => "WARNING",
            ValidationSeverity::Error => "ERROR",
        }
    }
}

/// A validation issue found in configuration
///
/// # Examples
///
/// ```
/// use size_report::config::validator::{ValidationIssue, ValidationSeverity};
///
/// let issue = ValidationIssue::error("language", "Unsupported language 'fr'")
///     .with_suggestion("Use one of: en, ko");
/// assert_eq!(issue.severity, ValidationSeverity::Error);
/// assert_eq!(issue.field, "language");
/// assert!(issue.suggestion.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Severity level
    pub severity: ValidationSeverity,
    /// Field that has the issue
    pub field: String,
    /// Description of the issue
    pub message: String,
    /// Suggested fix (if available)
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    /// Create a new validation issue
    pub fn new(
        severity: ValidationSeverity,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Create an error issue
    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ValidationSeverity::Error, field, message)
    }

    /// Create a warning issue
    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ValidationSeverity::Warning, field, message)
    }

    /// Create an info issue
    pub fn info(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ValidationSeverity::Info, field, message)
    }
}

/// Result of configuration validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors)
    pub valid: bool,
    /// Issues found during validation
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        Self {
            valid: true,
            issues: Vec::new(),
        }
    }

    /// Add an issue
    pub fn add_issue(&mut self, issue: ValidationIssue) {
        if issue.severity == ValidationSeverity::Error {
            self.valid = false;
        }
        self.issues.push(issue);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        !self.valid
    }

    /// Get only errors
    pub fn errors(&self) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == ValidationSeverity::Error)
            .collect()
    }

    /// Get only warnings
    pub fn warnings(&self) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == ValidationSeverity::Warning)
            .collect()
    }
}

/// Trait for pluggable configuration validators
pub trait ConfigValidator: Send + Sync {
    /// Validator name
    fn name(&self) -> &str;

    /// Validate a configuration
    fn validate(&self, config: &ConfigFile) -> ValidationResult;

    /// Get validator priority (lower runs first)
    fn priority(&self) -> u32 {
        100
    }
}

/// Checks language, compression and build script values
struct ValueValidator;

impl ConfigValidator for ValueValidator {
    fn name(&self) -> &str {
        "values"
    }

    fn validate(&self, config: &ConfigFile) -> ValidationResult {
        let mut result = ValidationResult::success();

        if let Err(e) = config.language.parse::<Locale>() {
            result.add_issue(
                ValidationIssue::error("language", e.to_string())
                    .with_suggestion(format!("Use one of: {}", Locale::SUPPORTED.join(", "))),
            );
        }

        if let Err(e) = config.compression.parse::<Compression>() {
            result.add_issue(
                ValidationIssue::error("compression", e.to_string())
                    .with_suggestion("Use one of: none, gzip, brotli"),
            );
        }

        if let Err(e) = check_build_script(&config.build_script) {
            result.add_issue(
                ValidationIssue::error("build-script", e.to_string())
                    .with_suggestion("Give only the package.json script name, e.g. \"build\""),
            );
        }

        if let Some(pattern) = config.ignore_patterns.as_deref() {
            if let Err(e) = IgnorePattern::new(pattern) {
                let detail = std::error::Error::source(&e)
                    .map(|source| source.to_string())
                    .unwrap_or_default();
                result.add_issue(
                    ValidationIssue::error("ignore-patterns", format!("{} {}", e, detail))
                        .with_suggestion("Use glob syntax, e.g. \"**/*.map\""),
                );
            }
        }

        result
    }

    fn priority(&self) -> u32 {
        10
    }
}

/// Flags option combinations that silently override each other
struct CombinationValidator;

impl ConfigValidator for CombinationValidator {
    fn name(&self) -> &str {
        "combinations"
    }

    fn validate(&self, config: &ConfigFile) -> ValidationResult {
        let mut result = ValidationResult::success();

        if config.omit_unchanged && config.collapse_unchanged {
            result.add_issue(
                ValidationIssue::warning(
                    "collapse-unchanged",
                    "omit-unchanged drops the rows collapse-unchanged would fold",
                )
                .with_suggestion("Set collapse-unchanged = false to make the intent explicit"),
            );
        }

        if config.minimum_change_threshold == Some(0) && config.omit_unchanged {
            result.add_issue(ValidationIssue::info(
                "minimum-change-threshold",
                "A threshold of 0 treats every row as changed; omit-unchanged has no effect",
            ));
        }

        result
    }
}

/// Registry for managing configuration validators
#[derive(Default)]
pub struct ValidatorRegistry {
    validators: Mutex<Vec<Arc<dyn ConfigValidator>>>,
}

impl ValidatorRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in validators
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register(Arc::new(ValueValidator));
        registry.register(Arc::new(CombinationValidator));
        registry
    }

    /// Register a validator
    pub fn register(&self, validator: Arc<dyn ConfigValidator>) {
        let mut validators = self.validators.lock();
        validators.push(validator);
        validators.sort_by_key(|v| v.priority());
    }

    /// Run all validators
    pub fn validate_all(&self, config: &ConfigFile) -> ValidationResult {
        let validators = self.validators.lock();

        let mut result = ValidationResult::success();
        for validator in validators.iter() {
            log::debug!("Running config validator '{}'", validator.name());
            for issue in validator.validate(config).issues {
                result.add_issue(issue);
            }
        }

        result
    }

    /// Get validator count
    pub fn count(&self) -> usize {
        self.validators.lock().len()
    }
}
