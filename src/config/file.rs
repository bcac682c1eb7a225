//! Configuration file data structures

use serde::{Deserialize, Serialize};

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = ".size-report.toml";

/// size-report configuration file structure
///
/// Values are kept as written; [`ReportSettings::from_config`] checks them
/// and resolves defaults that depend on the table kind.
///
/// [`ReportSettings::from_config`]: super::ReportSettings::from_config
///
/// # Examples
///
/// ```
/// use size_report::config::ConfigFile;
///
/// let config: ConfigFile = toml_edit::de::from_str(
///     "language = \"ko\"\nomit-unchanged = true\nignore-patterns = \"*.map\"\n",
/// )
/// .unwrap();
///
/// assert_eq!(config.language, "ko");
/// assert!(config.omit_unchanged);
/// assert!(config.show_total);
/// assert_eq!(config.minimum_change_threshold, None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigFile {
    /// Report language ("en" or "ko")
    #[serde(default = "default_language")]
    pub language: String,

    /// Compression the builder measured with ("none", "gzip", "brotli")
    #[serde(default = "default_compression")]
    pub compression: String,

    /// package.json script the builder runs
    #[serde(default = "default_build_script")]
    pub build_script: String,

    /// Show the total size line above each table
    #[serde(default = "default_true")]
    pub show_total: bool,

    /// Move rows below the change threshold into a collapsed section
    #[serde(default = "default_true")]
    pub collapse_unchanged: bool,

    /// Drop rows below the change threshold entirely
    #[serde(default)]
    pub omit_unchanged: bool,

    /// Row-level change threshold in bytes for every table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_change_threshold: Option<u64>,

    /// Glob of file names to leave out of tables and totals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_patterns: Option<String>,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_compression() -> String {
    "gzip".to_string()
}

fn default_build_script() -> String {
    "build".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            language: default_language(),
            compression: default_compression(),
            build_script: default_build_script(),
            show_total: true,
            collapse_unchanged: true,
            omit_unchanged: false,
            minimum_change_threshold: None,
            ignore_patterns: None,
        }
    }
}

/// Values given on the command line, each replacing the file value when set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    /// `--language`
    pub language: Option<String>,
    /// `--compression`
    pub compression: Option<String>,
    /// `--build-script`
    pub build_script: Option<String>,
    /// `--show-total`
    pub show_total: Option<bool>,
    /// `--collapse-unchanged`
    pub collapse_unchanged: Option<bool>,
    /// `--omit-unchanged`
    pub omit_unchanged: Option<bool>,
    /// `--minimum-change-threshold`
    pub minimum_change_threshold: Option<u64>,
    /// `--ignore-patterns`
    pub ignore_patterns: Option<String>,
}

impl ConfigFile {
    /// Apply command-line overrides on top of the file values
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(language) = overrides.language {
            self.language = language;
        }
        if let Some(compression) = overrides.compression {
            self.compression = compression;
        }
        if let Some(build_script) = overrides.build_script {
            self.build_script = build_script;
        }
        if let Some(show_total) = overrides.show_total {
            self.show_total = show_total;
        }
        if let Some(collapse) = overrides.collapse_unchanged {
            self.collapse_unchanged = collapse;
        }
        if let Some(omit) = overrides.omit_unchanged {
            self.omit_unchanged = omit;
        }
        if overrides.minimum_change_threshold.is_some() {
            self.minimum_change_threshold = overrides.minimum_change_threshold;
        }
        if overrides.ignore_patterns.is_some() {
            self.ignore_patterns = overrides.ignore_patterns;
        }
        self
    }
}
