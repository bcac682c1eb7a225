//! Immutable settings resolved once from the configuration file and CLI

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::file::ConfigFile;
use crate::error::SizeReportError;
use crate::i18n::Locale;

/// Default row threshold for page route tables
pub const APPLICATION_CHANGE_THRESHOLD: u64 = 1000;

/// Default row threshold for package file tables
pub const PACKAGE_CHANGE_THRESHOLD: u64 = 10;

/// Package managers a build script must not invoke itself
const PACKAGE_MANAGERS: [&str; 3] = ["npm", "pnpm", "yarn"];

/// Compression the builder applied before measuring sizes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// Raw file sizes
    None,
    /// gzip-compressed sizes
    #[default]
    Gzip,
    /// brotli-compressed sizes
    Brotli,
}

impl FromStr for Compression {
    type Err = SizeReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Compression::None),
            "gzip" => Ok(Compression::Gzip),
            "brotli" => Ok(Compression::Brotli),
            other => Err(SizeReportError::UnsupportedCompression {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Compression::None => "none",
            Compression::Gzip => "gzip",
            Compression::Brotli => "brotli",
        })
    }
}

/// Reject build scripts that call a package manager
///
/// # Examples
///
/// ```
/// use size_report::config::check_build_script;
///
/// assert!(check_build_script("build").is_ok());
/// assert!(check_build_script("pnpm build").is_err());
/// ```
pub fn check_build_script(script: &str) -> Result<(), SizeReportError> {
    if PACKAGE_MANAGERS.iter().any(|pm| script.contains(pm)) {
        return Err(SizeReportError::PackageManagerInBuildScript {
            script: script.to_string(),
        });
    }
    Ok(())
}

/// Compiled ignore glob
///
/// Matches like minimatch: `*` stops at `/`, a leading dot must be matched
/// literally, and `{a,b}` alternatives are expanded.
#[derive(Debug, Clone, PartialEq)]
pub struct IgnorePattern {
    source: String,
    patterns: Vec<glob::Pattern>,
}

impl IgnorePattern {
    /// Compile a glob
    pub fn new(source: &str) -> Result<Self, SizeReportError> {
        let patterns = expand_braces(source)
            .iter()
            .map(|alternative| glob::Pattern::new(alternative))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SizeReportError::InvalidIgnorePattern {
                pattern: source.to_string(),
                source: e,
            })?;
        Ok(Self {
            source: source.to_string(),
            patterns,
        })
    }

    /// Whether a file name or route is ignored
    ///
    /// # Examples
    ///
    /// ```
    /// use size_report::config::IgnorePattern;
    ///
    /// let maps = IgnorePattern::new("*.map").unwrap();
    /// assert!(maps.matches("index.js.map"));
    /// assert!(!maps.matches("dist/index.js.map"));
    /// assert!(!maps.matches("index.js"));
    ///
    /// let nested = IgnorePattern::new("**/*.map").unwrap();
    /// assert!(nested.matches("dist/index.js.map"));
    ///
    /// let styles = IgnorePattern::new("*.{css,scss}").unwrap();
    /// assert!(styles.matches("index.scss"));
    /// ```
    pub fn matches(&self, filename: &str) -> bool {
        const OPTIONS: glob::MatchOptions = glob::MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: true,
        };
        self.patterns
            .iter()
            .any(|pattern| pattern.matches_with(filename, OPTIONS))
    }

    /// The glob as written
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Expand the first `{a,b}` group and recurse on every alternative
///
/// Groups without a top-level comma, unbalanced braces and braces inside
/// `[...]` classes stay literal.
fn expand_braces(source: &str) -> Vec<String> {
    let mut depth = 0usize;
    let mut open = 0;
    let mut commas = Vec::new();
    let mut in_class = false;

    for (i, c) in source.char_indices() {
        match c {
            '[' if !in_class => in_class = true,
            ']' if in_class => in_class = false,
            _ if in_class => {}
            '{' => {
                if depth == 0 {
                    open = i;
                    commas.clear();
                }
                depth += 1;
            }
            ',' if depth == 1 => commas.push(i),
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 && !commas.is_empty() {
                    let prefix = &source[..open];
                    let suffix = &source[i + 1..];
                    let mut bounds = vec![open];
                    bounds.extend(&commas);
                    bounds.push(i);

                    return bounds
                        .windows(2)
                        .flat_map(|w| {
                            let alternative = &source[w[0] + 1..w[1]];
                            expand_braces(&format!("{}{}{}", prefix, alternative, suffix))
                        })
                        .collect();
                }
            }
            _ => {}
        }
    }

    vec![source.to_string()]
}

/// Options for rendering one diff table
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Show the total size line
    pub show_total: bool,
    /// Put rows below the threshold in a collapsed section
    pub collapse_unchanged: bool,
    /// Drop rows below the threshold
    pub omit_unchanged: bool,
    /// Rows with `abs(delta)` below this are considered unchanged
    pub minimum_change_threshold: u64,
    /// Rows matching this are left out entirely
    pub ignore_patterns: Option<IgnorePattern>,
}

/// Which kind of group a table reports on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// Page routes of an application
    Applications,
    /// Published files of a package
    Packages,
}

/// Everything the report pipeline needs from configuration, validated
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    /// Report language
    pub locale: Locale,
    /// Compression the sizes were measured with
    pub compression: Compression,
    /// Script the builder runs
    pub build_script: String,
    /// Options for application tables
    pub applications: RenderOptions,
    /// Options for package tables
    pub packages: RenderOptions,
}

impl ReportSettings {
    /// Validate a configuration and resolve per-table options
    ///
    /// Checks run in the order language, build script, compression,
    /// ignore pattern; the first failure is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use size_report::config::{ConfigFile, ReportSettings, TableKind};
    ///
    /// let settings = ReportSettings::from_config(&ConfigFile::default()).unwrap();
    /// assert_eq!(settings.options_for(TableKind::Applications).minimum_change_threshold, 1000);
    /// assert_eq!(settings.options_for(TableKind::Packages).minimum_change_threshold, 10);
    ///
    /// let config = ConfigFile {
    ///     minimum_change_threshold: Some(0),
    ///     ..Default::default()
    /// };
    /// let settings = ReportSettings::from_config(&config).unwrap();
    /// assert_eq!(settings.options_for(TableKind::Applications).minimum_change_threshold, 0);
    /// ```
    pub fn from_config(config: &ConfigFile) -> Result<Self, SizeReportError> {
        let locale: Locale = config.language.parse()?;
        check_build_script(&config.build_script)?;
        let compression: Compression = config.compression.parse()?;
        let ignore_patterns = config
            .ignore_patterns
            .as_deref()
            .filter(|pattern| !pattern.is_empty())
            .map(IgnorePattern::new)
            .transpose()?;

        let options = |default_threshold: u64| RenderOptions {
            show_total: config.show_total,
            collapse_unchanged: config.collapse_unchanged,
            omit_unchanged: config.omit_unchanged,
            minimum_change_threshold: config.minimum_change_threshold.unwrap_or(default_threshold),
            ignore_patterns: ignore_patterns.clone(),
        };

        Ok(Self {
            locale,
            compression,
            build_script: config.build_script.clone(),
            applications: options(APPLICATION_CHANGE_THRESHOLD),
            packages: options(PACKAGE_CHANGE_THRESHOLD),
        })
    }

    /// Render options for one kind of table
    pub fn options_for(&self, kind: TableKind) -> &RenderOptions {
        match kind {
            TableKind::Applications => &self.applications,
            TableKind::Packages => &self.packages,
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        let options = |threshold| RenderOptions {
            show_total: true,
            collapse_unchanged: true,
            omit_unchanged: false,
            minimum_change_threshold: threshold,
            ignore_patterns: None,
        };
        Self {
            locale: Locale::En,
            compression: Compression::Gzip,
            build_script: "build".to_string(),
            applications: options(APPLICATION_CHANGE_THRESHOLD),
            packages: options(PACKAGE_CHANGE_THRESHOLD),
        }
    }
}
