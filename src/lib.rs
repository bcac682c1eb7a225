#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! size-report library
//!
//! This library provides the core of a pull-request bundle size reporter:
//! per-file size diffs between two branch builds, noise filtering per
//! package or application, npm dependency change resolution, and the
//! markdown report. It can be used programmatically in addition to the CLI
//! interface.
//!
//! # Basic Example
//!
//! Diffing two size snapshots:
//!
//! ```
//! use size_report::diff::{diff_snapshots, DiffStatus, SizeSnapshot};
//!
//! let before = SizeSnapshot::from([("index.js".to_string(), 1000)]);
//! let after = SizeSnapshot::from([
//!     ("index.js".to_string(), 1200),
//!     ("chunk.js".to_string(), 500),
//! ]);
//!
//! let diffs = diff_snapshots(&before, &after);
//! assert_eq!(diffs[0].delta, 200);
//! assert_eq!(diffs[1].status(), DiffStatus::Added);
//! ```
//!
//! # Advanced Example: Full Report
//!
//! Comparing two build snapshots and rendering the pull request comment:
//!
//! ```
//! use size_report::comparison::compare;
//! use size_report::config::{ConfigFile, ReportSettings};
//! use size_report::deps::OfflineLookup;
//! use size_report::diff::SizeSnapshot;
//! use size_report::i18n::Messages;
//! use size_report::manifest::BuildSnapshot;
//!
//! let mut base = BuildSnapshot::default();
//! base.packages.insert(
//!     "@scope/ui".to_string(),
//!     SizeSnapshot::from([("/dist/index.js".to_string(), 1000)]),
//! );
//! let mut head = base.clone();
//! head.packages["@scope/ui"]["/dist/index.js"] = 1200;
//!
//! let settings = ReportSettings::from_config(&ConfigFile::default()).unwrap();
//! let messages = Messages::new(settings.locale);
//! let comparison = compare(&base, &head, &settings, &OfflineLookup, &messages);
//!
//! assert!(comparison.report.contains("**Total Changes:** +200 B (+20%) 🚨"));
//! ```

/// Command handlers for CLI operations
pub mod cmd;
/// Base-vs-head comparison pipeline
pub mod comparison;
/// Configuration file loading and validation
pub mod config;
/// Dependency change resolution and size lookups
pub mod deps;
/// Size snapshot diffs
pub mod diff;
/// Enhanced error types with contextual suggestions
pub mod error;
/// Shared formatting utilities
pub mod fmt;
/// Git metadata utilities
pub mod git;
/// Localized report text
pub mod i18n;
/// Infrastructure traits for filesystem and command execution
pub mod infra;
/// Build snapshot and package.json models
pub mod manifest;
/// JSON output for CI integration
pub mod output;
/// Pull request comment publishing
pub mod publish;
/// Markdown report rendering
pub mod report;
