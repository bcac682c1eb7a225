//! Report command implementation
//!
//! Handles the `size-report report` command: loads the base and head build
//! snapshots, compares them, and writes, prints or publishes the report.

use anyhow::{Context, Result};
use console::style;
use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::comparison::{compare, Comparison};
use crate::config::{ConfigLoader, ConfigOverrides, ReportSettings, ValidatorRegistry};
use crate::deps::{CachedLookup, NpmRegistry, OfflineLookup, SizeLookup};
use crate::error::SizeReportError;
use crate::fmt::{CHART, CHECKMARK};
use crate::git::GitRepository;
use crate::i18n::Messages;
use crate::infra::{FileSystem, RealFileSystem};
use crate::manifest::BuildSnapshot;
use crate::output::JsonOutput;
use crate::publish::{publish_report, require_gh, GhCliStore, PublishOutcome};

/// Pull request to publish the report on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishTarget {
    /// `owner/name`
    pub repo: String,
    /// Pull request number
    pub pr: u64,
}

/// Options of one `report` invocation
#[derive(Debug, Clone, Default)]
pub struct ReportArgs {
    /// Snapshot of the base branch build
    pub base: PathBuf,
    /// Snapshot of the head branch build
    pub head: PathBuf,
    /// Directory holding `.size-report.toml`
    pub config_dir: PathBuf,
    /// Write the comment body here
    pub output: Option<PathBuf>,
    /// Print a JSON summary instead of the markdown body
    pub json: bool,
    /// Publish to this pull request
    pub publish: Option<PublishTarget>,
    /// Head commit shown in the empty report
    pub commit: Option<String>,
    /// Skip npm registry lookups (all dependency sizes are 0)
    pub offline: bool,
    /// Flag values that override the config file
    pub overrides: ConfigOverrides,
}

/// Generate the size report for a pull request
///
/// # Examples
///
/// ```no_run
/// use size_report::cmd::report::{cmd_report, ReportArgs};
///
/// cmd_report(&ReportArgs {
///     base: ".base/size-snapshot.json".into(),
///     head: ".head/size-snapshot.json".into(),
///     config_dir: ".".into(),
///     ..Default::default()
/// })?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid
/// - Either snapshot is missing, malformed or has a manifest without a name
/// - Publishing is requested and `gh` is missing or the API call fails
pub fn cmd_report(args: &ReportArgs) -> Result<()> {
    let settings = load_settings(&args.config_dir, args.overrides.clone())?;
    let messages = Messages::new(settings.locale);

    if args.publish.is_some() {
        require_gh()?;
    }

    let base = load_snapshot(&args.base, "base")?;
    let head = load_snapshot(&args.head, "head")?;

    let lookup: Box<dyn SizeLookup> = if args.offline {
        info!("Registry lookups disabled, dependency sizes are reported as 0");
        Box::new(OfflineLookup)
    } else {
        Box::new(CachedLookup::new(NpmRegistry::new()))
    };

    let comparison = compare(&base, &head, &settings, lookup.as_ref(), &messages);
    let commit = if comparison.is_empty() {
        resolve_commit(args.commit.as_deref())
    } else {
        None
    };
    let body = comparison.comment_body(&messages, commit.as_deref());

    if let Some(path) = &args.output {
        write_body(&RealFileSystem, path, &body)?;
        eprintln!(
            "{} Report written to {}",
            CHECKMARK,
            style(path.display()).cyan()
        );
    }

    let published = match &args.publish {
        Some(target) => Some(publish(target, &body)?),
        None => None,
    };

    if args.json {
        let mut output = JsonOutput::new(&comparison, &settings);
        if let Some(outcome) = published {
            output = output.with_published(outcome);
        }
        println!("{}", output.to_json()?);
    } else if args.output.is_none() && args.publish.is_none() {
        println!("{}", body);
    }

    print_summary(&comparison);
    Ok(())
}

/// Load `.size-report.toml`, apply flag overrides and validate
pub fn load_settings(config_dir: &Path, overrides: ConfigOverrides) -> Result<ReportSettings> {
    let config = ConfigLoader::load(config_dir)?.with_overrides(overrides);

    for issue in ValidatorRegistry::with_defaults().validate_all(&config).warnings() {
        warn!("{}: {}", issue.field, issue.message);
    }

    let settings = ReportSettings::from_config(&config)?;
    Ok(settings)
}

fn load_snapshot(path: &Path, branch: &str) -> Result<BuildSnapshot> {
    BuildSnapshot::load(path)
        .map_err(SizeReportError::from)
        .with_context(|| format!("Failed to load {} snapshot", branch))
}

fn resolve_commit(explicit: Option<&str>) -> Option<String> {
    if let Some(sha) = explicit {
        return Some(sha.to_string());
    }
    match GitRepository::new().head_commit() {
        Ok(sha) => sha,
        Err(e) => {
            warn!("Could not read the head commit: {}", e);
            None
        }
    }
}

fn write_body<FS: FileSystem>(fs: &FS, path: &Path, body: &str) -> Result<()> {
    fs.write(path, body).map_err(|source| SizeReportError::Io {
        context: format!("writing report to {}", path.display()),
        source,
    })?;
    Ok(())
}

fn publish(target: &PublishTarget, body: &str) -> Result<PublishOutcome> {
    let store = GhCliStore::new(target.repo.as_str(), target.pr);
    let outcome = publish_report(&store, body).map_err(SizeReportError::from)?;

    let verb = match outcome {
        PublishOutcome::Created => "Posted",
        PublishOutcome::Updated(_) => "Updated",
    };
    eprintln!(
        "{} {} report on {}#{}",
        CHECKMARK,
        verb,
        style(&target.repo).cyan(),
        target.pr
    );
    Ok(outcome)
}

fn print_summary(comparison: &Comparison) {
    let dependency_changes: usize = comparison.dependencies.values().map(Vec::len).sum();
    eprintln!(
        "{} {} application group(s), {} package group(s), {} dependency change(s)",
        CHART,
        style(comparison.applications.len()).bold(),
        style(comparison.packages.len()).bold(),
        style(dependency_changes).bold()
    );
}
