use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use std::process;

use size_report::cmd::{self, PublishTarget, ReportArgs};
use size_report::config::{ConfigLoader, ConfigOverrides};
use size_report::error::ErrorFormatter;
use size_report::i18n::{Locale, Messages};

/// Pull-request bundle size reporter
///
/// size-report compares the build snapshots of a pull request's base and
/// head branches and renders a markdown report of file size and dependency
/// changes, optionally posting it as a pull request comment.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable emoji output (useful for CI/CD or accessibility)
    #[arg(long, global = true)]
    no_emoji: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two build snapshots and render the report
    Report(ReportCommand),

    /// Validate .size-report.toml
    CheckConfig {
        /// Directory containing .size-report.toml
        #[arg(long, default_value = ".")]
        config_dir: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
struct ReportCommand {
    /// Build snapshot of the base branch
    #[arg(long, value_name = "FILE")]
    base: PathBuf,

    /// Build snapshot of the head branch
    #[arg(long, value_name = "FILE")]
    head: PathBuf,

    /// Directory containing .size-report.toml
    #[arg(long, default_value = ".")]
    config_dir: PathBuf,

    /// Write the comment body to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output a JSON summary (for CI/CD integration)
    #[arg(long)]
    json: bool,

    /// Post the report as a pull request comment through `gh`
    #[arg(long, requires = "pr")]
    publish: bool,

    /// Repository of the pull request (owner/name)
    #[arg(long)]
    repo: Option<String>,

    /// Pull request number
    #[arg(long, requires = "repo")]
    pr: Option<u64>,

    /// Head commit mentioned when nothing changed (defaults to git HEAD)
    #[arg(long, value_name = "SHA")]
    commit: Option<String>,

    /// Skip npm registry lookups; dependency sizes are reported as 0
    #[arg(long)]
    no_registry: bool,

    /// Report language: en, ko
    #[arg(long)]
    language: Option<String>,

    /// Compression the sizes were measured with: none, gzip, brotli
    #[arg(long)]
    compression: Option<String>,

    /// Build script the snapshots were produced with
    #[arg(long)]
    build_script: Option<String>,

    /// Show the total size line
    #[arg(long, action = ArgAction::Set, value_name = "BOOL")]
    show_total: Option<bool>,

    /// Fold rows below the change threshold into a collapsed section
    #[arg(long, action = ArgAction::Set, value_name = "BOOL")]
    collapse_unchanged: Option<bool>,

    /// Drop rows below the change threshold
    #[arg(long, action = ArgAction::Set, value_name = "BOOL")]
    omit_unchanged: Option<bool>,

    /// Row change threshold in bytes (default 1000 for pages, 10 for packages)
    #[arg(long, value_name = "BYTES")]
    minimum_change_threshold: Option<u64>,

    /// Glob of files left out of tables and totals
    #[arg(long, value_name = "GLOB")]
    ignore_patterns: Option<String>,
}

impl ReportCommand {
    fn into_args(self) -> ReportArgs {
        let publish = match (self.publish, self.repo, self.pr) {
            (true, Some(repo), Some(pr)) => Some(PublishTarget { repo, pr }),
            _ => None,
        };

        ReportArgs {
            base: self.base,
            head: self.head,
            config_dir: self.config_dir,
            output: self.output,
            json: self.json,
            publish,
            commit: self.commit,
            offline: self.no_registry,
            overrides: ConfigOverrides {
                language: self.language,
                compression: self.compression,
                build_script: self.build_script,
                show_total: self.show_total,
                collapse_unchanged: self.collapse_unchanged,
                omit_unchanged: self.omit_unchanged,
                minimum_change_threshold: self.minimum_change_threshold,
                ignore_patterns: self.ignore_patterns,
            },
        }
    }
}

/// Messages for the failure summary, from the configured language when readable
fn failure_messages(command: &Option<Commands>) -> Messages {
    let (config_dir, flag) = match command {
        Some(Commands::Report(report)) => (report.config_dir.as_path(), report.language.clone()),
        Some(Commands::CheckConfig { config_dir }) => (config_dir.as_path(), None),
        _ => return Messages::default(),
    };

    let language = flag.or_else(|| ConfigLoader::load(config_dir).ok().map(|c| c.language));
    let locale = language
        .and_then(|code| code.parse::<Locale>().ok())
        .unwrap_or_default();
    Messages::new(locale)
}

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    // Set console emoji mode based on CLI flag
    if cli.no_emoji {
        std::env::set_var("NO_EMOJI", "1");
    }

    let messages = failure_messages(&cli.command);

    let result = match cli.command {
        Some(Commands::Report(report)) => cmd::cmd_report(&report.into_args()),
        Some(Commands::CheckConfig { config_dir }) => cmd::cmd_check_config(&config_dir),
        Some(Commands::Completions { shell }) => {
            cmd::cmd_completions(shell, &mut Cli::command());
            Ok(())
        }
        None => {
            // No subcommand provided, show help
            let _ = Cli::command().print_help();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}", ErrorFormatter::summary(&e, &messages));
        eprintln!();
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}
