// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::io::Write;
use std::path::PathBuf;

use folio::app_config::{IndexerConfig, LogLevel};
use folio::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for folio
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Folio - scene index builder
///
/// Scans a directory tree for JSON scene documents and writes a single
/// index of plays and their scenes in canonical order.
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
#[command(about = "Build an index of theatrical scene documents")]
#[command(long_about = "Folio scans a directory tree for JSON scene documents, groups them by play and writes index.json.

EXAMPLES:
    folio                              # Index the current directory
    folio plays/                       # Index another directory
    folio ./completions                # Index a directory named like a subcommand
    folio -o catalog.json              # Write the index under a different name
    folio --check                      # Fail if index.json is out of date
    folio --log-level debug            # Show every skipped file
    folio completions bash > folio.bash

CONFIGURATION:
    An optional JSON file given with --config may set extension, output_file,
    skip_dirs, skip_files, concurrent_reads and log_level. Command line flags
    take precedence over the file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory to scan (defaults to the current directory)
    #[arg(value_name = "ROOT")]
    root: Option<PathBuf>,

    /// Index file, relative to ROOT unless absolute
    #[arg(short, long)]
    output: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Maximum number of files read at once
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Verify the existing index instead of writing it
    #[arg(long)]
    check: bool,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Everything is let through the logger; the max level does the filtering
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "folio", &mut std::io::stdout());
        return Ok(());
    }

    run_index(cli).await
}

async fn run_index(options: CommandLineOptions) -> Result<()> {
    let mut config = match &options.config {
        Some(path) => IndexerConfig::from_file(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => IndexerConfig::default(),
    };

    if let Some(output) = options.output {
        config.output_file = output;
    }
    if let Some(jobs) = options.jobs {
        config.concurrent_reads = jobs;
    }
    if let Some(log_level) = options.log_level {
        config.log_level = log_level.into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    let root = match options.root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to resolve the current directory")?,
    };

    let controller = Controller::with_config(&root, config)?;

    if options.check {
        let summary = controller.check().await?;
        info!(
            "{:?} is up to date ({} plays, {} scenes)",
            summary.output_path, summary.plays, summary.scenes
        );
        return Ok(());
    }

    let summary = controller.run().await?;
    println!(
        "Wrote {} with {} plays, {} scenes.",
        summary.output_path.display(),
        summary.plays,
        summary.scenes
    );

    Ok(())
}
