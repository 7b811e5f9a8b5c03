// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use moddict::analysis::{render, AnalysisKind, AnalysisOptions, Analyzer, OutputFormat};
use moddict::app_config::{Config, LogLevel};
use moddict::database::{DatabaseConnection, Repository};
use moddict::errors::AppError;

/// CLI Wrapper for AnalysisKind to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliAnalysisKind {
    Consistency,
    Phrases,
    Terms,
    All,
}

impl From<CliAnalysisKind> for AnalysisKind {
    fn from(kind: CliAnalysisKind) -> Self {
        match kind {
            CliAnalysisKind::Consistency => AnalysisKind::Consistency,
            CliAnalysisKind::Phrases => AnalysisKind::Phrases,
            CliAnalysisKind::Terms => AnalysisKind::Terms,
            CliAnalysisKind::All => AnalysisKind::All,
        }
    }
}

/// CLI Wrapper for OutputFormat to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Summary,
    Json,
    Csv,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(format: CliOutputFormat) -> Self {
        match format {
            CliOutputFormat::Summary => OutputFormat::Summary,
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Csv => OutputFormat::Csv,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
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
    /// Analyze translation consistency, recurring phrases and term compliance
    Analyze(AnalyzeArgs),

    /// Generate shell completions for moddict
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct AnalyzeArgs {
    /// Analysis to run
    #[arg(value_enum, default_value = "all")]
    kind: CliAnalysisKind,

    /// Translation database path
    #[arg(long, env = "MODDICT_DB")]
    db: Option<PathBuf>,

    /// Restrict the analysis to one mod
    #[arg(short, long = "mod", value_name = "MOD_ID")]
    mod_id: Option<String>,

    /// Report format
    #[arg(short, long, value_enum)]
    format: Option<CliOutputFormat>,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Minimum occurrences for a reported phrase
    #[arg(long)]
    min_count: Option<usize>,

    /// Configuration file path
    #[arg(short, long, default_value = "moddict.json")]
    config: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// moddict - translation dictionary analysis for game mods
#[derive(Parser, Debug)]
#[command(name = "moddict")]
#[command(version)]
#[command(about = "Translation consistency analysis for mod localization")]
#[command(long_about = "moddict inspects a translation database and reports inconsistent translations, \
recurring phrases translated in several ways, and violations of the term dictionary.

EXAMPLES:
    moddict analyze                               # Run every analysis over all mods
    moddict analyze consistency --mod create      # Same-source divergence in one mod
    moddict analyze phrases --min-count 5         # Phrases seen at least 5 times
    moddict analyze all -f json -o report.json    # Save a JSON report
    moddict completions bash > moddict.bash       # Generate bash completions")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        // Filtering happens through log::max_level so it can change after init
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
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
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                color,
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
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "moddict", &mut std::io::stdout());
            Ok(())
        }
        Commands::Analyze(args) => run_analyze(args).await,
    }
}

/// Load the config file and apply command line overrides
fn load_config(args: &AnalyzeArgs) -> Result<Config> {
    let mut config = Config::load(&args.config)?;

    if let Some(db) = &args.db {
        config.database_path = Some(db.to_string_lossy().into_owned());
    }

    if let Some(format) = args.format {
        config.format = format.into();
    }

    if let Some(min_count) = args.min_count {
        config.min_count = min_count;
    }

    if let Some(log_level) = args.log_level {
        config.log_level = log_level.into();
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

async fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    // Apply a command line log level before the config is read
    if let Some(level) = args.log_level {
        log::set_max_level(LogLevel::from(level).to_level_filter());
    }

    let config = load_config(&args)?;
    log::set_max_level(config.log_level.to_level_filter());

    let db_path = config.resolved_database_path()?;
    let db = DatabaseConnection::open_read_only(&db_path)?;
    info!("Database {:?}: {}", db.path(), db.stats()?);

    let analyzer = Analyzer::new(Repository::new(db));

    let mut options = AnalysisOptions::default().with_min_count(config.min_count);
    options.mod_id = args.mod_id.clone();

    let result = analyzer
        .run(args.kind.into(), &options)
        .await
        .map_err(AppError::from)?;
    let report = render(&result, config.format).map_err(AppError::from)?;

    match &args.out {
        Some(path) => {
            std::fs::write(path, report)
                .map_err(|e| AppError::File(format!("Failed to write {:?}: {}", path, e)))?;
            info!("Output written to: {:?}", path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(report.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
