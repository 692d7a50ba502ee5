//! Link-Audit main entry point
//!
//! This is the command-line interface for the Link-Audit link verifier.

use anyhow::Context;
use clap::Parser;
use link_audit::config::{load_config_with_hash, Config};
use link_audit::extract::ExtractBounds;
use link_audit::run::print_summary;
use link_audit::store::{open_store, ContentStore};
use link_audit::{RunController, RunMode, RunOptions, Scheme};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Link-Audit: link verification for course content
///
/// Link-Audit scans course book chapters, section summaries and external
/// URL resources for links, probes them in concurrent batches and writes
/// good/broken reports. It can optionally re-check good HTTP links over
/// HTTPS and rewrite the ones that work.
#[derive(Parser, Debug)]
#[command(name = "link-audit")]
#[command(version = "1.0.0")]
#[command(about = "Link verification and HTTPS migration for course content", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Which links to scan for (http or https)
    #[arg(long, default_value = "http")]
    scheme: Scheme,

    /// count: only count links; check: probe and write reports
    #[arg(long, default_value = "check")]
    mode: RunMode,

    /// Restrict the run to one course, by exact full name
    #[arg(long, value_name = "NAME")]
    course: Option<String>,

    /// Re-check good HTTP links over HTTPS
    #[arg(long)]
    check_conversion: bool,

    /// Rewrite links that work over HTTPS in the database (requires --check-conversion)
    #[arg(long, requires = "check_conversion")]
    update: bool,

    /// Global index of the first link to check
    #[arg(long, default_value_t = 0)]
    lower: usize,

    /// Global index the run stops at (exclusive)
    #[arg(long, default_value_t = 1000)]
    upper: usize,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// List course names in the database and exit
    #[arg(long)]
    list_courses: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.list_courses {
        handle_list_courses(&config)
    } else {
        handle_run(config, &cli).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("link_audit=info,warn"),
            1 => EnvFilter::new("link_audit=debug,info"),
            2 => EnvFilter::new("link_audit=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles --list-courses: prints every course full name
fn handle_list_courses(config: &Config) -> anyhow::Result<()> {
    let store = open_database(config)?;
    let courses = store.list_courses().context("failed to list courses")?;

    println!("Courses ({}):", courses.len());
    for course in &courses {
        println!("  - {}", course);
    }

    Ok(())
}

/// Handles the main audit run
async fn handle_run(config: Config, cli: &Cli) -> anyhow::Result<()> {
    let options = RunOptions {
        scheme: cli.scheme,
        mode: cli.mode,
        course: cli.course.clone(),
        check_conversion: cli.check_conversion,
        update: cli.update,
        bounds: ExtractBounds::new(cli.lower, cli.upper),
    };
    options.validate()?;

    let store = open_database(&config)?;
    let mut controller = RunController::new(config, store);

    match controller.execute(&options).await {
        Ok(report) => {
            print_summary(&report);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Run failed: {}", e);
            Err(e.into())
        }
    }
}

fn open_database(config: &Config) -> anyhow::Result<link_audit::store::SqliteStore> {
    let path = Path::new(&config.output.database_path);
    open_store(path).with_context(|| format!("failed to open database {}", path.display()))
}
