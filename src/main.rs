use clap::{Parser, Subcommand};
use log::{LevelFilter, debug, error, info, warn};
use simplelog::{CombinedLogger, Config as LogConfig, SharedLogger, TermLogger, TerminalMode, WriteLogger};
use std::path::PathBuf;
use std::sync::Arc;

mod client;
mod commands;
mod config;
mod context;
mod error;
mod operations;
mod projects;
mod reporter;
#[cfg(all(test, unix))]
mod test_support;

use client::Client;
use config::{Settings, SettingsSource};
use context::Context;
use error::Result;
use projects::{DEFAULT_CONFIG_FILE, ProjectConfig};
use reporter::{ConsoleReporter, Reporter};

#[derive(Parser)]
#[command(name = "nts")]
#[command(about = "Check out, update and inspect a set of Subversion working copies")]
#[command(version)]
#[command(after_help = concat!("version ", env!("CARGO_PKG_VERSION")))]
struct Cli {
    /// Project config file, looked up in the current directory then $HOME
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Show client output and other details
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print debug logs to console
    #[arg(long, global = true)]
    debug: bool,

    /// Version-control client to run instead of `svn`
    #[arg(long, global = true, env = "NTS_CLIENT")]
    client: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List projects
    List,

    /// Get the source control info of every project
    Info,

    /// Generate a config file in the current directory
    Generate {
        /// Write an example config instead of scanning for working copies
        #[arg(value_parser = ["sample"])]
        sample: Option<String>,
    },

    /// Update every project's working copy
    Update,

    /// Initialize projects (svn checkout)
    Init,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let (settings, source) = Settings::load();
    let settings = settings.with_client(cli.client.clone());
    init_logging(&settings, cli.debug);
    match source {
        SettingsSource::Ignored { .. } => warn!("settings: {}", source),
        _ => debug!("settings: {}", source),
    }

    let reporter: Arc<dyn Reporter> = Arc::new(ConsoleReporter::new());

    if let Err(e) = run(cli, settings, reporter.clone()).await {
        error!("{}", e);
        reporter.error(&e.to_string());
        std::process::exit(1);
    }
}

fn init_logging(settings: &Settings, debug: bool) {
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    // Terminal logger: only when --debug is passed
    if debug {
        loggers.push(TermLogger::new(
            LevelFilter::Debug,
            LogConfig::default(),
            TerminalMode::Stderr,
            simplelog::ColorChoice::Auto,
        ));
    }

    // File logger: always on, best effort
    let log_path = settings.logs_dir.join("nts.log");
    if let Ok(()) = std::fs::create_dir_all(&settings.logs_dir)
        && let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
    {
        loggers.push(WriteLogger::new(LevelFilter::Debug, LogConfig::default(), file));
    }

    if !loggers.is_empty() {
        let _ = CombinedLogger::init(loggers);
    }
}

async fn run(cli: Cli, settings: Settings, reporter: Arc<dyn Reporter>) -> Result<()> {
    let base_dir = std::env::current_dir()?;
    debug!("run: base dir {}, client '{}'", base_dir.display(), settings.client);

    let ctx = Context::new(Client::new(settings.client), reporter, base_dir, cli.verbose);

    match cli.command {
        Commands::List => {
            debug!("command: list (verbose={})", cli.verbose);
            let projects = load_projects(&cli.config)?;
            commands::handle_list(&projects, &ctx)?;
        }
        Commands::Info => {
            info!("command: info");
            let projects = load_projects(&cli.config)?;
            commands::handle_info(projects, &ctx).await;
        }
        Commands::Generate { ref sample } => {
            info!("command: generate (sample={:?})", sample);
            commands::handle_generate(sample.is_some(), &cli.config, &ctx).await?;
        }
        Commands::Update => {
            info!("command: update (verbose={})", cli.verbose);
            let projects = load_projects(&cli.config)?;
            commands::handle_update(projects, &ctx).await;
        }
        Commands::Init => {
            info!("command: init (verbose={})", cli.verbose);
            let projects = load_projects(&cli.config)?;
            commands::handle_init(projects, &ctx).await;
        }
    }

    Ok(())
}

fn load_projects(file: &std::path::Path) -> Result<ProjectConfig> {
    ProjectConfig::load(file, &projects::search_dirs()?)
}
