//! Nasab CLI - Command line interface for GEDCOM import and export

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{completions, io};
use config::{config_file_path, Config};

#[derive(Parser)]
#[command(name = "nasab")]
#[command(author, version, about = "GEDCOM 5.5 import and export for Arabic family trees")]
pub struct Cli {
    /// Data directory (holds config.toml)
    #[arg(short, long, global = true, env = "NASAB_DATA_DIR")]
    pub data_dir: Option<String>,

    /// Summary format: table, json
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Get the data directory path
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::config_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("nasab")
            })
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import a GEDCOM file into a tree snapshot
    Import(io::ImportArgs),
    /// Export a tree snapshot as GEDCOM
    Export(io::ExportArgs),
    /// Parse a GEDCOM file and report problems
    Check(io::CheckArgs),
    /// Manage configuration
    Config(commands::config::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Application context: resolved paths and loaded configuration
pub struct AppContext {
    pub config_path: PathBuf,
    pub config: Config,
}

impl AppContext {
    pub fn new(cli: &Cli) -> Self {
        let config_path = config_file_path(&cli.data_dir());
        tracing::debug!("Using config at: {:?}", config_path);
        let config = Config::load(&config_path);
        Self {
            config_path,
            config,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting nasab CLI");

    let ctx = AppContext::new(&cli);

    match &cli.command {
        Commands::Import(args) => io::run_import(args, &cli)?,
        Commands::Export(args) => io::run_export(args, &cli, &ctx)?,
        Commands::Check(args) => io::run_check(args, &cli)?,
        Commands::Config(args) => commands::config::run(args, &ctx)?,
        Commands::Completions(args) => completions::run(args)?,
    }

    Ok(())
}
