//! Stixmap CLI - Command line interface for the STIX relationship tables

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{check, completions, fields, ids, types};
use config::Config;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "stixmap")]
#[command(author, version, about = "STIX 2.1 relationship compatibility checks")]
pub struct Cli {
    /// Output format (default from config)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Config file
    #[arg(long, env = "STIXMAP_CONFIG", global = true)]
    pub config: Option<PathBuf>,

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
    /// Get the config file path
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(config::config_file_path)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check whether a relationship type may link two types
    Check(check::CheckArgs),
    /// List relationship types permitted between two types
    Allowed(check::AllowedArgs),
    /// Show observable reference fields
    Fields(fields::FieldsArgs),
    /// Cap transient STIX ids in a list
    CleanIds(ids::CleanIdsArgs),
    /// List the type vocabulary
    Types(types::TypesArgs),
    /// Manage configuration
    Config(commands::config::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Application context with loaded configuration
pub struct AppContext {
    pub config: Config,
    pub format: OutputFormat,
}

impl AppContext {
    pub fn new(cli: &Cli) -> anyhow::Result<Self> {
        let path = cli.config_path();
        tracing::debug!("Using config at: {:?}", path);

        let config = Config::load(&path)?;
        let format = cli.format.unwrap_or(config.format);

        Ok(Self { config, format })
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

    tracing::debug!("Starting stixmap CLI");

    // Config commands must work even when the config file does not parse
    if let Commands::Config(args) = &cli.command {
        return commands::config::run(args, &cli);
    }

    let ctx = AppContext::new(&cli)?;

    match &cli.command {
        Commands::Check(args) => check::run_check(args, &ctx)?,
        Commands::Allowed(args) => check::run_allowed(args, &ctx)?,
        Commands::Fields(args) => fields::run(args, &ctx)?,
        Commands::CleanIds(args) => ids::run(args, &ctx)?,
        Commands::Types(args) => types::run(args, &ctx)?,
        Commands::Completions(args) => completions::run(args)?,
        Commands::Config(_) => unreachable!("config commands return early"),
    }

    Ok(())
}
