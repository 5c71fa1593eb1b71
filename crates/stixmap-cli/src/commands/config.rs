//! Config command

use std::path::Path;

use clap::{Args, Subcommand};

use crate::config::Config;
use crate::Cli;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Get a config value
    Get {
        /// Config key name
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key name
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
    /// Initialize default config file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: &ConfigArgs, cli: &Cli) -> anyhow::Result<()> {
    let path = cli.config_path();
    match &args.command {
        ConfigCommands::Get { key } => run_get(&path, key),
        ConfigCommands::Set { key, value } => run_set(&path, key, value),
        ConfigCommands::List => run_list(&path),
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommands::Init { force } => run_init(&path, *force),
    }
}

fn run_get(path: &Path, key: &str) -> anyhow::Result<()> {
    let config = Config::load(path)?;
    let Some(value) = config.get(key) else {
        eprintln!("Unknown config key: {}", key);
        eprintln!("Available keys: {}", Config::keys().join(", "));
        std::process::exit(1);
    };
    println!("{}", value);
    Ok(())
}

fn run_set(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    // An unparseable file is overwritten with defaults plus this key
    let mut config = Config::load(path).unwrap_or_else(|e| {
        tracing::warn!("Ignoring unreadable config: {:#}", e);
        Config::default()
    });
    config.set(key, value)?;
    config.save(path)?;
    println!("Set {} = {}", key, value);
    Ok(())
}

fn run_list(path: &Path) -> anyhow::Result<()> {
    let config = Config::load(path)?;
    println!("# {}", path.display());
    for key in Config::keys() {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
    Ok(())
}

fn run_init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    Config::default().save(path)?;
    println!("Created config file at {}", path.display());
    Ok(())
}
