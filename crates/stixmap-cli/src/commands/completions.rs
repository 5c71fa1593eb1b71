//! Shell completion scripts

use std::io;
use std::path::PathBuf;

use clap::{Args, CommandFactory};
use clap_complete::{generate, generate_to, Shell};

use crate::Cli;

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write the script into this directory instead of stdout
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

pub fn run(args: &CompletionsArgs) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();

    match &args.dir {
        Some(dir) => {
            let path = generate_to(args.shell, &mut cmd, bin, dir)?;
            println!("Wrote {}", path.display());
        }
        None => generate(args.shell, &mut cmd, bin, &mut io::stdout()),
    }
    Ok(())
}
