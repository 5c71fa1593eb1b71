//! Transient id cleaning command

use std::io::{self, BufRead};

use clap::Args;

use crate::output::{format_output, lines};
use crate::AppContext;
use stixmap_core::limits::validate_capacity;
use stixmap_core::{clean_ids, only_stable_ids};

#[derive(Args)]
pub struct CleanIdsArgs {
    /// STIX ids (read from stdin, one per line, when omitted)
    pub ids: Vec<String>,

    /// Transient ids to keep (default from config)
    #[arg(short, long)]
    pub capacity: Option<usize>,

    /// Drop every transient id
    #[arg(long, conflicts_with = "capacity")]
    pub stable_only: bool,
}

fn read_stdin_ids() -> anyhow::Result<Vec<String>> {
    let mut ids = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            ids.push(trimmed.to_string());
        }
    }
    Ok(ids)
}

pub fn run(args: &CleanIdsArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let input = if args.ids.is_empty() {
        read_stdin_ids()?
    } else {
        args.ids.clone()
    };

    let cleaned = if args.stable_only {
        only_stable_ids(&input)?
    } else {
        let capacity = args.capacity.unwrap_or(ctx.config.default_capacity);
        validate_capacity(capacity)?;
        clean_ids(&input, capacity)?
    };

    tracing::info!("Kept {} of {} ids", cleaned.len(), input.len());
    println!("{}", format_output(&cleaned, ctx.format, |ids| lines(ids.iter())));
    Ok(())
}
