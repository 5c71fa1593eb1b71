//! Relationship check commands

use clap::Args;
use serde::Serialize;

use crate::output::{format_output, lines};
use crate::AppContext;
use stixmap_core::{Endpoint, EntityType, RelationshipValidator};

#[derive(Args)]
pub struct CheckArgs {
    /// Source type (entity type, or relationship type for core checks)
    pub from: String,
    /// Target type
    pub to: String,
    /// Relationship type
    pub relationship: String,
    /// Check against the observable table
    #[arg(long)]
    pub observable: bool,
}

#[derive(Args)]
pub struct AllowedArgs {
    /// Source type
    pub from: String,
    /// Target type
    pub to: String,
    /// List observable relationship types
    #[arg(long)]
    pub observable: bool,
}

#[derive(Serialize)]
struct CheckReport<'a> {
    from: &'a str,
    to: &'a str,
    relationship: &'a str,
    table: &'static str,
    allowed: bool,
}

fn table_name(observable: bool) -> &'static str {
    if observable {
        "observable"
    } else {
        "core"
    }
}

pub fn run_check(args: &CheckArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let validator = RelationshipValidator::stix();
    let allowed = if args.observable {
        validator.check_observable_relationship(&args.from, &args.to, &args.relationship)?
    } else {
        validator.check_core_relationship(&args.from, &args.to, &args.relationship)?
    };

    let report = CheckReport {
        from: &args.from,
        to: &args.to,
        relationship: &args.relationship,
        table: table_name(args.observable),
        allowed,
    };
    println!(
        "{}",
        format_output(&report, ctx.format, |r| format!(
            "{}: {} -[{}]-> {}",
            if r.allowed { "allowed" } else { "denied" },
            r.from,
            r.relationship,
            r.to
        ))
    );

    if !allowed {
        std::process::exit(1);
    }
    Ok(())
}

pub fn run_allowed(args: &AllowedArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let validator = RelationshipValidator::stix();

    let relationships: Vec<&'static str> = if args.observable {
        let from: EntityType = args.from.parse()?;
        let to: EntityType = args.to.parse()?;
        validator
            .allowed_observable_relationships(from, to)
            .iter()
            .map(|r| r.as_str())
            .collect()
    } else {
        let from: Endpoint = args.from.parse()?;
        let to: Endpoint = args.to.parse()?;
        validator
            .allowed_core_relationships(from, to)
            .iter()
            .map(|r| r.as_str())
            .collect()
    };

    tracing::info!(
        "{} {} relationship types from {} to {}",
        relationships.len(),
        table_name(args.observable),
        args.from,
        args.to
    );
    println!("{}", format_output(&relationships, ctx.format, |r| lines(r.iter())));
    Ok(())
}
