//! Observable field index command

use clap::Args;

use crate::output::{format_output, lines};
use crate::AppContext;
use stixmap_core::{observable_type_fields, EntityType};

#[derive(Args)]
pub struct FieldsArgs {
    /// Only show fields for this type
    pub r#type: Option<String>,
}

pub fn run(args: &FieldsArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let index = observable_type_fields()?;

    match &args.r#type {
        Some(name) => {
            let entity_type: EntityType = name.parse()?;
            let fields = index.fields_for(entity_type);
            if fields.is_empty() {
                tracing::info!("{} has no observable reference fields", entity_type);
            }
            println!("{}", format_output(&fields, ctx.format, |f| lines(f.iter())));
        }
        None => {
            let output = format_output(index, ctx.format, |index| {
                lines(
                    index
                        .iter()
                        .map(|(t, fields)| format!("{}: {}", t, fields.join(", "))),
                )
            });
            println!("{}", output);
        }
    }

    Ok(())
}
