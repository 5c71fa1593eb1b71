//! Vocabulary listing command

use clap::{Args, ValueEnum};

use crate::output::{format_output, lines};
use crate::AppContext;
use stixmap_core::{CoreRelationType, EntityType, ObservableRelationType, TypeCategory};

/// What to list
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum Listing {
    #[default]
    Entities,
    #[value(name = "core-relationships")]
    CoreRelationships,
    #[value(name = "observable-relationships")]
    ObservableRelationships,
}

/// Entity category filter
#[derive(Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    DomainObject,
    Container,
    Identity,
    Location,
    CyberObservable,
    AbstractObservable,
}

impl From<CategoryArg> for TypeCategory {
    fn from(c: CategoryArg) -> Self {
        match c {
            CategoryArg::DomainObject => TypeCategory::DomainObject,
            CategoryArg::Container => TypeCategory::Container,
            CategoryArg::Identity => TypeCategory::Identity,
            CategoryArg::Location => TypeCategory::Location,
            CategoryArg::CyberObservable => TypeCategory::CyberObservable,
            CategoryArg::AbstractObservable => TypeCategory::AbstractObservable,
        }
    }
}

#[derive(Args)]
pub struct TypesArgs {
    /// Vocabulary to list
    #[arg(value_enum, default_value = "entities")]
    pub listing: Listing,

    /// Only entity types in this category
    #[arg(short, long, value_enum)]
    pub category: Option<CategoryArg>,
}

pub fn run(args: &TypesArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let names: Vec<&'static str> = match args.listing {
        Listing::Entities => match args.category {
            Some(category) => EntityType::of_category(category.into())
                .map(|t| t.as_str())
                .collect(),
            None => EntityType::ALL.iter().map(|t| t.as_str()).collect(),
        },
        Listing::CoreRelationships => CoreRelationType::ALL.iter().map(|r| r.as_str()).collect(),
        Listing::ObservableRelationships => ObservableRelationType::ALL
            .iter()
            .map(|r| r.as_str())
            .collect(),
    };

    if args.category.is_some() && !matches!(args.listing, Listing::Entities) {
        tracing::warn!("--category only applies to entity types; ignoring it");
    }

    println!("{}", format_output(&names, ctx.format, |n| lines(n.iter())));
    Ok(())
}
