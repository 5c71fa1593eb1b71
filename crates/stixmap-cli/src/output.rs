//! Output formatting utilities

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        <Self as ValueEnum>::from_str(s, true)
            .map_err(|_| anyhow::anyhow!("Invalid format '{}': expected text or json", s))
    }
}

/// Format output based on format type; `text` renders the plain form
pub fn format_output<T: Serialize>(
    data: &T,
    format: OutputFormat,
    text: impl FnOnce(&T) -> String,
) -> String {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
        }
        OutputFormat::Text => text(data),
    }
}

/// One item per line
pub fn lines<I, D>(items: I) -> String
where
    I: IntoIterator<Item = D>,
    D: std::fmt::Display,
{
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
