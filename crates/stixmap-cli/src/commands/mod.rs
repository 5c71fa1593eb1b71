//! CLI command implementations

pub mod check;
pub mod completions;
pub mod config;
pub mod fields;
pub mod ids;
pub mod types;
