//! Error types for Stixmap Core

use thiserror::Error;

/// Result type alias using Stixmap's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Stixmap error types
///
/// Every variant is a deterministic input or data fault; none is worth retrying
/// with the same arguments.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown entity type: {0}")]
    UnknownType(String),

    #[error("Unknown relationship type: {0}")]
    UnknownRelationshipType(String),

    #[error("Malformed identifier '{id}': {reason}")]
    MalformedIdentifier { id: String, reason: String },

    #[error("No field mapping for relationship type: {0}")]
    MissingFieldMapping(String),
}

impl Error {
    pub(crate) fn malformed(id: &str, reason: impl Into<String>) -> Self {
        Self::MalformedIdentifier {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}
