//! Retention limits and fixed constants

/// STIX specification version the tables follow
pub const STIX_SPEC_VERSION: &str = "2.1";

/// Default number of transient ids kept per object (200)
pub const MAX_TRANSIENT_STIX_IDS: usize = 200;

/// Largest transient capacity accepted from user input (100000)
pub const MAX_TRANSIENT_CAPACITY: usize = 100_000;

/// Capacity validation error
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    CapacityTooLarge { capacity: usize, max: usize },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CapacityTooLarge { capacity, max } => {
                write!(f, "Transient id capacity too large: {} (max {})", capacity, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a user-supplied transient id capacity
pub fn validate_capacity(capacity: usize) -> Result<(), ValidationError> {
    if capacity > MAX_TRANSIENT_CAPACITY {
        return Err(ValidationError::CapacityTooLarge {
            capacity,
            max: MAX_TRANSIENT_CAPACITY,
        });
    }
    Ok(())
}
