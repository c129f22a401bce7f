//! Store error types.

use crate::domain::{DomainError, LocationId};

/// Errors that can occur when reading or writing the store.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// No record with this id
    #[error("{kind} not found with id: {id}")]
    NotFound { kind: &'static str, id: u64 },

    /// Payload failed domain validation
    #[error(transparent)]
    Invalid(#[from] DomainError),

    /// A leg refers to a location that does not exist
    #[error("Location not found with id: {0}")]
    UnknownLocation(LocationId),

    /// Location names are unique
    #[error("Duplicate key violation: a location named {0:?} already exists")]
    DuplicateName(String),

    /// A location cannot be deleted while legs use it
    #[error("location {id} is used by {legs} transportation(s)")]
    LocationInUse { id: LocationId, legs: usize },

    /// Seed file could not be read or applied
    #[error("seed error: {message}")]
    Seed { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StoreError::NotFound {
            kind: "Transportation",
            id: 9,
        };
        assert_eq!(err.to_string(), "Transportation not found with id: 9");

        let err = StoreError::from(DomainError::EmptyName("location"));
        assert_eq!(err.to_string(), "location name is required");

        let err = StoreError::DuplicateName("Taksim Square".into());
        assert_eq!(
            err.to_string(),
            "Duplicate key violation: a location named \"Taksim Square\" already exists"
        );

        let err = StoreError::LocationInUse {
            id: LocationId(3),
            legs: 2,
        };
        assert_eq!(err.to_string(), "location 3 is used by 2 transportation(s)");
    }
}
