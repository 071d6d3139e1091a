use thiserror::Error;

/// Domain errors surfaced to the caller of the catalog operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Please fill {field}")]
    Validation { field: &'static str },

    #[error("Invalid booking range: {0}")]
    InvalidRange(String),

    #[error("Position unavailable: {0}")]
    PositionUnavailable(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown sort mode: {0}")]
    UnknownSortMode(String),

    #[error("Listing not found: {0}")]
    ListingNotFound(String),
}
