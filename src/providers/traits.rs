use crate::error::CatalogError;
use crate::models::{Listing, Position};
use anyhow::Result;
use async_trait::async_trait;

/// Storage for listings.
/// Every `load_all` returns an owned snapshot, so a query never sees a half-applied write.
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// All stored listings, or the seed set when nothing has been stored yet
    async fn load_all(&self) -> Result<Vec<Listing>>;

    /// Store a new listing after the existing ones
    async fn append(&self, listing: Listing) -> Result<()>;

    /// Name of the backing store, for logs
    fn store_name(&self) -> &'static str;
}

/// Source of the renter's current position
#[async_trait]
pub trait PositionProvider: Send + Sync {
    async fn current_position(&self) -> Result<Position, CatalogError>;

    fn provider_name(&self) -> &'static str;
}
