use crate::models::Listing;
use crate::providers::seed::seed_listings;
use crate::providers::traits::ListingRepository;
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

/// In-process listing store
pub struct MemoryRepository {
    listings: RwLock<Vec<Listing>>,
}

impl MemoryRepository {
    /// Store pre-filled with the seed listings
    pub fn new() -> Self {
        Self::with_listings(seed_listings())
    }

    pub fn with_listings(listings: Vec<Listing>) -> Self {
        Self {
            listings: RwLock::new(listings),
        }
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ListingRepository for MemoryRepository {
    async fn load_all(&self) -> Result<Vec<Listing>> {
        Ok(self.listings.read().await.clone())
    }

    async fn append(&self, listing: Listing) -> Result<()> {
        debug!("Appending listing {} in memory", listing.id);
        self.listings.write().await.push(listing);
        Ok(())
    }

    fn store_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_starts_with_seed_and_keeps_appends() {
        let repo = MemoryRepository::new();
        let mut extra = seed_listings().remove(0);
        extra.id = "99".to_string();

        let before = repo.load_all().await.unwrap();
        repo.append(extra).await.unwrap();
        let after = repo.load_all().await.unwrap();

        assert_eq!(before.len(), 3);
        assert_eq!(after.len(), 4);
        assert_eq!(after.last().unwrap().id, "99");
    }
}
