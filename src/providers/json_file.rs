use crate::models::Listing;
use crate::providers::seed::seed_listings;
use crate::providers::traits::ListingRepository;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Default file name for the stored listing array
pub const DEFAULT_STORE_FILE: &str = "farm_rent_items.json";

/// Listing store backed by a JSON array on disk
pub struct JsonFileRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Vec<Listing>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No listings at {}, writing seed data", self.path.display());
                let seed = seed_listings();
                self.write(&seed).await?;
                return Ok(seed);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", self.path.display()))
            }
        };

        match serde_json::from_str::<Vec<Listing>>(&raw) {
            Ok(listings) => {
                debug!("Loaded {} listings from {}", listings.len(), self.path.display());
                Ok(listings)
            }
            Err(e) => {
                warn!("Unreadable listing store {} ({}), using seed data", self.path.display(), e);
                Ok(seed_listings())
            }
        }
    }

    async fn write(&self, listings: &[Listing]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(listings).context("Failed to serialize listings")?;

        // Write next to the target and rename so readers never see a partial file
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

#[async_trait]
impl ListingRepository for JsonFileRepository {
    async fn load_all(&self) -> Result<Vec<Listing>> {
        let _guard = self.write_lock.lock().await;
        self.read().await
    }

    async fn append(&self, listing: Listing) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut listings = self.read().await?;
        debug!("Appending listing {} to {}", listing.id, self.path.display());
        listings.push(listing);
        self.write(&listings).await?;
        info!("💾 Saved {} listings to {}", listings.len(), self.path.display());
        Ok(())
    }

    fn store_name(&self) -> &'static str {
        "json-file"
    }
}
