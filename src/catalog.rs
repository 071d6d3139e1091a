//! Catalog service: ties a listing store to search, add and booking.

use crate::booking::{BookingRequest, BookingSummary};
use crate::error::CatalogError;
use crate::geo::annotate;
use crate::models::{AnnotatedListing, Listing, ListingDraft};
use crate::providers::ListingRepository;
use crate::query::{query, FilterSpec};
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

pub struct Catalog {
    repository: Arc<dyn ListingRepository>,
}

impl Catalog {
    pub fn new(repository: Arc<dyn ListingRepository>) -> Self {
        Self { repository }
    }

    /// Search one snapshot of the store
    pub async fn browse(&self, spec: &FilterSpec) -> Result<Vec<AnnotatedListing>> {
        let listings = self.repository.load_all().await?;
        let annotated = annotate(&listings, spec.observer);
        let results = query(&annotated, spec);
        debug!(
            "Query over {} listings from {} matched {}",
            listings.len(),
            self.repository.store_name(),
            results.len()
        );
        Ok(results)
    }

    pub async fn find(&self, id: &str) -> Result<Option<Listing>> {
        let listings = self.repository.load_all().await?;
        Ok(listings.into_iter().find(|l| l.id == id))
    }

    /// Validate an owner's draft and publish it.
    ///
    /// The store is left untouched when validation fails.
    pub async fn add_listing(&self, draft: ListingDraft) -> Result<Listing> {
        let existing = self.repository.load_all().await?;
        let id = next_id(&existing, Utc::now().timestamp_millis());
        let listing = draft.into_listing(id)?;

        self.repository.append(listing.clone()).await?;
        info!("✅ Added listing {} ({})", listing.id, listing.title);
        Ok(listing)
    }

    /// Price a provisional booking for a listing
    pub async fn book(&self, id: &str, from: NaiveDate, to: NaiveDate) -> Result<BookingSummary> {
        let listing = self
            .find(id)
            .await?
            .ok_or_else(|| CatalogError::ListingNotFound(id.to_string()))?;
        let request = BookingRequest {
            listing_id: listing.id.clone(),
            from,
            to,
        };
        Ok(request.summarize(&listing)?)
    }
}

/// Timestamp-derived id, moved past the largest numeric id already stored
fn next_id(existing: &[Listing], now_millis: i64) -> String {
    let candidate = u64::try_from(now_millis).unwrap_or(0);
    let taken: HashSet<u64> = existing.iter().filter_map(Listing::id_number).collect();
    let mut id = match taken.iter().max() {
        // No room above u64::MAX, so fall back to the timestamp
        Some(&max) if max >= candidate => max.checked_add(1).unwrap_or(candidate),
        _ => candidate,
    };
    while taken.contains(&id) {
        id = id.wrapping_add(1);
    }
    id.to_string()
}
