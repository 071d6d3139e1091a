//! Renter-side search: conjunctive filters followed by one stable sort.

use crate::error::CatalogError;
use crate::models::{AnnotatedListing, Category, Position};
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::fmt;
use std::str::FromStr;

/// Radius used when the renter has not picked one
pub const DEFAULT_RADIUS_KM: f64 = 50.0;

/// Result ordering
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Distance,
    Price,
    Newest,
}

impl FromStr for SortMode {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distance" => Ok(SortMode::Distance),
            "price" => Ok(SortMode::Price),
            "newest" => Ok(SortMode::Newest),
            _ => Err(CatalogError::UnknownSortMode(s.to_string())),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortMode::Distance => "distance",
            SortMode::Price => "price",
            SortMode::Newest => "newest",
        })
    }
}

/// What the radius filter does with listings that have no distance
/// while an observer and a radius are both set
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UnlocatedPolicy {
    #[default]
    Exclude,
    Keep,
}

/// Search, filter and sort criteria supplied by the renter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterSpec {
    /// Case-insensitive substring matched against title and description
    pub query: String,
    pub category: Option<Category>,
    pub min_rate: Option<f64>,
    pub max_rate: Option<f64>,
    /// Radius around the observer, in kilometres
    pub max_km: Option<f64>,
    pub sort_by: SortMode,
    pub observer: Option<Position>,
    pub unlocated: UnlocatedPolicy,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: None,
            min_rate: None,
            max_rate: None,
            max_km: Some(DEFAULT_RADIUS_KM),
            sort_by: SortMode::Distance,
            observer: None,
            unlocated: UnlocatedPolicy::Exclude,
        }
    }
}

impl FilterSpec {
    fn matches_text(&self, item: &AnnotatedListing) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        item.listing.title.to_lowercase().contains(&needle)
            || item.listing.description.to_lowercase().contains(&needle)
    }

    fn matches_category(&self, item: &AnnotatedListing) -> bool {
        self.category.map_or(true, |c| item.listing.category == c)
    }

    fn matches_min_rate(&self, item: &AnnotatedListing) -> bool {
        self.min_rate.map_or(true, |min| item.listing.rate_per_day >= min)
    }

    fn matches_max_rate(&self, item: &AnnotatedListing) -> bool {
        self.max_rate.map_or(true, |max| item.listing.rate_per_day <= max)
    }

    fn matches_radius(&self, item: &AnnotatedListing) -> bool {
        // An out-of-range observer yields no distances, so it counts as no observer
        let observer = self.observer.filter(Position::is_valid);
        let (Some(_), Some(max_km)) = (observer, self.max_km) else {
            return true;
        };
        match item.distance_km {
            Some(d) => d <= max_km,
            None => self.unlocated == UnlocatedPolicy::Keep,
        }
    }

    /// True when the listing passes every active filter
    pub fn accepts(&self, item: &AnnotatedListing) -> bool {
        self.matches_text(item)
            && self.matches_category(item)
            && self.matches_min_rate(item)
            && self.matches_max_rate(item)
            && self.matches_radius(item)
    }
}

fn compare(mode: SortMode, a: &AnnotatedListing, b: &AnnotatedListing) -> Ordering {
    match mode {
        SortMode::Price => a.listing.rate_per_day.total_cmp(&b.listing.rate_per_day),
        // Ids that are not numbers compare as None and land after every numeric id
        SortMode::Newest => Reverse(a.listing.id_number()).cmp(&Reverse(b.listing.id_number())),
        SortMode::Distance => {
            let da = a.distance_km.unwrap_or(f64::INFINITY);
            let db = b.distance_km.unwrap_or(f64::INFINITY);
            da.total_cmp(&db)
        }
    }
}

/// Filter and order annotated listings. An empty result is a valid answer.
pub fn query(annotated: &[AnnotatedListing], spec: &FilterSpec) -> Vec<AnnotatedListing> {
    let mut results: Vec<AnnotatedListing> = annotated
        .iter()
        .filter(|item| spec.accepts(item))
        .cloned()
        .collect();
    // sort_by is stable, ties keep input order
    results.sort_by(|a, b| compare(spec.sort_by, a, b));
    results
}
