use crate::error::CatalogError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

mod draft;

pub use draft::{ListingDraft, DEFAULT_IMAGE};

/// Equipment category offered in the catalog
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Tractor,
    Trailer,
    Harvester,
    Tiller,
    Seeder,
    Sprayer,
    Baler,
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Tractor,
        Category::Trailer,
        Category::Harvester,
        Category::Tiller,
        Category::Seeder,
        Category::Sprayer,
        Category::Baler,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tractor => "Tractor",
            Category::Trailer => "Trailer",
            Category::Harvester => "Harvester",
            Category::Tiller => "Tiller",
            Category::Seeder => "Seeder",
            Category::Sprayer => "Sprayer",
            Category::Baler => "Baler",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CatalogError::UnknownCategory(s.to_string()))
    }
}

/// A point on the globe in degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

impl Position {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Finite and inside [-90, 90] x [-180, 180]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Equipment listing published by an owner
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub category: Category,
    pub rate_per_day: f64,
    pub location_name: String,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub lon: Option<f64>,
    #[serde(default)]
    pub image: String,
    pub owner_name: String,
    pub owner_phone: String,
    #[serde(default)]
    pub description: String,
}

impl Listing {
    /// Coordinates of the listing, if both are present and in range
    pub fn position(&self) -> Option<Position> {
        let pos = Position::new(self.lat?, self.lon?);
        pos.is_valid().then_some(pos)
    }

    /// Numeric value of the id, used as the recency key
    pub fn id_number(&self) -> Option<u64> {
        self.id.trim().parse().ok()
    }
}

/// Stored coordinates may be strings or garbage; anything non-numeric is treated as absent
fn lenient_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64().filter(|v| v.is_finite()))
}

/// A listing together with its distance to the current observer
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedListing {
    #[serde(flatten)]
    pub listing: Listing,
    pub distance_km: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!("tractor".parse::<Category>().unwrap(), Category::Tractor);
        assert_eq!(" BALER ".parse::<Category>().unwrap(), Category::Baler);
        assert!(matches!(
            "combine".parse::<Category>(),
            Err(CatalogError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_listing_reads_stored_layout() {
        let raw = r#"{
            "id": "1",
            "title": "Mahindra 575 Tractor",
            "category": "Tractor",
            "ratePerDay": 3500,
            "locationName": "Near Village Market",
            "lat": 12.9716,
            "lon": 77.5946,
            "image": "",
            "ownerName": "Ravi",
            "ownerPhone": "+91-90000-11111",
            "description": "Well-maintained tractor"
        }"#;
        let listing: Listing = serde_json::from_str(raw).unwrap();
        assert_eq!(listing.rate_per_day, 3500.0);
        assert_eq!(listing.position(), Some(Position::new(12.9716, 77.5946)));
        assert_eq!(listing.id_number(), Some(1));
    }

    #[test]
    fn test_malformed_coordinates_become_absent() {
        let raw = r#"{
            "id": "7", "title": "Old seeder", "category": "Seeder",
            "ratePerDay": 500, "locationName": "Shed",
            "lat": "north-ish", "lon": null,
            "ownerName": "Asha", "ownerPhone": "123"
        }"#;
        let listing: Listing = serde_json::from_str(raw).unwrap();
        assert_eq!(listing.lat, None);
        assert_eq!(listing.lon, None);
        assert_eq!(listing.position(), None);
    }

    #[test]
    fn test_out_of_range_position_is_invalid() {
        assert!(!Position::new(91.0, 0.0).is_valid());
        assert!(!Position::new(0.0, -180.5).is_valid());
        assert!(Position::new(-90.0, 180.0).is_valid());
    }
}
