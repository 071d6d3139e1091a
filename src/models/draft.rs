use super::{Category, Listing, Position};
use crate::error::CatalogError;

/// Image shown when the owner does not supply one
pub const DEFAULT_IMAGE: &str =
    "https://images.unsplash.com/photo-1542291026-7eec264c27ff?auto=format&fit=crop&w=1200&q=60";

/// Raw owner input for a new listing, as typed into the add form
#[derive(Debug, Clone, Default)]
pub struct ListingDraft {
    pub title: String,
    pub category: String,
    pub rate_per_day: String,
    pub location_name: String,
    pub lat: String,
    pub lon: String,
    pub image: String,
    pub owner_name: String,
    pub owner_phone: String,
    pub description: String,
}

impl ListingDraft {
    /// Fill the coordinate fields from a located position, six decimals each
    pub fn fill_coordinates(&mut self, position: Position) {
        self.lat = format!("{:.6}", position.lat);
        self.lon = format!("{:.6}", position.lon);
    }

    /// Validate the draft and turn it into a listing with the given id.
    ///
    /// Required fields are checked in form order; the first one that is
    /// blank or unparseable is reported.
    pub fn into_listing(self, id: String) -> Result<Listing, CatalogError> {
        let title = required(&self.title, "title")?;
        let category = required(&self.category, "category")?
            .parse::<Category>()
            .map_err(|_| CatalogError::Validation { field: "category" })?;
        let rate_per_day = number(&self.rate_per_day, "ratePerDay")?;
        if rate_per_day < 0.0 {
            return Err(CatalogError::Validation { field: "ratePerDay" });
        }
        let location_name = required(&self.location_name, "locationName")?;
        let lat = number(&self.lat, "lat")?;
        let lon = number(&self.lon, "lon")?;
        let position = Position::new(lat, lon);
        if !(-90.0..=90.0).contains(&position.lat) {
            return Err(CatalogError::Validation { field: "lat" });
        }
        if !(-180.0..=180.0).contains(&position.lon) {
            return Err(CatalogError::Validation { field: "lon" });
        }
        let owner_name = required(&self.owner_name, "ownerName")?;
        let owner_phone = required(&self.owner_phone, "ownerPhone")?;

        let image = match self.image.trim() {
            "" => DEFAULT_IMAGE.to_string(),
            url => url.to_string(),
        };

        Ok(Listing {
            id,
            title: title.to_string(),
            category,
            rate_per_day,
            location_name: location_name.to_string(),
            lat: Some(position.lat),
            lon: Some(position.lon),
            image,
            owner_name: owner_name.to_string(),
            owner_phone: owner_phone.to_string(),
            description: self.description.trim().to_string(),
        })
    }
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, CatalogError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(CatalogError::Validation { field })
    } else {
        Ok(trimmed)
    }
}

fn number(value: &str, field: &'static str) -> Result<f64, CatalogError> {
    required(value, field)?
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(CatalogError::Validation { field })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ListingDraft {
        ListingDraft {
            title: "  Rotary Tiller ".to_string(),
            category: "tiller".to_string(),
            rate_per_day: "1200".to_string(),
            location_name: "River Farm".to_string(),
            lat: "15.3173".to_string(),
            lon: "75.7139".to_string(),
            image: String::new(),
            owner_name: "Meena".to_string(),
            owner_phone: "+91-90000-44444".to_string(),
            description: " Seven blade tiller ".to_string(),
        }
    }

    #[test]
    fn test_valid_draft_is_trimmed_and_defaulted() {
        let listing = draft().into_listing("42".to_string()).unwrap();
        assert_eq!(listing.title, "Rotary Tiller");
        assert_eq!(listing.category, Category::Tiller);
        assert_eq!(listing.rate_per_day, 1200.0);
        assert_eq!(listing.image, DEFAULT_IMAGE);
        assert_eq!(listing.description, "Seven blade tiller");
        assert_eq!(listing.position(), Some(Position::new(15.3173, 75.7139)));
    }

    #[test]
    fn test_fill_coordinates_uses_six_decimals() {
        let mut d = draft();
        d.fill_coordinates(Position::new(12.97159876, -77.5));
        assert_eq!(d.lat, "12.971599");
        assert_eq!(d.lon, "-77.500000");

        let listing = d.into_listing("5".to_string()).unwrap();
        assert_eq!(listing.position(), Some(Position::new(12.971599, -77.5)));
    }

    #[test]
    fn test_unfilled_coordinates_report_lat() {
        let mut d = draft();
        d.lat = String::new();
        d.lon = String::new();
        assert_eq!(
            d.into_listing("1".to_string()),
            Err(CatalogError::Validation { field: "lat" })
        );
    }

    #[test]
    fn test_first_missing_field_is_reported() {
        let mut d = draft();
        d.location_name = "   ".to_string();
        d.owner_phone = String::new();
        assert_eq!(
            d.into_listing("1".to_string()),
            Err(CatalogError::Validation { field: "locationName" })
        );
    }

    #[test]
    fn test_unparseable_numbers_are_rejected() {
        let mut d = draft();
        d.rate_per_day = "cheap".to_string();
        assert_eq!(
            d.into_listing("1".to_string()),
            Err(CatalogError::Validation { field: "ratePerDay" })
        );

        let mut d = draft();
        d.lon = "200".to_string();
        assert_eq!(
            d.into_listing("1".to_string()),
            Err(CatalogError::Validation { field: "lon" })
        );
    }

    #[test]
    fn test_negative_rate_is_rejected() {
        let mut d = draft();
        d.rate_per_day = "-5".to_string();
        assert_eq!(
            d.into_listing("1".to_string()),
            Err(CatalogError::Validation { field: "ratePerDay" })
        );
    }
}
