//! Great-circle distances between listings and the renter.

use crate::models::{AnnotatedListing, Listing, Position};

/// Mean Earth radius in kilometres
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points, in kilometres
pub fn haversine_km(a: Position, b: Position) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair outside [0, 1] for antipodal points
    let h = h.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Distance from the observer to one listing, if both have usable coordinates
pub fn distance_to(listing: &Listing, observer: Option<Position>) -> Option<f64> {
    let observer = observer.filter(Position::is_valid)?;
    Some(haversine_km(observer, listing.position()?))
}

/// Attach a distance to every listing, relative to the observer
pub fn annotate(listings: &[Listing], observer: Option<Position>) -> Vec<AnnotatedListing> {
    listings
        .iter()
        .map(|listing| AnnotatedListing {
            distance_km: distance_to(listing, observer),
            listing: listing.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::seed::seed_listings;

    const BENGALURU: Position = Position { lat: 12.9716, lon: 77.5946 };
    const VIJAYAWADA: Position = Position { lat: 16.5062, lon: 80.6480 };

    #[test]
    fn test_distance_is_symmetric() {
        let ab = haversine_km(BENGALURU, VIJAYAWADA);
        let ba = haversine_km(VIJAYAWADA, BENGALURU);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        assert_eq!(haversine_km(BENGALURU, BENGALURU), 0.0);
        assert_eq!(haversine_km(VIJAYAWADA, VIJAYAWADA), 0.0);
    }

    #[test]
    fn test_known_distance() {
        // Bengaluru to Vijayawada is roughly 500 km as the crow flies
        let d = haversine_km(BENGALURU, VIJAYAWADA);
        assert!(d > 480.0 && d < 520.0, "got {d}");
    }

    #[test]
    fn test_antipodal_points_are_half_circumference() {
        let d = haversine_km(Position::new(0.0, 0.0), Position::new(0.0, 180.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn test_no_observer_means_no_distance() {
        let annotated = annotate(&seed_listings(), None);
        assert_eq!(annotated.len(), 3);
        assert!(annotated.iter().all(|a| a.distance_km.is_none()));
    }

    #[test]
    fn test_listing_without_coordinates_has_no_distance() {
        let mut listing = seed_listings().remove(0);
        listing.lat = None;
        let annotated = annotate(&[listing.clone()], Some(BENGALURU));
        assert_eq!(annotated[0].distance_km, None);

        listing.lat = Some(123.0);
        let annotated = annotate(&[listing], Some(BENGALURU));
        assert_eq!(annotated[0].distance_km, None);
    }

    #[test]
    fn test_annotate_preserves_order() {
        let listings = seed_listings();
        let annotated = annotate(&listings, Some(BENGALURU));
        let ids: Vec<_> = annotated.iter().map(|a| a.listing.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert!(annotated[0].distance_km.unwrap() < 1e-9);
    }
}
