use crate::models::{Category, Listing};

/// Listings shown when the store is empty
pub fn seed_listings() -> Vec<Listing> {
    vec![
        Listing {
            id: "1".to_string(),
            title: "Mahindra 575 Tractor".to_string(),
            category: Category::Tractor,
            rate_per_day: 3500.0,
            location_name: "Near Village Market".to_string(),
            lat: Some(12.9716),
            lon: Some(77.5946),
            image: "https://images.unsplash.com/photo-1609257349454-8d0e90a962f8?auto=format&fit=crop&w=1200&q=60".to_string(),
            owner_name: "Ravi".to_string(),
            owner_phone: "+91-90000-11111".to_string(),
            description: "Well-maintained tractor, ideal for ploughing and transport.".to_string(),
        },
        Listing {
            id: "2".to_string(),
            title: "John Deere Harvester".to_string(),
            category: Category::Harvester,
            rate_per_day: 9000.0,
            location_name: "Kallur Farm Gate".to_string(),
            lat: Some(16.5062),
            lon: Some(80.6480),
            image: "https://images.unsplash.com/photo-1590086782792-42dd2350140b?auto=format&fit=crop&w=1200&q=60".to_string(),
            owner_name: "Sita".to_string(),
            owner_phone: "+91-90000-22222".to_string(),
            description: "High-capacity combine harvester. Operator available on request.".to_string(),
        },
        Listing {
            id: "3".to_string(),
            title: "Twin Axle Trailer".to_string(),
            category: Category::Trailer,
            rate_per_day: 1800.0,
            location_name: "Canal Road Yard".to_string(),
            lat: Some(19.0760),
            lon: Some(72.8777),
            image: "https://images.unsplash.com/photo-1516116216624-53e697fedbea?auto=format&fit=crop&w=1200&q=60".to_string(),
            owner_name: "Rahul".to_string(),
            owner_phone: "+91-90000-33333".to_string(),
            description: "Sturdy trailer for crop transport, 3-ton capacity.".to_string(),
        },
    ]
}
