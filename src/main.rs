use agri_rent::booking::parse_date;
use agri_rent::config::{Config, LocationSource, DEFAULT_CONFIG_FILE};
use agri_rent::models::{Category, ListingDraft, Position};
use agri_rent::providers::{
    locate, FixedPosition, IpGeolocator, JsonFileRepository, ObserverState, PositionProvider,
};
use agri_rent::query::{FilterSpec, SortMode};
use agri_rent::Catalog;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "agrirent", about = "Rent farm equipment from owners nearby")]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Listing store, overrides storage.path
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search and rank listings
    Browse {
        /// Text matched against title and description
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long)]
        category: Option<Category>,
        #[arg(long)]
        min_rate: Option<f64>,
        #[arg(long)]
        max_rate: Option<f64>,
        /// Radius in km around your position
        #[arg(long)]
        radius: Option<f64>,
        /// distance | price | newest
        #[arg(long)]
        sort: Option<SortMode>,
        /// Look up your position with the configured provider
        #[arg(long)]
        near_me: bool,
        /// Your latitude, used with --lon instead of the provider
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
    },
    /// Publish a listing as an owner
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "Tractor")]
        category: String,
        #[arg(long)]
        rate: String,
        #[arg(long)]
        location_name: String,
        #[arg(long, allow_negative_numbers = true, conflicts_with = "here")]
        lat: Option<String>,
        #[arg(long, allow_negative_numbers = true, conflicts_with = "here")]
        lon: Option<String>,
        /// Use your current position for the listing's coordinates
        #[arg(long)]
        here: bool,
        #[arg(long, default_value = "")]
        image: String,
        #[arg(long)]
        owner_name: String,
        #[arg(long)]
        owner_phone: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Price a booking, dates as YYYY-MM-DD
    Book {
        id: String,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
    /// List the equipment categories
    Categories,
}

fn position_provider(config: &Config) -> Result<Option<Box<dyn PositionProvider>>> {
    let location = &config.location;
    Ok(match location.provider {
        LocationSource::None => None,
        LocationSource::Fixed => location
            .fixed_position()
            .map(|p| Box::new(FixedPosition::new(p)) as Box<dyn PositionProvider>),
        LocationSource::Ip => {
            let geolocator = IpGeolocator::new(
                location.endpoint.clone(),
                Duration::from_secs(location.timeout_secs),
            )?;
            Some(Box::new(geolocator) as Box<dyn PositionProvider>)
        }
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    let store = cli.store.clone().unwrap_or_else(|| config.storage.path.clone());
    let catalog = Catalog::new(Arc::new(JsonFileRepository::new(&store)));

    match cli.command {
        Command::Browse {
            query,
            category,
            min_rate,
            max_rate,
            radius,
            sort,
            near_me,
            lat,
            lon,
        } => {
            let observer_state = match (lat, lon) {
                (Some(lat), Some(lon)) => locate(&FixedPosition::new(Position::new(lat, lon))).await,
                _ if near_me => match position_provider(&config)? {
                    Some(provider) => locate(provider.as_ref()).await,
                    None => ObserverState::Unavailable(
                        "no location provider configured".to_string(),
                    ),
                },
                _ => ObserverState::NotRequested,
            };
            if let ObserverState::Unavailable(reason) = &observer_state {
                println!("Unable to fetch your location ({reason}); showing all distances as unknown.");
            }

            let spec = FilterSpec {
                query,
                category,
                min_rate,
                max_rate,
                max_km: Some(radius.unwrap_or(config.search.radius_km)),
                sort_by: sort.unwrap_or(config.search.sort_by),
                observer: observer_state.observer(),
                unlocated: config.search.unlocated,
            };

            let results = catalog.browse(&spec).await?;
            info!("Found {} listings", results.len());

            if results.is_empty() {
                println!("No equipment matches your filters.");
            }
            for (i, item) in results.iter().enumerate() {
                let l = &item.listing;
                println!("{}. {} [{}] (₹{}/day)", i + 1, l.title, l.category, l.rate_per_day);
                match item.distance_km {
                    Some(d) => println!("   {} · {:.1} km away", l.location_name, d),
                    None => println!("   {}", l.location_name),
                }
                if !l.description.is_empty() {
                    println!("   {}", l.description);
                }
                println!("   Owner: {} · {}", l.owner_name, l.owner_phone);
                println!("   ID: {}", l.id);
                println!();
            }
        }
        Command::Add {
            title,
            category,
            rate,
            location_name,
            lat,
            lon,
            here,
            image,
            owner_name,
            owner_phone,
            description,
        } => {
            let mut draft = ListingDraft {
                title,
                category,
                rate_per_day: rate,
                location_name,
                lat: lat.unwrap_or_default(),
                lon: lon.unwrap_or_default(),
                image,
                owner_name,
                owner_phone,
                description,
            };
            if here {
                let state = match position_provider(&config)? {
                    Some(provider) => locate(provider.as_ref()).await,
                    None => ObserverState::Unavailable("no location provider configured".to_string()),
                };
                match state.observer() {
                    Some(position) => draft.fill_coordinates(position),
                    None => println!("Unable to fetch your location."),
                }
            }
            let listing = catalog.add_listing(draft).await?;
            println!("Listed {} with id {}", listing.title, listing.id);
        }
        Command::Book { id, from, to } => {
            let summary = catalog.book(&id, parse_date(&from)?, parse_date(&to)?).await?;
            println!("Booking placed!\n");
            println!("{summary}");
        }
        Command::Categories => {
            for category in Category::ALL {
                println!("{category}");
            }
        }
    }

    Ok(())
}
