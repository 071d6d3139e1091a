use crate::error::CatalogError;
use crate::models::Position;
use crate::providers::traits::PositionProvider;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Public endpoint answering with the caller's approximate coordinates
pub const DEFAULT_GEOIP_ENDPOINT: &str = "http://ip-api.com/json";

/// Position known up front, e.g. typed on the command line
pub struct FixedPosition {
    position: Position,
}

impl FixedPosition {
    pub fn new(position: Position) -> Self {
        Self { position }
    }
}

#[async_trait]
impl PositionProvider for FixedPosition {
    async fn current_position(&self) -> Result<Position, CatalogError> {
        if self.position.is_valid() {
            Ok(self.position)
        } else {
            Err(CatalogError::PositionUnavailable(format!(
                "coordinates out of range: {}, {}",
                self.position.lat, self.position.lon
            )))
        }
    }

    fn provider_name(&self) -> &'static str {
        "fixed"
    }
}

/// Approximate position from an IP geolocation service
pub struct IpGeolocator {
    client: Client,
    endpoint: String,
}

impl IpGeolocator {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("agrirent/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

/// Pull coordinates out of a geolocation response body
fn position_from_json(body: &Value) -> Option<Position> {
    let field = |short: &str, long: &str| {
        body.get(short)
            .or_else(|| body.get(long))
            .and_then(Value::as_f64)
    };
    let position = Position::new(field("lat", "latitude")?, field("lon", "longitude")?);
    position.is_valid().then_some(position)
}

#[async_trait]
impl PositionProvider for IpGeolocator {
    async fn current_position(&self) -> Result<Position, CatalogError> {
        debug!("Fetching position from {}", self.endpoint);

        let unavailable = |e: reqwest::Error| CatalogError::PositionUnavailable(e.to_string());
        let response = self.client.get(&self.endpoint).send().await.map_err(unavailable)?;
        if !response.status().is_success() {
            return Err(CatalogError::PositionUnavailable(format!(
                "geolocation service returned {}",
                response.status()
            )));
        }
        let body: Value = response.json().await.map_err(unavailable)?;

        position_from_json(&body).ok_or_else(|| {
            CatalogError::PositionUnavailable("no coordinates in geolocation response".to_string())
        })
    }

    fn provider_name(&self) -> &'static str {
        "ip-geolocation"
    }
}

/// Whether the renter's position was asked for, and how that went
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ObserverState {
    #[default]
    NotRequested,
    Located(Position),
    Unavailable(String),
}

impl ObserverState {
    /// Observer for distance ranking; failures behave like no observer
    pub fn observer(&self) -> Option<Position> {
        match self {
            ObserverState::Located(position) => Some(*position),
            _ => None,
        }
    }
}

/// Ask the provider for the current position
pub async fn locate(provider: &dyn PositionProvider) -> ObserverState {
    match provider.current_position().await {
        Ok(position) => {
            info!(
                "📍 Located via {} at {:.4}, {:.4}",
                provider.provider_name(),
                position.lat,
                position.lon
            );
            ObserverState::Located(position)
        }
        Err(e) => {
            warn!("Unable to fetch location via {}: {}", provider.provider_name(), e);
            ObserverState::Unavailable(e.to_string())
        }
    }
}
