use crate::models::Position;
use crate::providers::json_file::DEFAULT_STORE_FILE;
use crate::providers::position::DEFAULT_GEOIP_ENDPOINT;
use crate::query::{SortMode, UnlocatedPolicy, DEFAULT_RADIUS_KM};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file looked up when none is given
pub const DEFAULT_CONFIG_FILE: &str = "agrirent.toml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub location: LocationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_FILE)
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_radius_km")]
    pub radius_km: f64,
    #[serde(default)]
    pub sort_by: SortMode,
    #[serde(default)]
    pub unlocated: UnlocatedPolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            radius_km: default_radius_km(),
            sort_by: SortMode::default(),
            unlocated: UnlocatedPolicy::default(),
        }
    }
}

fn default_radius_km() -> f64 {
    DEFAULT_RADIUS_KM
}

/// Where the renter's position comes from
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LocationSource {
    #[default]
    None,
    Fixed,
    Ip,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LocationConfig {
    #[serde(default)]
    pub provider: LocationSource,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            provider: LocationSource::None,
            lat: None,
            lon: None,
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LocationConfig {
    /// Configured fixed coordinates, if both are set
    pub fn fixed_position(&self) -> Option<Position> {
        Some(Position::new(self.lat?, self.lon?))
    }
}

fn default_endpoint() -> String {
    DEFAULT_GEOIP_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Read the config file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(self.search.radius_km.is_finite() && self.search.radius_km > 0.0) {
            bail!("search.radius_km must be a positive number");
        }
        if self.location.provider == LocationSource::Fixed {
            match self.location.fixed_position() {
                Some(p) if p.is_valid() => {}
                Some(_) => bail!("location.lat/lon are out of range"),
                None => bail!("location.provider = \"fixed\" needs location.lat and location.lon"),
            }
        }
        Ok(())
    }
}
