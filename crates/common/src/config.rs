//! Application configuration.

use serde::Deserialize;
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Place-search provider configuration.
    #[serde(default)]
    pub places: PlacesConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Public URL of this instance.
    pub url: String,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Place-search provider configuration.
///
/// Both providers are optional; a missing key disables that provider and
/// the vendor directory falls back to DB-only listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlacesConfig {
    /// Google Places API key.
    #[serde(default)]
    pub google_api_key: Option<String>,
    /// Naver local-search client id.
    #[serde(default)]
    pub naver_client_id: Option<String>,
    /// Naver local-search client secret.
    #[serde(default)]
    pub naver_client_secret: Option<String>,
    /// Outbound request timeout in seconds.
    #[serde(default = "default_places_timeout")]
    pub timeout_secs: u64,
    /// How long a (category, region) sync result is considered fresh.
    #[serde(default = "default_sync_ttl_hours")]
    pub sync_ttl_hours: i64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_max_connections() -> u32 {
    100
}

const fn default_min_connections() -> u32 {
    5
}

const fn default_places_timeout() -> u64 {
    5
}

const fn default_sync_ttl_hours() -> i64 {
    24
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `WEDPLAN_ENV`)
    /// 3. Environment variables with `WEDPLAN_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let env = std::env::var("WEDPLAN_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("WEDPLAN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("WEDPLAN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
