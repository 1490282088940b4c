use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::services::providers::tmdb::GatewaySettings;
use crate::services::RecommendationSettings;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Base URL prepended to TMDB poster paths
    #[serde(default = "default_tmdb_image_url")]
    pub tmdb_image_url: String,

    /// Poster shown for the selected movie when TMDB has none
    #[serde(default = "default_placeholder_poster_url")]
    pub placeholder_poster_url: String,

    /// Directory holding movies.json and the three similarity matrices
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Attempts per metadata lookup before giving up
    #[serde(default = "default_gateway_max_attempts")]
    pub gateway_max_attempts: u32,

    /// Per-request timeout for metadata lookups
    #[serde(default = "default_gateway_timeout_secs")]
    pub gateway_timeout_secs: u64,

    /// Initial retry delay, doubled after each failed attempt
    #[serde(default = "default_gateway_backoff_ms")]
    pub gateway_backoff_ms: u64,

    /// Neighbors requested per axis
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: usize,

    /// Size of the primary row and of each overflow group
    #[serde(default = "default_primary_size")]
    pub primary_size: usize,

    /// Maximum number of movies shown across all overflow groups
    #[serde(default = "default_overflow_cap")]
    pub overflow_cap: usize,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_placeholder_poster_url() -> String {
    "https://via.placeholder.com/500x750?text=No+Poster+Available".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_gateway_max_attempts() -> u32 {
    15
}

fn default_gateway_timeout_secs() -> u64 {
    5
}

fn default_gateway_backoff_ms() -> u64 {
    250
}

fn default_recommendation_limit() -> usize {
    24
}

fn default_primary_size() -> usize {
    5
}

fn default_overflow_cap() -> usize {
    12
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings that would make recommendations or lookups meaningless
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.gateway_max_attempts == 0 {
            anyhow::bail!("GATEWAY_MAX_ATTEMPTS must be at least 1");
        }
        if self.primary_size == 0 {
            anyhow::bail!("PRIMARY_SIZE must be at least 1");
        }
        if self.recommendation_limit == 0 {
            anyhow::bail!("RECOMMENDATION_LIMIT must be at least 1");
        }
        Ok(())
    }

    pub fn gateway_settings(&self) -> GatewaySettings {
        GatewaySettings {
            api_key: self.tmdb_api_key.clone(),
            api_url: self.tmdb_api_url.trim_end_matches('/').to_string(),
            image_url: self.tmdb_image_url.trim_end_matches('/').to_string(),
            max_attempts: self.gateway_max_attempts,
            timeout: Duration::from_secs(self.gateway_timeout_secs),
            backoff: Duration::from_millis(self.gateway_backoff_ms),
        }
    }

    pub fn recommendation_settings(&self) -> RecommendationSettings {
        RecommendationSettings {
            limit: self.recommendation_limit,
            primary_size: self.primary_size,
            overflow_cap: self.overflow_cap,
            placeholder_poster_url: self.placeholder_poster_url.clone(),
        }
    }
}
