use serde::{Deserialize, Serialize};

use crate::listing::FilterSet;
use crate::pagination::PaginationOverrides;

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub listing: ListingSettings,
    /// Paginator overrides, merged over the built-in defaults.
    #[serde(default)]
    pub pagination: PaginationOverrides,
}

/// Listing endpoint used by the HTTP fetch adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Collection URL; filters are sent as query parameters.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Total request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Behaviour of the interactive listing view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingSettings {
    /// Quiet period after the last filter edit before a fetch (default: 1000).
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Filters the listing starts with.
    #[serde(default)]
    pub initial_filters: FilterSet,
}

fn default_base_url() -> String {
    "https://localhost:7001/api/pokemons".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_debounce_ms() -> u64 {
    1000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            initial_filters: FilterSet::new(),
        }
    }
}
