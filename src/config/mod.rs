//! TOML configuration: endpoint, listing behaviour and paginator overrides.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{ApiConfig, Config, ListingSettings};
