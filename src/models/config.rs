//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Browser origins allowed to call the API.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    #[serde(default = "max_page_size")]
    pub max_page_size: usize,
}

const fn default_page_size() -> usize {
    10
}

const fn max_page_size() -> usize {
    100
}
