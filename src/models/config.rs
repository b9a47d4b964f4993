//! Configuration model loaded from external sources.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::domain::types::{DEFAULT_PER_PAGE, PerPage};

/// Environment variable prefix, e.g. `APP_API_BASE_URL`.
pub const ENV_PREFIX: &str = "APP";

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

fn default_request_timeout_secs() -> u64 {
    30
}

#[derive(Clone, Debug, Deserialize)]
/// Settings of the customer panel client.
pub struct ClientConfig {
    /// API root, e.g. `http://127.0.0.1:8000/api`.
    pub api_base_url: String,
    #[serde(default = "default_per_page")]
    pub default_per_page: u32,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    /// Reads `path` (YAML, optional) and then `APP_*` environment overrides.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }

    /// Configured page size, or the default one when it is not selectable.
    pub fn per_page(&self) -> PerPage {
        PerPage::new(self.default_per_page).unwrap_or_else(|err| {
            log::warn!("Ignoring configured page size: {err}");
            PerPage::default()
        })
    }
}
