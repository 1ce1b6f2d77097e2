use std::env;

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "http://192.168.0.45:4000";
pub const DEFAULT_DB_URL: &str = "sqlite://hoctap.sqlite3";

/// Where the backend lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: Url,
}

impl ApiConfig {
    /// Parse and validate a base URL such as `http://host:4000`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` unless the URL is absolute http(s).
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidBaseUrl(base_url.to_owned());
        let url = Url::parse(base_url.trim()).map_err(|_| invalid())?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(invalid());
        }
        Ok(Self { base_url: url })
    }

    /// Read `HOCTAP_API_BASE_URL`, falling back to the default host.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` if the variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var("HOCTAP_API_BASE_URL") {
            Ok(value) if !value.trim().is_empty() => Self::new(&value),
            _ => Self::new(DEFAULT_API_BASE_URL),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL; each segment is percent-encoded.
    ///
    /// An empty final segment yields a trailing slash.
    #[must_use]
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// Behaviour of the catalog when live data is missing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Resolve subjects from the bundled catalog when no id is available.
    pub static_fallback: bool,
    /// Serve every catalog request from the bundled catalog.
    pub offline: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            static_fallback: true,
            offline: false,
        }
    }
}

impl CatalogConfig {
    /// Read `HOCTAP_STATIC_FALLBACK` and `HOCTAP_OFFLINE`.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            static_fallback: env_flag("HOCTAP_STATIC_FALLBACK").unwrap_or(defaults.static_fallback),
            offline: env_flag("HOCTAP_OFFLINE").unwrap_or(defaults.offline),
        }
    }
}

fn env_flag(name: &str) -> Option<bool> {
    env::var(name).ok().and_then(|value| parse_flag(&value))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Everything the composition root needs to build `AppServices`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db_url: String,
    pub api: ApiConfig,
    pub catalog: CatalogConfig,
}

impl AppConfig {
    /// Read the whole configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the API base URL is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let db_url = env::var("HOCTAP_DB_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DB_URL.into());
        Ok(Self {
            db_url,
            api: ApiConfig::from_env()?,
            catalog: CatalogConfig::from_env(),
        })
    }
}
