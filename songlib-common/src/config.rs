//! Service configuration loading
//!
//! Each setting is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// Default HTTP bind address
pub const DEFAULT_SERVICE_ADDRESS: &str = "127.0.0.1:8080";
/// Default database (file next to the working directory, created on demand)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://songlib.db?mode=rwc";
/// Default base URL of the song info lookup service
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8081";
/// Default timeout for one lookup request
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 5;

/// Environment variable names
pub const ENV_SERVICE_ADDRESS: &str = "SERVICE_ADDRESS";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_API_BASE_URL: &str = "API_BASE_URL";
pub const ENV_LOOKUP_TIMEOUT_SECS: &str = "LOOKUP_TIMEOUT_SECS";
/// Path of the TOML config file when not given on the command line
pub const ENV_CONFIG_PATH: &str = "SONGLIB_CONFIG";

/// Optional settings from one configuration source
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigOverrides {
    pub service_address: Option<String>,
    pub database_url: Option<String>,
    pub api_base_url: Option<String>,
    pub lookup_timeout_secs: Option<u64>,
}

impl ConfigOverrides {
    /// Read overrides from environment variables
    ///
    /// Empty variables are treated as unset. A non-numeric
    /// `LOOKUP_TIMEOUT_SECS` is a configuration error.
    pub fn from_env() -> Result<Self> {
        let lookup_timeout_secs = match env_var(ENV_LOOKUP_TIMEOUT_SECS) {
            Some(raw) => Some(raw.parse::<u64>().map_err(|_| {
                Error::Config(format!(
                    "{} must be a whole number of seconds, got {:?}",
                    ENV_LOOKUP_TIMEOUT_SECS, raw
                ))
            })?),
            None => None,
        };

        Ok(Self {
            service_address: env_var(ENV_SERVICE_ADDRESS),
            database_url: env_var(ENV_DATABASE_URL),
            api_base_url: env_var(ENV_API_BASE_URL),
            lookup_timeout_secs,
        })
    }

    /// Fill unset fields from a lower-priority source
    fn or(self, lower: &ConfigOverrides) -> Self {
        Self {
            service_address: self.service_address.or_else(|| lower.service_address.clone()),
            database_url: self.database_url.or_else(|| lower.database_url.clone()),
            api_base_url: self.api_base_url.or_else(|| lower.api_base_url.clone()),
            lookup_timeout_secs: self.lookup_timeout_secs.or(lower.lookup_timeout_secs),
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Contents of the TOML config file
///
/// ```toml
/// service_address = "0.0.0.0:8080"
/// database_url = "sqlite:///var/lib/songlib/songs.db?mode=rwc"
/// api_base_url = "http://lookup.internal:9000"
/// lookup_timeout_secs = 3
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TomlConfig {
    #[serde(flatten)]
    pub settings: ConfigOverrides,
}

impl TomlConfig {
    /// Load and parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;

        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Load a config file if one is configured and present
    ///
    /// The path comes from `cli_path`, then `SONGLIB_CONFIG`. A configured
    /// file that does not exist only logs a warning; a file that exists but
    /// cannot be read or parsed is an error.
    pub fn load_optional(cli_path: Option<&Path>) -> Result<Self> {
        let path = match cli_path
            .map(Path::to_path_buf)
            .or_else(|| env_var(ENV_CONFIG_PATH).map(PathBuf::from))
        {
            Some(path) => path,
            None => return Ok(Self::default()),
        };

        if !path.exists() {
            warn!("Config file not found: {} (using defaults)", path.display());
            return Ok(Self::default());
        }

        Self::load(&path)
    }
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// HTTP bind address, `host:port`
    pub service_address: String,
    /// sqlx SQLite connection URL
    pub database_url: String,
    /// Base URL of the song info lookup service
    pub api_base_url: String,
    /// Timeout for one lookup request
    pub lookup_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_address: DEFAULT_SERVICE_ADDRESS.to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            lookup_timeout: Duration::from_secs(DEFAULT_LOOKUP_TIMEOUT_SECS),
        }
    }
}

impl ServiceConfig {
    /// Merge command-line, environment and file settings over the defaults
    pub fn resolve(cli: ConfigOverrides, env: &ConfigOverrides, file: &TomlConfig) -> Result<Self> {
        let merged = cli.or(env).or(&file.settings);
        let defaults = Self::default();

        let lookup_timeout = match merged.lookup_timeout_secs {
            Some(0) => {
                return Err(Error::Config("lookup timeout must be at least 1 second".to_string()))
            }
            Some(secs) => Duration::from_secs(secs),
            None => defaults.lookup_timeout,
        };

        let api_base_url = merged
            .api_base_url
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);
        if api_base_url.is_empty() {
            return Err(Error::Config("api_base_url must not be empty".to_string()));
        }

        Ok(Self {
            service_address: merged.service_address.unwrap_or(defaults.service_address),
            database_url: merged.database_url.unwrap_or(defaults.database_url),
            api_base_url,
            lookup_timeout,
        })
    }
}
