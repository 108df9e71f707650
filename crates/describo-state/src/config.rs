//! # Dashboard Configuration
//!
//! Configuration for the dashboard state layer.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     DESCRIBO_API_HOST=api.describo.dev                                 │
//! │     DESCRIBO_LATENCY_SCALE=0                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/describo/dashboard.toml (Linux)                          │
//! │     ~/Library/Application Support/dev.describo.dashboard/... (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:3000/api/v1, 500-1000 ms mock latencies           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [api]
//! protocol = "https"
//! host = "api.describo.dev"
//! version = "v1"
//!
//! [latency]
//! auth_ms = 1000
//! stores_load_ms = 800
//! store_update_ms = 500
//!
//! [storage]
//! path = "/var/lib/describo/session.json"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ConfigError, ConfigResult};
use crate::remote::Endpoint;

// =============================================================================
// API Settings
// =============================================================================

/// Where the remote service lives.
///
/// The base URL is `{protocol}://{host}/api/{version}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_protocol")]
    pub protocol: String,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_version")]
    pub version: String,
}

fn default_protocol() -> String {
    "http".to_string()
}

fn default_host() -> String {
    "localhost:3000".to_string()
}

fn default_version() -> String {
    "v1".to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            protocol: default_protocol(),
            host: default_host(),
            version: default_version(),
        }
    }
}

impl ApiSettings {
    /// Builds the versioned base URL, always ending in `/`.
    pub fn base_url(&self) -> ConfigResult<Url> {
        let raw = format!(
            "{}://{}/api/{}/",
            self.protocol.trim(),
            self.host.trim().trim_end_matches('/'),
            self.version.trim().trim_matches('/')
        );
        Ok(Url::parse(&raw)?)
    }

    /// Full URL of an endpoint, with `{id}` substituted when given.
    pub fn endpoint_url(&self, endpoint: Endpoint, id: Option<i64>) -> ConfigResult<Url> {
        let path = endpoint.path_for(id);
        Ok(self.base_url()?.join(path.trim_start_matches('/'))?)
    }
}

// =============================================================================
// Latency Settings
// =============================================================================

/// Artificial response delays of the mock remote boundary (milliseconds).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencySettings {
    /// Login, register, password reset and token validation.
    #[serde(default = "default_auth_ms")]
    pub auth_ms: u64,

    #[serde(default = "default_products_ms")]
    pub products_ms: u64,

    #[serde(default = "default_stores_load_ms")]
    pub stores_load_ms: u64,

    /// Settings and integration updates.
    #[serde(default = "default_store_update_ms")]
    pub store_update_ms: u64,

    #[serde(default = "default_store_create_ms")]
    pub store_create_ms: u64,

    #[serde(default = "default_store_delete_ms")]
    pub store_delete_ms: u64,
}

fn default_auth_ms() -> u64 {
    1000
}
fn default_products_ms() -> u64 {
    1000
}
fn default_stores_load_ms() -> u64 {
    800
}
fn default_store_update_ms() -> u64 {
    500
}
fn default_store_create_ms() -> u64 {
    800
}
fn default_store_delete_ms() -> u64 {
    500
}

impl Default for LatencySettings {
    fn default() -> Self {
        LatencySettings {
            auth_ms: default_auth_ms(),
            products_ms: default_products_ms(),
            stores_load_ms: default_stores_load_ms(),
            store_update_ms: default_store_update_ms(),
            store_create_ms: default_store_create_ms(),
            store_delete_ms: default_store_delete_ms(),
        }
    }
}

impl LatencySettings {
    /// Every delay set to zero.
    pub fn instant() -> Self {
        LatencySettings {
            auth_ms: 0,
            products_ms: 0,
            stores_load_ms: 0,
            store_update_ms: 0,
            store_create_ms: 0,
            store_delete_ms: 0,
        }
    }

    /// Multiplies every delay by `factor` (negative factors count as zero).
    pub fn scaled(&self, factor: f64) -> Self {
        let factor = factor.max(0.0);
        let scale = |ms: u64| (ms as f64 * factor).round() as u64;
        LatencySettings {
            auth_ms: scale(self.auth_ms),
            products_ms: scale(self.products_ms),
            stores_load_ms: scale(self.stores_load_ms),
            store_update_ms: scale(self.store_update_ms),
            store_create_ms: scale(self.store_create_ms),
            store_delete_ms: scale(self.store_delete_ms),
        }
    }

    /// Delay applied to a given endpoint.
    pub fn for_endpoint(&self, endpoint: Endpoint) -> Duration {
        let ms = match endpoint {
            Endpoint::Login
            | Endpoint::Register
            | Endpoint::ResetPassword
            | Endpoint::ValidateToken => self.auth_ms,
            Endpoint::ListProducts | Endpoint::ProductById => self.products_ms,
            Endpoint::ListStores => self.stores_load_ms,
            Endpoint::SaveStoreSettings | Endpoint::SaveStoreIntegration => self.store_update_ms,
            Endpoint::CreateStore => self.store_create_ms,
            Endpoint::DeleteStore => self.store_delete_ms,
        };
        Duration::from_millis(ms)
    }
}

// =============================================================================
// Storage Settings
// =============================================================================

/// Where the persisted session lives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Explicit file path. When absent the platform data directory is used.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

// =============================================================================
// Main Dashboard Configuration
// =============================================================================

/// Complete dashboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub latency: LatencySettings,

    #[serde(default)]
    pub storage: StorageSettings,
}

fn write_config_file(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)
}

impl DashboardConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (dashboard.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading dashboard config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load dashboard config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ConfigError::SaveFailed("No config path available".into()))?;

        let contents = toml::to_string_pretty(self)?;
        write_config_file(&path, &contents)
            .map_err(|e| ConfigError::SaveFailed(format!("{}: {e}", path.display())))?;

        info!(?path, "Dashboard config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if !matches!(self.api.protocol.as_str(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "api.protocol must be http or https, got: {}",
                self.api.protocol
            )));
        }

        if self.api.host.trim().is_empty() {
            return Err(ConfigError::Invalid("api.host must not be empty".into()));
        }

        if self.api.version.trim().is_empty() {
            return Err(ConfigError::Invalid("api.version must not be empty".into()));
        }

        self.api.base_url()?;
        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(protocol) = std::env::var("DESCRIBO_API_PROTOCOL") {
            self.api.protocol = protocol.to_lowercase();
        }

        if let Ok(host) = std::env::var("DESCRIBO_API_HOST") {
            debug!(host = %host, "Overriding API host from environment");
            self.api.host = host;
        }

        if let Ok(version) = std::env::var("DESCRIBO_API_VERSION") {
            self.api.version = version;
        }

        if let Ok(path) = std::env::var("DESCRIBO_STORAGE_PATH") {
            self.storage.path = Some(PathBuf::from(path));
        }

        if let Ok(scale) = std::env::var("DESCRIBO_LATENCY_SCALE") {
            match scale.parse::<f64>() {
                Ok(factor) => {
                    debug!(factor, "Scaling mock latency from environment");
                    self.latency = self.latency.scaled(factor);
                }
                Err(_) => warn!(scale = %scale, "Ignoring non-numeric DESCRIBO_LATENCY_SCALE"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "describo", "dashboard")
            .map(|dirs| dirs.config_dir().join("dashboard.toml"))
    }

    /// Resolves the session storage file path.
    ///
    /// Falls back to `session.json` in the platform data directory.
    pub fn storage_path(&self) -> Option<PathBuf> {
        self.storage.path.clone().or_else(|| {
            directories::ProjectDirs::from("dev", "describo", "dashboard")
                .map(|dirs| dirs.data_dir().join("session.json"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.latency.auth_ms, 1000);
        assert_eq!(config.latency.store_update_ms, 500);
        assert_eq!(
            config.api.base_url().unwrap().as_str(),
            "http://localhost:3000/api/v1/"
        );
    }

    #[test]
    fn test_endpoint_url() {
        let api = ApiSettings {
            protocol: "https".into(),
            host: "api.describo.dev/".into(),
            version: "/v2/".into(),
        };
        assert_eq!(
            api.endpoint_url(Endpoint::Login, None).unwrap().as_str(),
            "https://api.describo.dev/api/v2/auth/login"
        );
        assert_eq!(
            api.endpoint_url(Endpoint::ProductById, Some(7)).unwrap().as_str(),
            "https://api.describo.dev/api/v2/products/7"
        );
    }

    #[test]
    fn test_config_validation() {
        let mut config = DashboardConfig::default();
        config.api.protocol = "ftp".into();
        assert!(config.validate().is_err());

        config.api.protocol = "https".into();
        config.api.host = " ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_latency_scaling() {
        let latency = LatencySettings::default().scaled(0.5);
        assert_eq!(latency.auth_ms, 500);
        assert_eq!(latency.stores_load_ms, 400);

        let latency = LatencySettings::default().scaled(-1.0);
        assert_eq!(latency, LatencySettings::instant());
    }

    #[test]
    fn test_latency_per_endpoint() {
        let latency = LatencySettings::default();
        assert_eq!(latency.for_endpoint(Endpoint::ValidateToken), Duration::from_millis(1000));
        assert_eq!(latency.for_endpoint(Endpoint::ListStores), Duration::from_millis(800));
        assert_eq!(latency.for_endpoint(Endpoint::DeleteStore), Duration::from_millis(500));
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
            [api]
            host = "api.describo.dev"

            [latency]
            auth_ms = 10
        "#;
        let config: DashboardConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.protocol, "http");
        assert_eq!(config.api.host, "api.describo.dev");
        assert_eq!(config.latency.auth_ms, 10);
        assert_eq!(config.latency.products_ms, 1000);

        let rendered = toml::to_string_pretty(&config).unwrap();
        assert!(rendered.contains("[api]"));
        assert!(rendered.contains("[latency]"));
    }

    #[test]
    fn test_load_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.toml");
        std::fs::write(&path, "[api]\nversion = \"v3\"\n").unwrap();

        let config = DashboardConfig::load(Some(path)).unwrap();
        assert_eq!(config.api.version, "v3");
    }

    #[test]
    fn test_save_creates_parent_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("dashboard.toml");
        let mut config = DashboardConfig::default();
        config.api.host = "api.describo.dev".to_string();

        config.save(Some(path.clone())).unwrap();

        let loaded = DashboardConfig::load(Some(path)).unwrap();
        assert_eq!(loaded.api.host, "api.describo.dev");
    }

    #[test]
    fn test_save_failure_is_reported_as_save_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = DashboardConfig::default()
            .save(Some(blocker.join("dashboard.toml")))
            .unwrap_err();

        assert!(matches!(err, ConfigError::SaveFailed(_)));
    }
}
