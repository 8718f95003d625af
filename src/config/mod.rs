//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/career-geo/config.toml

pub mod defaults;

use crate::constants::api::{MAPBOX_BASE_URL, TOKEN_ENV_VAR};
use crate::error::{Error, Result};
use crate::geo::mapbox::{MapboxClient, MapboxSettings};
use crate::geo::Geocoder;
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Mapping service connection
    #[serde(default)]
    pub mapbox: MapboxConfig,

    /// Default values for queries
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Mapping service connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapboxConfig {
    /// Access token; the CAREER_GEO_MAPBOX_TOKEN environment variable wins when set
    #[serde(default)]
    pub access_token: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Country bias for forward geocoding; empty disables it
    #[serde(default = "default_country")]
    pub country: String,

    /// Per-call timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Default values for queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Search radius in meters
    #[serde(default = "default_radius")]
    pub radius: f64,

    /// Maximum number of results
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Travel mode
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Output format
    #[serde(default = "default_format")]
    pub format: String,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions for serde
fn default_base_url() -> String {
    MAPBOX_BASE_URL.to_string()
}
fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_radius() -> f64 {
    DEFAULT_RADIUS
}
fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}
fn default_mode() -> String {
    DEFAULT_MODE.to_string()
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for MapboxConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            base_url: default_base_url(),
            country: default_country(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            max_results: default_max_results(),
            mode: default_mode(),
            format: default_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific path, creating it if missing
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["mapbox", "access_token"] => Some(self.mapbox.access_token.clone()),
            ["mapbox", "base_url"] => Some(self.mapbox.base_url.clone()),
            ["mapbox", "country"] => Some(self.mapbox.country.clone()),
            ["mapbox", "timeout_secs"] => Some(self.mapbox.timeout_secs.to_string()),

            ["defaults", "radius"] => Some(self.defaults.radius.to_string()),
            ["defaults", "max_results"] => Some(self.defaults.max_results.to_string()),
            ["defaults", "mode"] => Some(self.defaults.mode.clone()),
            ["defaults", "format"] => Some(self.defaults.format.clone()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["mapbox", "access_token"] => {
                self.mapbox.access_token = value.to_string();
            }
            ["mapbox", "base_url"] => {
                self.mapbox.base_url = value.to_string();
            }
            ["mapbox", "country"] => {
                self.mapbox.country = value.to_lowercase();
            }
            ["mapbox", "timeout_secs"] => {
                let secs: u64 = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid timeout value: {}", value))
                })?;
                if secs == 0 {
                    return Err(Error::Config("Timeout must be at least 1 second".to_string()));
                }
                self.mapbox.timeout_secs = secs;
            }

            ["defaults", "radius"] => {
                self.defaults.radius = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid radius value: {}", value))
                })?;
            }
            ["defaults", "max_results"] => {
                self.defaults.max_results = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid max_results value: {}", value))
                })?;
            }
            ["defaults", "mode"] => {
                let mode: crate::coord::TravelMode = value.parse().map_err(Error::Config)?;
                self.defaults.mode = mode.to_string();
            }
            ["defaults", "format"] => {
                if crate::format::get_formatter(value).is_none() {
                    return Err(Error::Config(format!("Unknown format: {}", value)));
                }
                self.defaults.format = value.to_lowercase();
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid port value: {}", value))
                })?;
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "mapbox.access_token",
            "mapbox.base_url",
            "mapbox.country",
            "mapbox.timeout_secs",
            "defaults.radius",
            "defaults.max_results",
            "defaults.mode",
            "defaults.format",
            "server.host",
            "server.port",
        ]
    }

    /// Effective access token: environment override, then config file
    pub fn mapbox_token(&self) -> String {
        std::env::var(TOKEN_ENV_VAR)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| self.mapbox.access_token.clone())
    }

    /// Settings for constructing a `MapboxClient`
    pub fn mapbox_settings(&self) -> MapboxSettings {
        let country = self.mapbox.country.trim();
        MapboxSettings {
            access_token: self.mapbox_token(),
            base_url: self.mapbox.base_url.clone(),
            country: (!country.is_empty()).then(|| country.to_string()),
        }
    }

    /// Per-call timeout for outbound requests
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.mapbox.timeout_secs.max(1))
    }

    /// Build the geocoder for the configured Mapbox account
    pub fn geocoder(&self) -> Result<Geocoder<MapboxClient>> {
        let client = MapboxClient::new(self.mapbox_settings())?;
        Ok(Geocoder::new(client, self.timeout()))
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.mapbox.base_url, "https://api.mapbox.com");
        assert_eq!(config.mapbox.country, "ae");
        assert_eq!(config.defaults.radius, 15_000.0);
        assert_eq!(config.defaults.max_results, 5);
        assert_eq!(config.server.port, 7979);
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        assert_eq!(config.get("defaults.mode"), Some("driving".to_string()));

        config.set("defaults.mode", "Walk").unwrap();
        assert_eq!(config.get("defaults.mode"), Some("walking".to_string()));

        config.set("defaults.radius", "5000").unwrap();
        assert_eq!(config.get("defaults.radius"), Some("5000".to_string()));
        assert_eq!(config.defaults.radius, 5000.0);

        config.set("mapbox.country", "SA").unwrap();
        assert_eq!(config.mapbox.country, "sa");
    }

    #[test]
    fn test_get_invalid_key() {
        let config = Config::default();
        assert_eq!(config.get("invalid.key"), None);
    }

    #[test]
    fn test_set_invalid() {
        let mut config = Config::default();
        assert!(config.set("invalid.key", "value").is_err());
        assert!(config.set("defaults.radius", "not_a_number").is_err());
        assert!(config.set("defaults.mode", "hovercraft").is_err());
        assert!(config.set("defaults.format", "pdf").is_err());
        assert!(config.set("mapbox.timeout_secs", "0").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.mapbox.access_token = "pk.saved".to_string();
        config.defaults.radius = 5000.0;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.mapbox.access_token, "pk.saved");
        assert_eq!(loaded.defaults.radius, 5000.0);
    }

    #[test]
    fn test_load_creates_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let loaded = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(loaded.server.port, 7979);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[mapbox]\naccess_token = \"pk.x\"\n").unwrap();
        assert_eq!(config.mapbox.access_token, "pk.x");
        assert_eq!(config.mapbox.timeout_secs, 10);
        assert_eq!(config.defaults.format, "text");
    }

    #[test]
    fn test_serialization_format() {
        let toml = toml::to_string_pretty(&Config::default()).unwrap();

        assert!(toml.contains("[mapbox]"));
        assert!(toml.contains("[defaults]"));
        assert!(toml.contains("[server]"));
    }

    #[test]
    fn test_mapbox_settings() {
        let mut config = Config::default();
        config.mapbox.country = "  ".to_string();
        assert!(config.mapbox_settings().country.is_none());

        config.mapbox.country = "ae".to_string();
        assert_eq!(config.mapbox_settings().country.as_deref(), Some("ae"));
    }

    #[test]
    fn test_server_addr() {
        let config = Config::default();
        assert_eq!(config.server_addr(), "127.0.0.1:7979");
    }

    #[test]
    fn test_available_keys() {
        let keys = Config::available_keys();
        assert!(keys.contains(&"mapbox.access_token"));
        assert!(keys.contains(&"server.port"));
        for key in keys {
            assert!(Config::default().get(key).is_some(), "missing getter for {}", key);
        }
    }
}
