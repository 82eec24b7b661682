//! Configuration system for stockroom.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{StockError, StockResult};

/// Service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StockroomConfig {
    /// Path to the SQLite database holding products and history.
    pub db_path: PathBuf,
    /// Host the HTTP server binds to.
    pub host: String,
    /// Port the HTTP server binds to.
    pub port: u16,
}

impl Default for StockroomConfig {
    fn default() -> Self {
        let data_dir = dirs::home_dir()
            .map(|h| h.join(".stockroom"))
            .unwrap_or_else(|| PathBuf::from(".stockroom"));

        Self {
            db_path: data_dir.join("stockroom.db"),
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl StockroomConfig {
    /// Load configuration from a file (TOML, JSON, or YAML).
    pub fn from_file(path: impl AsRef<std::path::Path>) -> StockResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let ext = path.as_ref().extension().and_then(|e| e.to_str());

        match ext {
            Some("toml") => {
                toml::from_str(&content).map_err(|e| StockError::Configuration(e.to_string()))
            }
            Some("json") => {
                serde_json::from_str(&content).map_err(|e| StockError::Configuration(e.to_string()))
            }
            Some("yaml" | "yml") => {
                serde_yaml::from_str(&content).map_err(|e| StockError::Configuration(e.to_string()))
            }
            _ => Err(StockError::Configuration(
                "Unsupported config file format. Use .toml, .json, or .yaml".to_string(),
            )),
        }
    }

    /// Load configuration from STOCKROOM_* environment variables, falling back
    /// to defaults for anything unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("STOCKROOM_DB_PATH") {
            config.db_path = PathBuf::from(path);
        }
        if let Ok(host) = std::env::var("STOCKROOM_HOST") {
            config.host = host;
        }
        if let Ok(port) = std::env::var("STOCKROOM_PORT") {
            if let Ok(port) = port.parse() {
                config.port = port;
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StockroomConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert!(config.db_path.ends_with("stockroom.db"));
    }

    #[test]
    fn test_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stockroom.toml");
        std::fs::write(&path, "db_path = \"/tmp/inventory.db\"\nport = 9090\n").unwrap();

        let config = StockroomConfig::from_file(&path).unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/inventory.db"));
        assert_eq!(config.port, 9090);
        // Unset fields keep their defaults.
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stockroom.ini");
        std::fs::write(&path, "port = 9090").unwrap();

        let err = StockroomConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, StockError::Configuration(_)));
    }
}
