use std::path::Path;
use std::sync::Arc;

use tokio::fs;
use tracing::{debug, info};

use super::Config;
use crate::errors::ConfigError;

pub struct ConfigManager {
    current_config: Arc<Config>,
}

impl ConfigManager {
    /// Load configuration from a TOML file. A missing file is not an error:
    /// the console runs with defaults so it works out of the box against a
    /// local MongoDB.
    pub async fn new(config_path: String) -> Result<Self, ConfigError> {
        let config = Self::load_configuration(&config_path).await?;
        Ok(Self {
            current_config: Arc::new(config),
        })
    }

    pub fn get_current_config(&self) -> Arc<Config> {
        self.current_config.clone()
    }

    async fn load_configuration(config_path: &str) -> Result<Config, ConfigError> {
        let mut config = if Path::new(config_path).exists() {
            let content =
                fs::read_to_string(config_path)
                    .await
                    .map_err(|e| ConfigError::LoadFailed {
                        path: config_path.to_string(),
                        reason: e.to_string(),
                    })?;

            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                reason: e.to_string(),
            })?
        } else {
            debug!("No config file at {}, using defaults", config_path);
            Config::default()
        };

        // Connection string from the environment wins over the file
        if let Ok(url) = std::env::var("MONGODB_URL") {
            if !url.is_empty() {
                info!("Using MongoDB connection string from MONGODB_URL");
                config.mongodb_url = url;
            }
        }

        if config.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "port".to_string(),
                reason: "port must be non-zero".to_string(),
            });
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_falls_back_to_defaults() {
        let manager = ConfigManager::new("does-not-exist.toml".to_string())
            .await
            .unwrap();
        let config = manager.get_current_config();
        assert_eq!(config.port, crate::constants::server::DEFAULT_PORT);
        assert_eq!(config.static_dir, "public");
    }

    #[tokio::test]
    async fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "host = \"127.0.0.1\"\nport = 9000\nmongodb_url = \"mongodb://db:27017\"\n",
        )
        .unwrap();

        let manager = ConfigManager::new(path.to_string_lossy().to_string())
            .await
            .unwrap();
        let config = manager.get_current_config();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.mongodb_url, "mongodb://db:27017");
    }

    #[tokio::test]
    async fn unparsable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "port = \"not a number\"").unwrap();

        let result = ConfigManager::new(path.to_string_lossy().to_string()).await;
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }
}
