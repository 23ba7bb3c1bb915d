pub mod manager;

use serde::{Deserialize, Serialize};

pub use manager::ConfigManager;

use crate::constants::{server, store};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// MongoDB connection string; overridable via the MONGODB_URL env var
    #[serde(default = "default_mongodb_url")]
    pub mongodb_url: String,
    /// Directory the static UI is served from
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_host() -> String {
    server::DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    server::DEFAULT_PORT
}

fn default_mongodb_url() -> String {
    store::DEFAULT_URL.to_string()
}

fn default_static_dir() -> String {
    server::STATIC_DIR.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            mongodb_url: default_mongodb_url(),
            static_dir: default_static_dir(),
        }
    }
}
