use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use mongo_admin::config::ConfigManager;
use mongo_admin::snapshot::{Exporter, Importer};
use mongo_admin::store::{MongoStore, StoreClient};
use mongo_admin::web::start_web_server;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging with reduced verbosity
    let env_filter = EnvFilter::from_default_env()
        .add_directive("mongo_admin=info".parse()?)
        .add_directive("tower_http=warn".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("mongodb=warn".parse()?);

    fmt().with_env_filter(env_filter).init();

    info!("Starting MongoDB admin console");

    // Load configuration
    let config_path = std::env::var("ADMIN_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let config_manager = ConfigManager::new(config_path).await?;
    let config = config_manager.get_current_config();
    info!(
        "Configuration loaded: binding {}:{}, store at {}",
        config.host, config.port, config.mongodb_url
    );

    // Connect the store client. The driver connects lazily, so a down
    // server is reported through the health endpoint rather than aborting
    // startup.
    let store: Arc<dyn StoreClient> = Arc::new(MongoStore::connect(&config.mongodb_url).await?);
    match store.ping().await {
        Ok(()) => info!("Connected to MongoDB"),
        Err(e) => warn!("MongoDB not reachable yet: {}", e),
    }

    // Export/import core
    let exporter = Arc::new(Exporter::new(store.clone()));
    let importer = Arc::new(Importer::new(store.clone()));

    // Start web server
    start_web_server(config, store, exporter, importer).await?;

    Ok(())
}
