pub mod handlers;
pub mod server;

pub use server::{create_router, start_web_server};

use std::sync::Arc;

use crate::config::Config;
use crate::snapshot::{Exporter, Importer};
use crate::store::StoreClient;

// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn StoreClient>,
    pub exporter: Arc<Exporter>,
    pub importer: Arc<Importer>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        store: Arc<dyn StoreClient>,
        exporter: Arc<Exporter>,
        importer: Arc<Importer>,
    ) -> Self {
        Self {
            config,
            store,
            exporter,
            importer,
        }
    }
}
