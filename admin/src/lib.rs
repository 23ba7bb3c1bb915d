pub mod config;
pub mod constants;
pub mod errors;
pub mod snapshot;
pub mod store;
pub mod web;

// Re-export commonly used types
pub use config::{Config, ConfigManager};
pub use errors::{AdminError, SnapshotError, StoreError};
pub use snapshot::{
    Exporter, ImportFailure, ImportOptions, ImportReport, Importer, Snapshot, SnapshotCodec,
};
pub use store::{MongoStore, StoreClient};
