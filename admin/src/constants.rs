//! Application-wide constants for timeouts, limits, and defaults

use std::time::Duration;

/// Web server defaults
pub mod server {
    /// Default bind host
    pub const DEFAULT_HOST: &str = "0.0.0.0";

    /// Default listen port
    pub const DEFAULT_PORT: u16 = 8128;

    /// Directory the static browser UI is served from
    pub const STATIC_DIR: &str = "public";

    /// Maximum accepted size of an uploaded snapshot file.
    /// Snapshots are held in memory end to end, so this also bounds
    /// per-import memory use.
    pub const MAX_IMPORT_BYTES: usize = 256 * 1024 * 1024;
}

/// Document store client constants
pub mod store {
    use super::Duration;

    /// Application name reported to the MongoDB server
    pub const APP_NAME: &str = "mongo-admin";

    /// How long the driver waits for a reachable server before giving up
    pub const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

    /// Default MongoDB connection string
    pub const DEFAULT_URL: &str = "mongodb://localhost:27017";

    /// Databases that must never be dropped through the console
    pub const PROTECTED_DATABASES: &[&str] = &["admin", "local", "config"];

    /// Collection created to materialize a new, otherwise-empty database
    pub const PLACEHOLDER_COLLECTION: &str = "_placeholder";
}

/// Document listing pagination
pub mod pagination {
    /// Page size when the client does not ask for one
    pub const DEFAULT_LIMIT: usize = 20;

    /// Upper bound on client-requested page size
    pub const MAX_LIMIT: usize = 200;
}
