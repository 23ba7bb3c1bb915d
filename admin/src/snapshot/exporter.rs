//! Whole-database export.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::{Snapshot, SnapshotCodec};
use crate::errors::AdminError;
use crate::store::StoreClient;

pub struct Exporter {
    store: Arc<dyn StoreClient>,
}

impl Exporter {
    pub fn new(store: Arc<dyn StoreClient>) -> Self {
        Self { store }
    }

    /// Export every collection of `database` into one snapshot file.
    ///
    /// Read-only on the source. Any collection read failure is fatal to the
    /// whole export; there are no partial snapshots.
    pub async fn export(&self, database: &str) -> Result<Vec<u8>, AdminError> {
        let snapshot = self.build_snapshot(database).await?;
        let bytes = SnapshotCodec::encode(&snapshot)?;

        info!(
            "Exported database '{}': {} collections, {} documents, {} bytes",
            database,
            snapshot.collections.len(),
            snapshot.document_count(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Assemble the in-memory snapshot: the live collection list, then every
    /// document of every collection, in store enumeration order.
    pub async fn build_snapshot(&self, database: &str) -> Result<Snapshot, AdminError> {
        let exported_at = Utc::now();
        let names = self.store.list_collections(database).await?;

        let mut collections = BTreeMap::new();
        for name in names {
            let documents = self.store.find_all(database, &name).await?;
            collections.insert(name, documents);
        }

        Ok(Snapshot {
            database: database.to_string(),
            exported_at: Some(exported_at),
            collections,
        })
    }
}
