//! Whole-database import with per-collection accounting.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info};

use super::{CollectionImportStats, ImportOptions, ImportReport, SnapshotCodec};
use crate::errors::AdminError;
use crate::store::{InsertOutcome, StoreClient};

/// A fatal import failure together with whatever was accounted before it.
///
/// Collections already processed keep their report entries; the collection
/// being processed when the failure hit, and every collection after it, are
/// absent. Callers can therefore distinguish "attempted with some rejections"
/// (present, `inserted < total`) from "never reached" (absent).
#[derive(Debug)]
pub struct ImportFailure {
    pub error: AdminError,
    pub report: ImportReport,
}

pub struct Importer {
    store: Arc<dyn StoreClient>,
}

impl Importer {
    pub fn new(store: Arc<dyn StoreClient>) -> Self {
        Self { store }
    }

    /// Replay an uploaded snapshot into `database`.
    ///
    /// Collections are processed one at a time, in snapshot mapping order.
    /// A rejected document (duplicate `_id` without `drop_existing`, a field
    /// the store refuses) is counted and skipped; a store-level failure
    /// aborts the remaining import and surfaces with the partial report.
    pub async fn import(
        &self,
        database: &str,
        bytes: &[u8],
        options: ImportOptions,
    ) -> Result<ImportReport, ImportFailure> {
        let imported_at = Utc::now();

        let snapshot = match SnapshotCodec::decode(bytes) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                return Err(ImportFailure {
                    error: e.into(),
                    report: ImportReport::new(imported_at),
                })
            }
        };

        info!(
            "Importing snapshot of '{}' into '{}': {} collections, {} documents (drop_existing: {})",
            snapshot.database,
            database,
            snapshot.collections.len(),
            snapshot.document_count(),
            options.drop_existing
        );

        let mut report = ImportReport::new(imported_at);

        for (name, documents) in &snapshot.collections {
            if options.drop_existing {
                match self.store.delete_all(database, name).await {
                    Ok(removed) => {
                        debug!("Cleared {} existing documents from {}.{}", removed, database, name)
                    }
                    Err(e) => {
                        error!("Import aborted while clearing {}.{}: {}", database, name, e);
                        return Err(ImportFailure {
                            error: e.into(),
                            report,
                        });
                    }
                }
            }

            let total = documents.len();
            let mut inserted = 0usize;

            for document in documents {
                match self.store.insert_one(database, name, document.clone()).await {
                    Ok(InsertOutcome::Inserted) => inserted += 1,
                    Ok(InsertOutcome::Rejected(reason)) => {
                        debug!("Document rejected in {}.{}: {}", database, name, reason)
                    }
                    Err(e) => {
                        error!("Import aborted in {}.{}: {}", database, name, e);
                        return Err(ImportFailure {
                            error: e.into(),
                            report,
                        });
                    }
                }
            }

            report
                .collections
                .insert(name.clone(), CollectionImportStats { total, inserted });
            info!(
                "Imported {}/{} documents into {}.{}",
                inserted, total, database, name
            );
        }

        Ok(report)
    }
}
