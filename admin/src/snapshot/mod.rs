//! Database snapshot core: the portable snapshot value, its JSON codec, and
//! the exporter/importer that move whole databases through it.

pub mod codec;
pub mod exporter;
pub mod importer;

use std::collections::BTreeMap;

use bson::Document;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub use codec::SnapshotCodec;
pub use exporter::Exporter;
pub use importer::{ImportFailure, Importer};

/// Full in-memory representation of one database: every collection that
/// existed at export time, each with its documents in store enumeration
/// order. Built fresh per export/import call and discarded afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub database: String,
    /// Stamped by the exporter; tolerated as absent in uploaded snapshots
    pub exported_at: Option<DateTime<Utc>>,
    pub collections: BTreeMap<String, Vec<Document>>,
}

impl Snapshot {
    pub fn document_count(&self) -> usize {
        self.collections.values().map(Vec::len).sum()
    }
}

/// Per-collection accounting of one import run.
///
/// A collection that was attempted appears with `total` documents from the
/// snapshot and the number the store accepted; a collection the import never
/// reached is simply absent.
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    #[serde(rename = "importedAt")]
    pub imported_at: DateTime<Utc>,
    pub collections: BTreeMap<String, CollectionImportStats>,
}

impl ImportReport {
    pub fn new(imported_at: DateTime<Utc>) -> Self {
        Self {
            imported_at,
            collections: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CollectionImportStats {
    pub total: usize,
    pub inserted: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    /// Empty each target collection before inserting its documents
    pub drop_existing: bool,
}
