//! Snapshot wire codec.
//!
//! The serialized form is a single JSON object:
//!
//! ```json
//! {
//!   "database": "shop",
//!   "exportedAt": "2026-08-07T10:15:00+00:00",
//!   "collections": { "orders": [ { "_id": { "$oid": "..." }, ... } ] }
//! }
//! ```
//!
//! Documents are rendered in MongoDB relaxed extended JSON so that ObjectIds,
//! dates and binary values keep their tagged form and re-import preserves the
//! original identifiers instead of assigning new ones.

use std::collections::BTreeMap;

use bson::Bson;
use chrono::{DateTime, Utc};
use serde_json::Value;

use super::Snapshot;
use crate::errors::SnapshotError;

const FIELD_DATABASE: &str = "database";
const FIELD_EXPORTED_AT: &str = "exportedAt";
const FIELD_COLLECTIONS: &str = "collections";

/// Pure converter between [`Snapshot`] values and snapshot files. Holds no
/// state and performs no I/O.
pub struct SnapshotCodec;

impl SnapshotCodec {
    pub fn encode(snapshot: &Snapshot) -> Result<Vec<u8>, SnapshotError> {
        let mut collections = serde_json::Map::new();
        for (name, documents) in &snapshot.collections {
            let rendered = documents
                .iter()
                .map(|document| Bson::Document(document.clone()).into_relaxed_extjson())
                .collect();
            collections.insert(name.clone(), Value::Array(rendered));
        }

        let mut root = serde_json::Map::new();
        root.insert(
            FIELD_DATABASE.to_string(),
            Value::String(snapshot.database.clone()),
        );
        if let Some(exported_at) = snapshot.exported_at {
            root.insert(
                FIELD_EXPORTED_AT.to_string(),
                Value::String(exported_at.to_rfc3339()),
            );
        }
        root.insert(FIELD_COLLECTIONS.to_string(), Value::Object(collections));

        serde_json::to_vec_pretty(&Value::Object(root)).map_err(|e| SnapshotError::Malformed {
            reason: e.to_string(),
        })
    }

    pub fn decode(bytes: &[u8]) -> Result<Snapshot, SnapshotError> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| SnapshotError::Malformed {
                reason: e.to_string(),
            })?;

        let root = value.as_object().ok_or_else(|| SnapshotError::Malformed {
            reason: "top level is not a JSON object".to_string(),
        })?;

        let database = root
            .get(FIELD_DATABASE)
            .ok_or_else(|| SnapshotError::Unsupported {
                field: FIELD_DATABASE.to_string(),
            })?
            .as_str()
            .ok_or_else(|| SnapshotError::Malformed {
                reason: "'database' is not a string".to_string(),
            })?
            .to_string();

        let exported_at = match root.get(FIELD_EXPORTED_AT) {
            None | Some(Value::Null) => None,
            Some(Value::String(raw)) => Some(parse_timestamp(raw)?),
            Some(_) => {
                return Err(SnapshotError::Malformed {
                    reason: "'exportedAt' is not a string".to_string(),
                })
            }
        };

        let collections_obj = root
            .get(FIELD_COLLECTIONS)
            .ok_or_else(|| SnapshotError::Unsupported {
                field: FIELD_COLLECTIONS.to_string(),
            })?
            .as_object()
            .ok_or_else(|| SnapshotError::Malformed {
                reason: "'collections' is not an object".to_string(),
            })?;

        let mut collections = BTreeMap::new();
        for (name, value) in collections_obj {
            let array = value.as_array().ok_or_else(|| SnapshotError::Malformed {
                reason: format!("collection '{}' is not an array", name),
            })?;

            let mut documents = Vec::with_capacity(array.len());
            for element in array {
                let bson =
                    Bson::try_from(element.clone()).map_err(|e| SnapshotError::Malformed {
                        reason: format!("invalid document in collection '{}': {}", name, e),
                    })?;
                match bson {
                    Bson::Document(document) => documents.push(document),
                    _ => {
                        return Err(SnapshotError::Malformed {
                            reason: format!("collection '{}' contains a non-document entry", name),
                        })
                    }
                }
            }
            collections.insert(name.clone(), documents);
        }

        Ok(Snapshot {
            database,
            exported_at,
            collections,
        })
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, SnapshotError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| SnapshotError::Malformed {
            reason: format!("'exportedAt' is not an ISO-8601 timestamp: {}", e),
        })
}
