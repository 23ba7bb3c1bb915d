//! In-memory store client double.
//!
//! Behaves like a tiny document store: duplicate `_id` inserts are rejected,
//! collections keep insertion order, and per-collection failure injection
//! simulates a server that became unreachable mid-operation. Call counters
//! let tests assert that nothing was written.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{Bson, Document};

use mongo_admin::errors::StoreError;
use mongo_admin::store::{id_filter, DatabaseInfo, DocumentPage, InsertOutcome, StoreClient};

#[derive(Default)]
pub struct MockStore {
    data: Mutex<HashMap<String, BTreeMap<String, Vec<Document>>>>,
    failing_reads: Mutex<HashSet<String>>,
    failing_writes: Mutex<HashSet<String>>,
    connected: AtomicBool,
    insert_calls: AtomicUsize,
    delete_all_calls: AtomicUsize,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            connected: AtomicBool::new(true),
            ..Self::default()
        }
    }

    /// Seed a collection with documents (an empty vector materializes the
    /// collection without contents).
    pub fn seed(&self, database: &str, collection: &str, documents: Vec<Document>) {
        let mut data = self.data.lock().unwrap();
        data.entry(database.to_string())
            .or_default()
            .insert(collection.to_string(), documents);
    }

    /// Reads of this collection start failing
    pub fn fail_reads_on(&self, collection: &str) {
        self.failing_reads
            .lock()
            .unwrap()
            .insert(collection.to_string());
    }

    /// Writes (inserts and delete-all) to this collection start failing
    pub fn fail_writes_on(&self, collection: &str) {
        self.failing_writes
            .lock()
            .unwrap()
            .insert(collection.to_string());
    }

    /// Simulate a lost connection
    pub fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    pub fn delete_all_calls(&self) -> usize {
        self.delete_all_calls.load(Ordering::SeqCst)
    }

    pub fn documents_in(&self, database: &str, collection: &str) -> Vec<Document> {
        self.data
            .lock()
            .unwrap()
            .get(database)
            .and_then(|collections| collections.get(collection))
            .cloned()
            .unwrap_or_default()
    }

    fn check_connected(&self) -> Result<(), StoreError> {
        if self.connected.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable {
                reason: "mock store disconnected".to_string(),
            })
        }
    }
}

#[async_trait]
impl StoreClient for MockStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.check_connected()
    }

    async fn list_databases(&self) -> Result<Vec<DatabaseInfo>, StoreError> {
        self.check_connected()?;
        let data = self.data.lock().unwrap();
        Ok(data
            .keys()
            .map(|name| DatabaseInfo {
                name: name.clone(),
                size_on_disk: 0,
            })
            .collect())
    }

    async fn create_database(&self, database: &str) -> Result<(), StoreError> {
        self.check_connected()?;
        let mut data = self.data.lock().unwrap();
        data.entry(database.to_string())
            .or_default()
            .entry("_placeholder".to_string())
            .or_default();
        Ok(())
    }

    async fn drop_database(&self, database: &str) -> Result<(), StoreError> {
        self.check_connected()?;
        self.data.lock().unwrap().remove(database);
        Ok(())
    }

    async fn list_collections(&self, database: &str) -> Result<Vec<String>, StoreError> {
        self.check_connected()?;
        let data = self.data.lock().unwrap();
        Ok(data
            .get(database)
            .map(|collections| collections.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn find_all(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<Vec<Document>, StoreError> {
        self.check_connected()?;
        if self.failing_reads.lock().unwrap().contains(collection) {
            return Err(StoreError::Read {
                collection: collection.to_string(),
                reason: "mock read failure".to_string(),
            });
        }
        Ok(self.documents_in(database, collection))
    }

    async fn find_page(
        &self,
        database: &str,
        collection: &str,
        skip: u64,
        limit: usize,
    ) -> Result<DocumentPage, StoreError> {
        let documents = self.find_all(database, collection).await?;
        let total = documents.len() as u64;
        let page = documents
            .into_iter()
            .skip(skip as usize)
            .take(limit)
            .collect();
        Ok(DocumentPage {
            documents: page,
            total,
        })
    }

    async fn find_by_id(
        &self,
        database: &str,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        let wanted = id_filter(id);
        let documents = self.find_all(database, collection).await?;
        Ok(documents
            .into_iter()
            .find(|document| document.get("_id") == wanted.get("_id")))
    }

    async fn insert_one(
        &self,
        database: &str,
        collection: &str,
        mut document: Document,
    ) -> Result<InsertOutcome, StoreError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        self.check_connected()?;

        if self.failing_writes.lock().unwrap().contains(collection) {
            return Err(StoreError::Write {
                collection: collection.to_string(),
                reason: "mock write failure".to_string(),
            });
        }

        let mut data = self.data.lock().unwrap();
        let documents = data
            .entry(database.to_string())
            .or_default()
            .entry(collection.to_string())
            .or_default();

        match document.get("_id") {
            Some(id) => {
                let duplicate = documents
                    .iter()
                    .any(|existing| existing.get("_id") == Some(id));
                if duplicate {
                    return Ok(InsertOutcome::Rejected(format!(
                        "E11000 duplicate key error: {}",
                        id
                    )));
                }
            }
            None => {
                document.insert("_id", Bson::ObjectId(ObjectId::new()));
            }
        }

        documents.push(document);
        Ok(InsertOutcome::Inserted)
    }

    async fn replace_by_id(
        &self,
        database: &str,
        collection: &str,
        id: &str,
        mut document: Document,
    ) -> Result<bool, StoreError> {
        self.check_connected()?;
        let wanted = id_filter(id);
        let id_value = wanted.get("_id").cloned().unwrap();

        let mut data = self.data.lock().unwrap();
        let Some(documents) = data
            .get_mut(database)
            .and_then(|collections| collections.get_mut(collection))
        else {
            return Ok(false);
        };

        for existing in documents.iter_mut() {
            if existing.get("_id") == Some(&id_value) {
                document.insert("_id", id_value);
                *existing = document;
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn delete_by_id(
        &self,
        database: &str,
        collection: &str,
        id: &str,
    ) -> Result<bool, StoreError> {
        self.check_connected()?;
        let wanted = id_filter(id);
        let id_value = wanted.get("_id").cloned().unwrap();

        let mut data = self.data.lock().unwrap();
        let Some(documents) = data
            .get_mut(database)
            .and_then(|collections| collections.get_mut(collection))
        else {
            return Ok(false);
        };

        let before = documents.len();
        documents.retain(|document| document.get("_id") != Some(&id_value));
        Ok(documents.len() < before)
    }

    async fn delete_all(&self, database: &str, collection: &str) -> Result<u64, StoreError> {
        self.delete_all_calls.fetch_add(1, Ordering::SeqCst);
        self.check_connected()?;

        if self.failing_writes.lock().unwrap().contains(collection) {
            return Err(StoreError::Write {
                collection: collection.to_string(),
                reason: "mock write failure".to_string(),
            });
        }

        let mut data = self.data.lock().unwrap();
        let Some(documents) = data
            .get_mut(database)
            .and_then(|collections| collections.get_mut(collection))
        else {
            return Ok(0);
        };

        let removed = documents.len() as u64;
        documents.clear();
        Ok(removed)
    }
}
