//! Document store client abstraction.
//!
//! The admin console talks to MongoDB exclusively through the [`StoreClient`]
//! capability contract so that the export/import core can be exercised
//! against an in-memory double in tests. [`mongo::MongoStore`] is the
//! production implementation.

pub mod mongo;

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Document};

pub use mongo::MongoStore;

use crate::errors::StoreError;

/// One database as reported by the server
#[derive(Debug, Clone)]
pub struct DatabaseInfo {
    pub name: String,
    pub size_on_disk: u64,
}

/// One page of documents plus the collection's total count
#[derive(Debug, Clone)]
pub struct DocumentPage {
    pub documents: Vec<Document>,
    pub total: u64,
}

/// Outcome of a single-document insert.
///
/// A rejection (duplicate `_id`, a field the server refuses) is a normal
/// outcome, not an error: callers count it and move on. Store-level failures
/// surface as `Err(StoreError)` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    Rejected(String),
}

/// Capability contract the console requires of the document store.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Connectivity check backing the health endpoint
    async fn ping(&self) -> Result<(), StoreError>;

    async fn list_databases(&self) -> Result<Vec<DatabaseInfo>, StoreError>;

    /// Materialize a new database by seeding a placeholder collection
    async fn create_database(&self, database: &str) -> Result<(), StoreError>;

    async fn drop_database(&self, database: &str) -> Result<(), StoreError>;

    async fn list_collections(&self, database: &str) -> Result<Vec<String>, StoreError>;

    /// Fetch every document of a collection, in store enumeration order
    async fn find_all(&self, database: &str, collection: &str)
        -> Result<Vec<Document>, StoreError>;

    async fn find_page(
        &self,
        database: &str,
        collection: &str,
        skip: u64,
        limit: usize,
    ) -> Result<DocumentPage, StoreError>;

    async fn find_by_id(
        &self,
        database: &str,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreError>;

    async fn insert_one(
        &self,
        database: &str,
        collection: &str,
        document: Document,
    ) -> Result<InsertOutcome, StoreError>;

    /// Replace the document with the given id; returns false when no
    /// document matched
    async fn replace_by_id(
        &self,
        database: &str,
        collection: &str,
        id: &str,
        document: Document,
    ) -> Result<bool, StoreError>;

    async fn delete_by_id(
        &self,
        database: &str,
        collection: &str,
        id: &str,
    ) -> Result<bool, StoreError>;

    /// Empty a collection, returning the number of documents removed
    async fn delete_all(&self, database: &str, collection: &str) -> Result<u64, StoreError>;
}

/// Build an `_id` filter from a path segment. Identifiers arrive as the hex
/// form of an ObjectId for driver-assigned ids, or as an arbitrary string
/// for documents that chose their own.
pub fn id_filter(id: &str) -> Document {
    match ObjectId::parse_str(id) {
        Ok(oid) => doc! { "_id": oid },
        Err(_) => doc! { "_id": id },
    }
}
