//! MongoDB-backed implementation of the store client contract.

use async_trait::async_trait;
use bson::{doc, Document};
use futures::stream::TryStreamExt;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::ClientOptions;
use mongodb::Client;
use tracing::debug;

use super::{id_filter, DatabaseInfo, DocumentPage, InsertOutcome, StoreClient};
use crate::constants::store;
use crate::errors::StoreError;

pub struct MongoStore {
    client: Client,
}

impl MongoStore {
    /// Connect to the deployment named by `url`. The driver connects lazily,
    /// so this succeeds even while the server is down; `ping` reports the
    /// live state.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(url)
            .await
            .map_err(|e| StoreError::Unavailable {
                reason: e.to_string(),
            })?;
        options.app_name = Some(store::APP_NAME.to_string());
        options.server_selection_timeout = Some(store::SERVER_SELECTION_TIMEOUT);

        let client = Client::with_options(options).map_err(|e| StoreError::Unavailable {
            reason: e.to_string(),
        })?;

        Ok(Self { client })
    }

    fn unavailable(e: mongodb::error::Error) -> StoreError {
        StoreError::Unavailable {
            reason: e.to_string(),
        }
    }

    fn read_error(collection: &str, e: mongodb::error::Error) -> StoreError {
        StoreError::Read {
            collection: collection.to_string(),
            reason: e.to_string(),
        }
    }

    fn write_error(collection: &str, e: mongodb::error::Error) -> StoreError {
        StoreError::Write {
            collection: collection.to_string(),
            reason: e.to_string(),
        }
    }
}

#[async_trait]
impl StoreClient for MongoStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(Self::unavailable)
    }

    async fn list_databases(&self) -> Result<Vec<DatabaseInfo>, StoreError> {
        let specs = self
            .client
            .list_databases()
            .await
            .map_err(Self::unavailable)?;

        Ok(specs
            .into_iter()
            .map(|spec| DatabaseInfo {
                name: spec.name,
                size_on_disk: spec.size_on_disk,
            })
            .collect())
    }

    async fn create_database(&self, database: &str) -> Result<(), StoreError> {
        // MongoDB materializes a database on first write, so seed a
        // placeholder collection.
        self.client
            .database(database)
            .create_collection(store::PLACEHOLDER_COLLECTION)
            .await
            .map_err(|e| Self::write_error(store::PLACEHOLDER_COLLECTION, e))
    }

    async fn drop_database(&self, database: &str) -> Result<(), StoreError> {
        self.client
            .database(database)
            .drop()
            .await
            .map_err(Self::unavailable)
    }

    async fn list_collections(&self, database: &str) -> Result<Vec<String>, StoreError> {
        self.client
            .database(database)
            .list_collection_names()
            .await
            .map_err(Self::unavailable)
    }

    async fn find_all(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<Vec<Document>, StoreError> {
        let coll = self
            .client
            .database(database)
            .collection::<Document>(collection);

        let mut cursor = coll
            .find(doc! {})
            .await
            .map_err(|e| Self::read_error(collection, e))?;

        let mut documents = Vec::new();
        while let Some(document) = cursor
            .try_next()
            .await
            .map_err(|e| Self::read_error(collection, e))?
        {
            documents.push(document);
        }

        debug!(
            "Fetched {} documents from {}.{}",
            documents.len(),
            database,
            collection
        );
        Ok(documents)
    }

    async fn find_page(
        &self,
        database: &str,
        collection: &str,
        skip: u64,
        limit: usize,
    ) -> Result<DocumentPage, StoreError> {
        let coll = self
            .client
            .database(database)
            .collection::<Document>(collection);

        let total = coll
            .count_documents(doc! {})
            .await
            .map_err(|e| Self::read_error(collection, e))?;

        let mut cursor = coll
            .find(doc! {})
            .skip(skip)
            .limit(limit as i64)
            .await
            .map_err(|e| Self::read_error(collection, e))?;

        let mut documents = Vec::new();
        while let Some(document) = cursor
            .try_next()
            .await
            .map_err(|e| Self::read_error(collection, e))?
        {
            documents.push(document);
        }

        Ok(DocumentPage { documents, total })
    }

    async fn find_by_id(
        &self,
        database: &str,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        self.client
            .database(database)
            .collection::<Document>(collection)
            .find_one(id_filter(id))
            .await
            .map_err(|e| Self::read_error(collection, e))
    }

    async fn insert_one(
        &self,
        database: &str,
        collection: &str,
        document: Document,
    ) -> Result<InsertOutcome, StoreError> {
        let result = self
            .client
            .database(database)
            .collection::<Document>(collection)
            .insert_one(document)
            .await;

        match result {
            Ok(_) => Ok(InsertOutcome::Inserted),
            // A write error means the server looked at the document and said
            // no (duplicate _id, rejected field). That is a per-document
            // outcome, not a store failure.
            Err(e) => match *e.kind {
                ErrorKind::Write(WriteFailure::WriteError(ref write_error)) => {
                    Ok(InsertOutcome::Rejected(write_error.message.clone()))
                }
                _ => Err(Self::write_error(collection, e)),
            },
        }
    }

    async fn replace_by_id(
        &self,
        database: &str,
        collection: &str,
        id: &str,
        document: Document,
    ) -> Result<bool, StoreError> {
        let result = self
            .client
            .database(database)
            .collection::<Document>(collection)
            .replace_one(id_filter(id), document)
            .await
            .map_err(|e| Self::write_error(collection, e))?;

        Ok(result.matched_count > 0)
    }

    async fn delete_by_id(
        &self,
        database: &str,
        collection: &str,
        id: &str,
    ) -> Result<bool, StoreError> {
        let result = self
            .client
            .database(database)
            .collection::<Document>(collection)
            .delete_one(id_filter(id))
            .await
            .map_err(|e| Self::write_error(collection, e))?;

        Ok(result.deleted_count > 0)
    }

    async fn delete_all(&self, database: &str, collection: &str) -> Result<u64, StoreError> {
        let result = self
            .client
            .database(database)
            .collection::<Document>(collection)
            .delete_many(doc! {})
            .await
            .map_err(|e| Self::write_error(collection, e))?;

        Ok(result.deleted_count)
    }
}
