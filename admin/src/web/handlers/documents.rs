// Paginated document listing and single-document CRUD

use axum::extract::{Path, Query, State};
use axum::response::Json;
use bson::{Bson, Document};
use serde_json::{json, Value};
use tracing::info;

use super::common::{ApiError, ApiResult, PageQuery};
use crate::constants::pagination;
use crate::store::InsertOutcome;
use crate::web::AppState;

pub async fn list_documents(
    Path((database, collection)): Path<(String, String)>,
    Query(query): Query<PageQuery>,
    State(state): State<AppState>,
) -> ApiResult<Value> {
    let limit = query
        .limit
        .unwrap_or(pagination::DEFAULT_LIMIT)
        .min(pagination::MAX_LIMIT);
    let skip = query.skip.unwrap_or(0);

    let page = state
        .store
        .find_page(&database, &collection, skip, limit)
        .await?;

    let documents: Vec<Value> = page.documents.into_iter().map(render_document).collect();
    Ok(Json(json!({
        "documents": documents,
        "total": page.total
    })))
}

pub async fn get_document(
    Path((database, collection, id)): Path<(String, String, String)>,
    State(state): State<AppState>,
) -> ApiResult<Value> {
    match state.store.find_by_id(&database, &collection, &id).await? {
        Some(document) => Ok(Json(render_document(document))),
        None => Err(ApiError::not_found(format!(
            "Document '{}' not found in {}.{}",
            id, database, collection
        ))),
    }
}

pub async fn create_document(
    Path((database, collection)): Path<(String, String)>,
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<Value> {
    let document = parse_document(body)?;

    match state
        .store
        .insert_one(&database, &collection, document)
        .await?
    {
        InsertOutcome::Inserted => {
            info!("Inserted document into {}.{}", database, collection);
            Ok(Json(json!({ "message": "Document created successfully" })))
        }
        InsertOutcome::Rejected(reason) => Err(ApiError::conflict(reason)),
    }
}

pub async fn update_document(
    Path((database, collection, id)): Path<(String, String, String)>,
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<Value> {
    let mut document = parse_document(body)?;
    // The identifier is immutable; whatever the editor sent, keep the
    // stored one.
    document.remove("_id");

    let matched = state
        .store
        .replace_by_id(&database, &collection, &id, document)
        .await?;

    if matched {
        info!("Updated document '{}' in {}.{}", id, database, collection);
        Ok(Json(json!({ "message": "Document updated successfully" })))
    } else {
        Err(ApiError::not_found(format!(
            "Document '{}' not found in {}.{}",
            id, database, collection
        )))
    }
}

pub async fn delete_document(
    Path((database, collection, id)): Path<(String, String, String)>,
    State(state): State<AppState>,
) -> ApiResult<Value> {
    let deleted = state
        .store
        .delete_by_id(&database, &collection, &id)
        .await?;

    if deleted {
        info!("Deleted document '{}' from {}.{}", id, database, collection);
        Ok(Json(json!({ "message": "Document deleted successfully" })))
    } else {
        Err(ApiError::not_found(format!(
            "Document '{}' not found in {}.{}",
            id, database, collection
        )))
    }
}

/// Render a stored document as relaxed extended JSON, keeping `$oid` and
/// friends tagged the way the snapshot format and the UI expect them.
fn render_document(document: Document) -> Value {
    Bson::Document(document).into_relaxed_extjson()
}

/// Interpret a request body as one document, accepting extended-JSON markers.
fn parse_document(body: Value) -> Result<Document, ApiError> {
    match Bson::try_from(body) {
        Ok(Bson::Document(document)) => Ok(document),
        Ok(_) => Err(ApiError::bad_request("Request body must be a JSON object")),
        Err(e) => Err(ApiError::bad_request(format!("Invalid document: {}", e))),
    }
}
