// Database and collection listing, create and drop

use axum::extract::{Path, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

use super::common::{ApiError, ApiResult};
use crate::constants::store;
use crate::web::AppState;

#[derive(Debug, Serialize)]
pub struct DatabaseSummary {
    pub name: String,
    #[serde(rename = "sizeOnDisk")]
    pub size_on_disk: u64,
}

#[derive(Debug, Serialize)]
pub struct CollectionSummary {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateDatabaseRequest {
    #[serde(rename = "dbName")]
    pub db_name: String,
}

pub async fn list_databases(State(state): State<AppState>) -> ApiResult<Vec<DatabaseSummary>> {
    let databases = state.store.list_databases().await?;
    Ok(Json(
        databases
            .into_iter()
            .map(|db| DatabaseSummary {
                name: db.name,
                size_on_disk: db.size_on_disk,
            })
            .collect(),
    ))
}

pub async fn create_database(
    State(state): State<AppState>,
    Json(request): Json<CreateDatabaseRequest>,
) -> ApiResult<Value> {
    let name = request.db_name.trim();
    if name.is_empty() {
        return Err(ApiError::bad_request("Database name must not be empty"));
    }
    if name.chars().any(|c| "/\\. \"$".contains(c)) {
        return Err(ApiError::bad_request(format!(
            "Database name '{}' contains invalid characters",
            name
        )));
    }

    state.store.create_database(name).await?;
    info!("Created database '{}'", name);
    Ok(Json(json!({
        "message": format!("Database '{}' created successfully", name)
    })))
}

pub async fn delete_database(
    Path(database): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<Value> {
    if store::PROTECTED_DATABASES.contains(&database.to_lowercase().as_str()) {
        warn!("Refusing to drop system database '{}'", database);
        return Err(ApiError::bad_request(format!(
            "Database '{}' is a system database and cannot be deleted",
            database
        )));
    }

    state.store.drop_database(&database).await?;
    info!("Dropped database '{}'", database);
    Ok(Json(json!({
        "message": format!("Database '{}' deleted successfully", database)
    })))
}

pub async fn list_collections(
    Path(database): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<Vec<CollectionSummary>> {
    let names = state.store.list_collections(&database).await?;
    Ok(Json(
        names
            .into_iter()
            .map(|name| CollectionSummary { name })
            .collect(),
    ))
}
