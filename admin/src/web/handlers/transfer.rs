// Whole-database export and import endpoints

use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde_json::json;
use tracing::{error, info};

use super::common::ApiError;
use crate::errors::AdminError;
use crate::snapshot::ImportOptions;
use crate::web::AppState;

/// Stream the full database snapshot back as a downloadable JSON file.
pub async fn export_database(
    Path(database): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, ApiError> {
    info!("Export requested for database '{}'", database);

    let bytes = state.exporter.export(&database).await.map_err(|e| {
        error!("Export of '{}' failed: {}", database, e);
        ApiError::from(e)
    })?;

    let filename = format!(
        "{}_export_{}.json",
        database,
        Utc::now().format("%Y%m%d_%H%M%S")
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// Accept a snapshot upload (multipart: `file` plus a `dropExisting` flag)
/// and replay it into the target database. On a mid-import failure the
/// response carries both the error and the partial report.
pub async fn import_database(
    Path(database): Path<String>,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let mut file_bytes: Option<Vec<u8>> = None;
    let mut drop_existing = false;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return ApiError::bad_request(format!("Invalid upload: {}", e)).into_response()
            }
        };

        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => match field.bytes().await {
                Ok(bytes) => file_bytes = Some(bytes.to_vec()),
                Err(e) => {
                    return ApiError::bad_request(format!("Failed to read upload: {}", e))
                        .into_response()
                }
            },
            Some("dropExisting") => {
                drop_existing = matches!(field.text().await.as_deref(), Ok("true"));
            }
            _ => {}
        }
    }

    let Some(bytes) = file_bytes else {
        return ApiError::bad_request("No snapshot file in upload").into_response();
    };

    info!(
        "Import requested for database '{}' ({} bytes, dropExisting: {})",
        database,
        bytes.len(),
        drop_existing
    );

    let options = ImportOptions { drop_existing };
    match state.importer.import(&database, &bytes, options).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(failure) => {
            error!("Import into '{}' failed: {}", database, failure.error);
            let status = match &failure.error {
                AdminError::Snapshot(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (
                status,
                Json(json!({
                    "error": failure.error.to_string(),
                    "report": failure.report,
                })),
            )
                .into_response()
        }
    }
}
