use std::io::ErrorKind;
use std::path::Path;

use axum::{
    extract::{multipart::{Field, MultipartRejection}, Multipart, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::utils::extract::QueryParams;
use crate::AppState;

/// Largest accepted upload (20 MiB).
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;
pub const ACCEPTED_UPLOAD_TYPE: &str = "application/pdf";

const REJECTED_UPLOAD: &str = "No file or invalid one has been inputted";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileQuery {
    pub file_id: Option<String>,
}

/// Download the published document
pub async fn get_file(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<FileQuery>,
) -> AppResult<Response> {
    let path = &state.config.file_download_path;
    tracing::debug!(file_id = ?query.file_id, path = %path.display(), "File requested");

    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AppError::NotFound("File not found".to_string()));
        }
        Err(e) => return Err(AppError::Internal(format!("Failed to read file: {}", e))),
    };

    let content_type = mime_guess::from_path(path).first_or_octet_stream();
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("download");

    Ok((
        [
            (header::CONTENT_TYPE, content_type.essence_str().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// Upload a PDF; it is stored under a server-generated name
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<serde_json::Value>> {
    let mut multipart = multipart.map_err(|e| AppError::PayloadRejected(e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::PayloadRejected(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        if field.content_type() != Some(ACCEPTED_UPLOAD_TYPE) {
            return Err(AppError::PayloadRejected(REJECTED_UPLOAD.to_string()));
        }

        tokio::fs::create_dir_all(&state.config.upload_dir)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create upload directory: {}", e)))?;

        let path = state
            .config
            .upload_dir
            .join(format!("uploaded_file_{}.pdf", Uuid::new_v4()));

        match store_upload(field, &path).await {
            Ok(size) => {
                tracing::info!(path = %path.display(), size, "File uploaded");
                return Ok(Json(serde_json::json!({
                    "message": "Your file has been uploaded successfully."
                })));
            }
            Err(e) => {
                let _ = tokio::fs::remove_file(&path).await;
                return Err(e);
            }
        }
    }

    Err(AppError::PayloadRejected(REJECTED_UPLOAD.to_string()))
}

/// Streams the field to `path`, enforcing the size bounds as it goes.
async fn store_upload(mut field: Field<'_>, path: &Path) -> AppResult<usize> {
    let mut file = tokio::fs::File::create(path)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create file: {}", e)))?;

    let mut size = 0usize;
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| AppError::PayloadRejected(e.body_text()))?
    {
        size += chunk.len();
        if size > MAX_UPLOAD_BYTES {
            return Err(AppError::PayloadRejected(REJECTED_UPLOAD.to_string()));
        }
        file.write_all(&chunk)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write file: {}", e)))?;
    }

    if size == 0 {
        return Err(AppError::PayloadRejected(REJECTED_UPLOAD.to_string()));
    }

    file.flush()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to write file: {}", e)))?;

    Ok(size)
}
