use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::models::api::{
    DeleteRequest, DeleteResponse, HealthResponse, UploadData, UploadResponse,
};
use crate::storage::{make_object_key, object_key_from_url, UploadMetadata};

/// MIME types accepted for upload.
const ALLOWED_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/jpg", "image/webp"];
/// Upload size ceiling.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
/// Multipart field carrying the image.
const IMAGE_FIELD: &str = "image";

/// Image upload and deletion routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route(
            "/upload",
            // Leave headroom over the file ceiling for multipart framing.
            post(upload_image).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024)),
        )
        .route("/delete", delete(delete_image))
}

/// GET /
async fn index() -> &'static str {
    "Hello world"
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// POST /upload - Store a single image and return its public URL.
async fn upload_image(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut upload: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Multipart(e.to_string()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        if upload.is_some() {
            return Err(ApiError::TooManyFiles);
        }

        // Declared MIME type is checked before the body is read; a
        // disallowed type never reaches storage.
        let mime_type = field.content_type().unwrap_or_default().to_string();
        if !ALLOWED_MIME_TYPES.contains(&mime_type.as_str()) {
            return Err(ApiError::InvalidFileType);
        }

        let original_name = field.file_name().unwrap_or("upload").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::Multipart(e.to_string()))?;
        if data.len() > MAX_UPLOAD_BYTES {
            return Err(ApiError::FileTooLarge);
        }

        upload = Some((original_name, mime_type, data.to_vec()));
    }

    let (original_name, mime_type, data) = upload.ok_or(ApiError::MissingFile)?;

    let key = make_object_key(&original_name);
    let metadata = UploadMetadata {
        field_name: IMAGE_FIELD.to_string(),
        original_name,
        uploaded_at: chrono::Utc::now().to_rfc3339(),
    };

    let url = state
        .storage
        .upload_bytes(&data, &key, Some(&mime_type), &metadata)
        .await?;

    info!(
        "Uploaded {key} ({} bytes) via {}",
        data.len(),
        state.storage.provider_name()
    );

    Ok(Json(UploadResponse {
        success: true,
        message: "Image uploaded successfully".to_string(),
        data: UploadData {
            url,
            key,
            size: data.len() as u64,
            mime_type,
        },
    }))
}

/// DELETE /delete - Remove a stored image given its public URL.
async fn delete_image(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DeleteRequest>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let image_url = req
        .image_url
        .as_deref()
        .filter(|u| !u.is_empty())
        .ok_or(ApiError::MissingImageUrl)?;

    let key = object_key_from_url(image_url)?;
    state.storage.delete_object(key).await?;

    info!("Deleted image {key}");

    Ok(Json(DeleteResponse {
        message: "Image deleted".to_string(),
    }))
}
