use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use crate::models::api::ErrorResponse;
use crate::storage::StorageError;

/// Centralized request error taxonomy. Every variant maps to an HTTP
/// status and an `{error, message}` JSON envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Please select an image file to upload")]
    MissingFile,
    #[error("Only JPEG, PNG, JPG, and WebP images are allowed")]
    InvalidFileType,
    #[error("File size must be less than 10MB")]
    FileTooLarge,
    #[error("Only one image may be uploaded per request")]
    TooManyFiles,
    #[error("Malformed multipart request: {0}")]
    Multipart(String),
    #[error("Image URL is required")]
    MissingImageUrl,
    #[error("Title and description are required")]
    MissingPitchFields,
    #[error("Content is required")]
    MissingContent,
    #[error("Generation API key is not configured")]
    GenerationNotConfigured,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::MissingFile
            | Self::InvalidFileType
            | Self::FileTooLarge
            | Self::TooManyFiles
            | Self::Multipart(_)
            | Self::MissingPitchFields
            | Self::MissingContent
            | Self::Storage(StorageError::InvalidUrl(_)) => StatusCode::BAD_REQUEST,
            Self::MissingImageUrl | Self::GenerationNotConfigured => StatusCode::NOT_FOUND,
            Self::Storage(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::MissingFile => "No file uploaded",
            Self::InvalidFileType => "Invalid file type",
            Self::FileTooLarge => "File too large",
            Self::TooManyFiles => "Too many files",
            Self::Multipart(_) => "Malformed upload request",
            Self::MissingImageUrl => "Missing image URL",
            Self::MissingPitchFields | Self::MissingContent => "Missing required fields",
            Self::GenerationNotConfigured => "Generation unavailable",
            Self::Storage(StorageError::InvalidUrl(_)) => "Invalid image URL",
            Self::Storage(_) => "Upstream storage error",
            Self::Internal(_) => "Internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Upstream and internal detail is logged, never serialized.
        let message = match &self {
            Self::Storage(e) if !matches!(e, StorageError::InvalidUrl(_)) => {
                error!("Storage error: {e}");
                "The storage backend could not complete the request".to_string()
            }
            Self::Internal(e) => {
                error!("Unhandled error: {e:#}");
                "Something went wrong on our end".to_string()
            }
            other => other.to_string(),
        };

        (
            status,
            Json(ErrorResponse {
                error: self.label().to_string(),
                message,
            }),
        )
            .into_response()
    }
}
