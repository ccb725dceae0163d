pub mod local;
pub mod s3;

use async_trait::async_trait;
use thiserror::Error;

/// Key prefix for every stored image.
pub const KEY_PREFIX: &str = "blippi/images";

const URL_KEY_SEPARATOR: &str = ".amazonaws.com/";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid storage URL: {0}")]
    InvalidUrl(String),
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("S3 error: {0}")]
    S3(String),
}

/// Metadata attached to every stored object.
#[derive(Debug, Clone)]
pub struct UploadMetadata {
    /// Multipart field the file arrived in.
    pub field_name: String,
    /// Filename as sent by the client.
    pub original_name: String,
    /// RFC 3339 upload timestamp.
    pub uploaded_at: String,
}

/// Abstract storage backend interface.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Upload raw bytes under `key` and return the object's public URL.
    async fn upload_bytes(
        &self,
        data: &[u8],
        key: &str,
        content_type: Option<&str>,
        metadata: &UploadMetadata,
    ) -> Result<String, StorageError>;

    /// Delete a stored object. Deleting an absent key is not an error.
    async fn delete_object(&self, key: &str) -> Result<(), StorageError>;

    /// Return the provider name for logging.
    fn provider_name(&self) -> &str;
}

/// Generate a bucket key for an uploaded file: timestamp plus random
/// suffix, preserving the original extension (lowercased, `bin` when the
/// name has none).
pub fn make_object_key(original_filename: &str) -> String {
    let extension = original_filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| "bin".to_string());

    let timestamp = chrono::Utc::now().timestamp_millis();
    let uuid = uuid::Uuid::new_v4().simple().to_string();
    let suffix = &uuid[..8];

    format!("{KEY_PREFIX}/{timestamp}-{suffix}.{extension}")
}

/// Extract the bucket key from a stored object's public URL. The URL is
/// split on `.amazonaws.com/`; a URL without that separator is invalid.
pub fn object_key_from_url(url: &str) -> Result<&str, StorageError> {
    url.split_once(URL_KEY_SEPARATOR)
        .map(|(_, key)| key)
        .ok_or_else(|| StorageError::InvalidUrl(url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_object_key_shape() {
        let key = make_object_key("photo.JPG");
        let rest = key.strip_prefix("blippi/images/").unwrap();
        let (stem, extension) = rest.rsplit_once('.').unwrap();
        assert_eq!(extension, "jpg");

        let (timestamp, suffix) = stem.split_once('-').unwrap();
        assert!(timestamp.chars().all(|c| c.is_ascii_digit()));
        assert!(!suffix.is_empty());
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_make_object_key_preserves_last_extension() {
        let key = make_object_key("archive.tar.png");
        assert!(key.ends_with(".png"));
    }

    #[test]
    fn test_make_object_key_without_extension() {
        let key = make_object_key("photo");
        assert!(key.ends_with(".bin"));
    }

    #[test]
    fn test_make_object_key_is_unique_enough() {
        let a = make_object_key("a.png");
        let b = make_object_key("a.png");
        assert_ne!(a, b);
    }

    #[test]
    fn test_object_key_from_url() {
        let url = "https://printease.s3.us-east-1.amazonaws.com/blippi/images/17-abc.png";
        assert_eq!(
            object_key_from_url(url).unwrap(),
            "blippi/images/17-abc.png"
        );
    }

    #[test]
    fn test_object_key_from_url_missing_separator() {
        let result = object_key_from_url("https://example.com/blippi/images/17-abc.png");
        assert!(matches!(result, Err(StorageError::InvalidUrl(_))));
    }
}
