use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

use super::{Storage, StorageError, UploadMetadata};

/// Local filesystem storage backend, used in development and tests.
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(storage_path: &str) -> Self {
        let base_path = PathBuf::from(storage_path);
        // Ensure directory exists (best-effort at construction time).
        std::fs::create_dir_all(&base_path).ok();
        Self { base_path }
    }

    fn resolve_path(&self, key: &str) -> PathBuf {
        self.base_path.join(key)
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload_bytes(
        &self,
        data: &[u8],
        key: &str,
        _content_type: Option<&str>,
        _metadata: &UploadMetadata,
    ) -> Result<String, StorageError> {
        let path = self.resolve_path(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, data).await?;
        Ok(format!("file://{}", path.display()))
    }

    async fn delete_object(&self, key: &str) -> Result<(), StorageError> {
        let path = self.resolve_path(key);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn provider_name(&self) -> &str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn metadata() -> UploadMetadata {
        UploadMetadata {
            field_name: "image".to_string(),
            original_name: "photo.png".to_string(),
            uploaded_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_local_upload_returns_file_url() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().to_str().unwrap());

        let url = storage
            .upload_bytes(b"pixels", "blippi/images/1-abc.png", Some("image/png"), &metadata())
            .await
            .unwrap();
        assert!(url.starts_with("file://"));
        assert!(url.ends_with("blippi/images/1-abc.png"));

        let stored = fs::read(dir.path().join("blippi/images/1-abc.png"))
            .await
            .unwrap();
        assert_eq!(stored, b"pixels");
    }

    #[tokio::test]
    async fn test_local_delete() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().to_str().unwrap());

        storage
            .upload_bytes(b"data", "del.png", None, &metadata())
            .await
            .unwrap();
        storage.delete_object("del.png").await.unwrap();
        assert!(!dir.path().join("del.png").exists());
    }

    #[tokio::test]
    async fn test_local_delete_missing_key_is_ok() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().to_str().unwrap());

        storage.delete_object("nonexistent.png").await.unwrap();
    }
}
