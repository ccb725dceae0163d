use async_trait::async_trait;
use aws_sdk_s3::Client;
use tracing::{error, info};

use super::{Storage, StorageError, UploadMetadata};

/// AWS S3 storage backend.
pub struct S3Storage {
    client: Client,
    bucket: String,
    region: String,
}

impl S3Storage {
    pub fn new(aws_access_key: &str, aws_secret_key: &str, region: &str, bucket: &str) -> Self {
        let creds = aws_sdk_s3::config::Credentials::new(
            aws_access_key,
            aws_secret_key,
            None,
            None,
            "blippi-api",
        );

        let config = aws_sdk_s3::config::Builder::new()
            .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
            .region(aws_sdk_s3::config::Region::new(region.to_string()))
            .credentials_provider(creds)
            .build();

        Self {
            client: Client::from_conf(config),
            bucket: bucket.to_string(),
            region: region.to_string(),
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.bucket, self.region, key
        )
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn upload_bytes(
        &self,
        data: &[u8],
        key: &str,
        content_type: Option<&str>,
        metadata: &UploadMetadata,
    ) -> Result<String, StorageError> {
        let body = aws_sdk_s3::primitives::ByteStream::from(data.to_vec());
        let mut req = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .metadata("field-name", metadata.field_name.as_str())
            .metadata("original-name", metadata.original_name.as_str())
            .metadata("uploaded-at", metadata.uploaded_at.as_str());

        if let Some(ct) = content_type {
            req = req.content_type(ct);
        }

        req.send().await.map_err(|e| {
            error!("S3 upload error: {e}");
            StorageError::S3(format!("{e}"))
        })?;

        Ok(self.public_url(key))
    }

    async fn delete_object(&self, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                error!("S3 delete error: {e}");
                StorageError::S3(format!("{e}"))
            })?;
        info!("Deleted {key} from bucket {}", self.bucket);
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "aws-s3"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url_shape() {
        let storage = S3Storage::new("ak", "sk", "us-east-1", "printease");
        assert_eq!(
            storage.public_url("blippi/images/17-abc.png"),
            "https://printease.s3.us-east-1.amazonaws.com/blippi/images/17-abc.png"
        );
    }
}
