use serde::{Deserialize, Serialize};

// ──────────────────────────── Health ────────────────────────────

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// RFC 3339 timestamp of the check.
    pub timestamp: String,
}

// ──────────────────────────── Upload ────────────────────────────

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub data: UploadData,
}

#[derive(Debug, Serialize)]
pub struct UploadData {
    /// Public URL of the stored object.
    pub url: String,
    /// Bucket key the object was stored under.
    pub key: String,
    /// Byte size of the uploaded file.
    pub size: u64,
    pub mime_type: String,
}

// ──────────────────────────── Delete ────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    #[serde(default, rename = "imageUrl")]
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

// ──────────────────────────── Pitch ────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EnhanceRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PitchResponse {
    pub message: String,
    /// Generated text from the upstream model; empty when the upstream
    /// response carried no candidate text.
    pub data: String,
}

/// Returned when the upstream generation call answers with a non-success
/// status: the content is accepted by default.
#[derive(Debug, Serialize)]
pub struct FallbackResponse {
    #[serde(rename = "isAppropriate")]
    pub is_appropriate: bool,
    pub error: String,
}

// ──────────────────────────── Errors ────────────────────────────

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_request_field_name() {
        let req: DeleteRequest =
            serde_json::from_str(r#"{"imageUrl": "https://b.s3.us-east-1.amazonaws.com/k"}"#)
                .unwrap();
        assert_eq!(
            req.image_url.as_deref(),
            Some("https://b.s3.us-east-1.amazonaws.com/k")
        );

        let empty: DeleteRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.image_url.is_none());
    }

    #[test]
    fn test_enhance_request_missing_fields() {
        let req: EnhanceRequest = serde_json::from_str(r#"{"title": "T"}"#).unwrap();
        assert_eq!(req.title.as_deref(), Some("T"));
        assert!(req.description.is_none());
    }

    #[test]
    fn test_fallback_response_field_name() {
        let json = serde_json::to_value(FallbackResponse {
            is_appropriate: true,
            error: "err".to_string(),
        })
        .unwrap();
        assert_eq!(json["isAppropriate"], true);
    }
}
