use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::error;

use super::{GenerationOutcome, TextGenerator};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini text generation via the generative-language REST API.
pub struct GeminiGenerator {
    endpoint: String,
    api_key: String,
    http_client: reqwest::Client,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiGenerator {
    pub fn new(model: &str, api_key: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: format!("{API_BASE}/{model}:generateContent"),
            api_key: api_key.to_string(),
            http_client,
        })
    }

    /// First candidate's text, defaulting to empty at any missing level.
    fn extract_text(response: &GenerateResponse) -> String {
        response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.as_ref())
            .and_then(|p| p.first())
            .and_then(|p| p.text.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> anyhow::Result<GenerationOutcome> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let resp = self
            .http_client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        if !resp.status().is_success() {
            error!("Generation API error: {}", resp.status());
            return Ok(GenerationOutcome::Fallback);
        }

        let response: GenerateResponse = resp.json().await?;
        Ok(GenerationOutcome::Generated(Self::extract_text(&response)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_serialization() {
        let req = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "Write a pitch".to_string(),
                }],
            }],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "Write a pitch");
    }

    #[test]
    fn test_extract_text_from_full_response() {
        let json = r#"{
            "candidates": [
                {
                    "content": {
                        "parts": [
                            {"text": "A compelling pitch."}
                        ]
                    }
                }
            ]
        }"#;
        let resp: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(GeminiGenerator::extract_text(&resp), "A compelling pitch.");
    }

    #[test]
    fn test_extract_text_from_empty_response() {
        let resp: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(GeminiGenerator::extract_text(&resp), "");
    }

    #[test]
    fn test_extract_text_missing_parts() {
        let resp: GenerateResponse =
            serde_json::from_str(r#"{"candidates": [{"content": {}}]}"#).unwrap();
        assert_eq!(GeminiGenerator::extract_text(&resp), "");
    }

    #[test]
    fn test_extract_text_empty_candidates() {
        let resp: GenerateResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert_eq!(GeminiGenerator::extract_text(&resp), "");
    }

    #[test]
    fn test_extract_text_part_without_text() {
        let resp: GenerateResponse =
            serde_json::from_str(r#"{"candidates": [{"content": {"parts": [{}]}}]}"#).unwrap();
        assert_eq!(GeminiGenerator::extract_text(&resp), "");
    }
}
