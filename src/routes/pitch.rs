use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use std::sync::Arc;

use crate::app::AppState;
use crate::error::ApiError;
use crate::generation::{GenerationOutcome, TextGenerator};
use crate::models::api::{EnhanceRequest, FallbackResponse, PitchResponse, SummarizeRequest};

/// Content generation routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/enhanceContent", post(enhance_content))
        .route("/summarize", post(summarize))
}

fn pitch_prompt(title: &str, description: &str) -> String {
    format!(
        "You are an expert startup consultant and professional crowdfunding copywriter. \
         Based on the following project details:\n\
         Title: {title}\n\
         Description: {description}\n\n\
         Your tasks:\n\
         1. Write a highly engaging, persuasive, and professional crowdfunding pitch.\n\
         2. Compelling headline: a short, attention-grabbing title.\n\
         3. Introduction: start with an emotional hook that resonates with the audience.\n\
         4. The problem: clearly describe the pain point or challenge people face.\n\
         5. The solution: explain how this project solves that problem in a unique and \
         innovative way.\n\
         6. Impact: show how this will change lives or create positive impact.\n\
         7. Why support us: explain why backers should believe in this project and what \
         makes it special (unique value proposition).\n\
         8. Call to action: end with a strong, inspiring message encouraging contributions.\n\
         9. If any currency is included give it in ETH.\n\n\
         Make the tone passionate, trustworthy, and optimistic.\n\
         Keep the total length between 300-500 words for maximum storytelling impact.\n\
         Use clear, simple language with a mix of emotional appeal and logical reasoning.\n\
         Return only the final crowdfunding pitch in well-formatted paragraphs with \
         headings. Do not include any instructions or extra notes."
    )
}

fn summary_prompt(content: &str) -> String {
    format!(
        "Summarize the following project content in a concise, reader-friendly \
         paragraph. Return only the summary.\n\n{content}"
    )
}

fn generator(state: &AppState) -> Result<&Arc<dyn TextGenerator>, ApiError> {
    state
        .generator
        .as_ref()
        .ok_or(ApiError::GenerationNotConfigured)
}

fn fallback_response() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(FallbackResponse {
            is_appropriate: true,
            error: "Content moderation service encountered an error. Your content has been accepted."
                .to_string(),
        }),
    )
        .into_response()
}

/// POST /enhanceContent - Generate a crowdfunding pitch from a title and
/// description.
async fn enhance_content(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EnhanceRequest>,
) -> Result<Response, ApiError> {
    let generator = generator(&state)?;

    let title = req.title.as_deref().filter(|s| !s.is_empty());
    let description = req.description.as_deref().filter(|s| !s.is_empty());
    let (title, description) = match (title, description) {
        (Some(t), Some(d)) => (t, d),
        _ => return Err(ApiError::MissingPitchFields),
    };

    let prompt = pitch_prompt(title, description);
    match generator.generate(&prompt).await? {
        GenerationOutcome::Generated(text) => Ok(Json(PitchResponse {
            message: "Content enhanced successfully".to_string(),
            data: text,
        })
        .into_response()),
        GenerationOutcome::Fallback => Ok(fallback_response()),
    }
}

/// POST /summarize - Summarize user-supplied project content.
async fn summarize(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SummarizeRequest>,
) -> Result<Response, ApiError> {
    let generator = generator(&state)?;

    let content = req
        .content
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or(ApiError::MissingContent)?;

    let prompt = summary_prompt(content);
    match generator.generate(&prompt).await? {
        GenerationOutcome::Generated(text) => Ok(Json(PitchResponse {
            message: "Content summarized successfully".to_string(),
            data: text,
        })
        .into_response()),
        GenerationOutcome::Fallback => Ok(fallback_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_prompt_embeds_fields() {
        let prompt = pitch_prompt("Solar Backpack", "A backpack that charges your phone");
        assert!(prompt.contains("Title: Solar Backpack"));
        assert!(prompt.contains("Description: A backpack that charges your phone"));
        assert!(prompt.contains("crowdfunding pitch"));
    }

    #[test]
    fn test_summary_prompt_embeds_content() {
        let prompt = summary_prompt("A long project story.");
        assert!(prompt.contains("A long project story."));
        assert!(prompt.starts_with("Summarize"));
    }
}
