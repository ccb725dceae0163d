pub mod gemini;

use async_trait::async_trait;

/// Outcome of a generation request against the upstream model API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The upstream answered successfully. The text is empty when the
    /// response carried no candidate text at any level.
    Generated(String),
    /// The upstream answered with a non-success status; callers treat the
    /// content as accepted by default.
    Fallback,
}

/// Abstract text generation interface.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Run a single generation request for the given prompt. `Err` means
    /// the call itself failed (transport, invalid response body).
    async fn generate(&self, prompt: &str) -> anyhow::Result<GenerationOutcome>;
}
