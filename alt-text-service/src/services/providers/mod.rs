//! Vision provider abstraction.
//!
//! The endpoint only depends on [`VisionProvider`], so the hosted model can be
//! swapped for a test double or another backend.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Model returned no text")]
    EmptyResponse,

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// An image handed to the model alongside the instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePart {
    /// Declared MIME type of the upload.
    pub mime_type: String,

    /// Raw, unencoded bytes.
    pub data: Vec<u8>,
}

/// Result of a provider call.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    /// Generated description.
    pub text: String,

    /// Input tokens consumed.
    pub input_tokens: i32,

    /// Output tokens generated.
    pub output_tokens: i32,

    /// Finish reason.
    pub finish_reason: FinishReason,
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
    Other,
}

/// Image-plus-instruction text generation (e.g., Gemini).
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Generate text for `instruction` applied to `image`.
    async fn generate(
        &self,
        instruction: &str,
        image: &ImagePart,
    ) -> Result<ProviderResponse, ProviderError>;
}
