//! Mock provider implementation for testing.

use super::{FinishReason, ImagePart, ProviderError, ProviderResponse, VisionProvider};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// What the mock answers with.
#[derive(Debug, Clone)]
enum MockOutcome {
    Text(String),
    Fail(String),
}

/// A request the mock received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub instruction: String,
    pub image: ImagePart,
}

/// Mock vision provider that records every call.
pub struct MockVisionProvider {
    outcome: MockOutcome,
    calls: AtomicUsize,
    last_request: Mutex<Option<RecordedRequest>>,
}

impl MockVisionProvider {
    /// Always answers with `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new(MockOutcome::Text(text.into()))
    }

    /// Always fails with an API error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(MockOutcome::Fail(message.into()))
    }

    fn new(outcome: MockOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Number of `generate` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.last_request.lock().ok().and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl VisionProvider for MockVisionProvider {
    async fn generate(
        &self,
        instruction: &str,
        image: &ImagePart,
    ) -> Result<ProviderResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.last_request.lock() {
            *guard = Some(RecordedRequest {
                instruction: instruction.to_string(),
                image: image.clone(),
            });
        }

        match &self.outcome {
            MockOutcome::Text(text) => Ok(ProviderResponse {
                text: text.clone(),
                input_tokens: instruction.len() as i32 / 4,
                output_tokens: text.len() as i32 / 4,
                finish_reason: FinishReason::Complete,
            }),
            MockOutcome::Fail(message) => Err(ProviderError::ApiError(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png() -> ImagePart {
        ImagePart {
            mime_type: "image/png".to_string(),
            data: vec![0x89, b'P', b'N', b'G'],
        }
    }

    #[tokio::test]
    async fn text_mock_answers_and_records() {
        let mock = MockVisionProvider::with_text("A red bicycle.");
        let response = mock.generate("describe", &png()).await.unwrap();

        assert_eq!(response.text, "A red bicycle.");
        assert_eq!(mock.call_count(), 1);
        let recorded = mock.last_request().unwrap();
        assert_eq!(recorded.instruction, "describe");
        assert_eq!(recorded.image, png());
    }

    #[tokio::test]
    async fn failing_mock_returns_api_error() {
        let mock = MockVisionProvider::failing("quota exceeded");
        let err = mock.generate("describe", &png()).await.unwrap_err();

        assert_eq!(err.to_string(), "API error: quota exceeded");
        assert_eq!(mock.call_count(), 1);
    }
}
