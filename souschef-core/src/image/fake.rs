//! Fake image model for testing.

use super::{ImageModel, ImageModelError};
use async_trait::async_trait;

/// The 8-byte PNG signature; enough for format detection.
const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

#[derive(Debug, Clone)]
enum FakeOutcome {
    Bytes(Vec<u8>),
    Failure(String),
}

/// A fake image model for testing.
///
/// By default every prompt succeeds with a minimal PNG. Specific prompts
/// can be overridden by substring to fail or to return chosen bytes, which
/// is how partial-failure batches are staged in tests. Patterns are checked
/// in registration order, first match wins.
#[derive(Debug, Default)]
pub struct FakeImageModel {
    outcomes: Vec<(String, FakeOutcome)>,
}

impl FakeImageModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the given bytes for prompts containing the substring.
    pub fn with_bytes(mut self, prompt_contains: &str, bytes: Vec<u8>) -> Self {
        self.outcomes
            .push((prompt_contains.to_lowercase(), FakeOutcome::Bytes(bytes)));
        self
    }

    /// Fail prompts containing the substring.
    pub fn with_failure(mut self, prompt_contains: &str, reason: &str) -> Self {
        self.outcomes.push((
            prompt_contains.to_lowercase(),
            FakeOutcome::Failure(reason.to_string()),
        ));
        self
    }

    /// The bytes every unmatched prompt returns.
    pub fn stock_png() -> Vec<u8> {
        PNG_SIGNATURE.to_vec()
    }
}

#[async_trait]
impl ImageModel for FakeImageModel {
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, ImageModelError> {
        let prompt_lower = prompt.to_lowercase();
        for (pattern, outcome) in &self.outcomes {
            if prompt_lower.contains(pattern) {
                return match outcome {
                    FakeOutcome::Bytes(bytes) => Ok(bytes.clone()),
                    FakeOutcome::Failure(reason) => {
                        Err(ImageModelError::RequestFailed(reason.clone()))
                    }
                };
            }
        }
        Ok(Self::stock_png())
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-image-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_always_succeeds() {
        let model = FakeImageModel::new();
        let bytes = model.generate("anything at all").await.unwrap();
        assert_eq!(bytes, FakeImageModel::stock_png());
    }

    #[tokio::test]
    async fn test_matched_failure() {
        let model = FakeImageModel::new().with_failure("garlic", "boom");
        let result = model.generate("photo of fresh garlic").await;
        assert!(matches!(result, Err(ImageModelError::RequestFailed(_))));
    }

    #[tokio::test]
    async fn test_matched_bytes() {
        let model = FakeImageModel::new().with_bytes("basil", b"junk".to_vec());
        let bytes = model.generate("photo of fresh basil").await.unwrap();
        assert_eq!(bytes, b"junk");
    }
}
