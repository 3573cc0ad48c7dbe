//! Fake LLM provider for testing.
//!
//! This provider returns deterministic responses based on prompt matching,
//! allowing tests to run without network access or API costs.

use super::{LlmError, LlmProvider};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// A fake LLM provider for testing.
///
/// Responses are matched by checking if the prompt contains a registered
/// substring. Patterns should be chosen so that no prompt matches more than
/// one of them; every template has a distinctive phrase for exactly this.
/// If no match is found, returns a default response or error.
#[derive(Debug)]
pub struct FakeProvider {
    /// Map of prompt substring -> response
    responses: RwLock<HashMap<String, String>>,
    /// Default response if no match found
    default_response: Option<String>,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            default_response: Some("unsupported".to_string()),
        }
    }
}

#[allow(dead_code)]
impl FakeProvider {
    /// Create a new FakeProvider with no registered responses.
    pub fn new() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            default_response: None,
        }
    }

    /// Create a FakeProvider that returns a specific response for prompts
    /// containing a substring.
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        let mut provider = Self::new();
        provider.add_response(prompt_contains, response);
        provider
    }

    /// Add a response for prompts containing a specific substring.
    pub fn add_response(&mut self, prompt_contains: &str, response: &str) {
        self.responses
            .write()
            .unwrap()
            .insert(prompt_contains.to_string(), response.to_string());
    }

    /// Set the default response when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Create a FakeProvider with a complete set of responses for one
    /// suggestion-to-followup conversation about tikka masala.
    pub fn with_kitchen_responses() -> Self {
        let mut provider = Self::new();

        // Router replies "dish_suggestion" unless a later pattern overrides.
        provider.add_response("routing layer", "dish_suggestion");

        provider.add_response(
            "pick what to cook",
            "You can't go wrong with Chicken Tikka Masala on a cold evening.",
        );

        provider.add_response("bare dish name", "Chicken Tikka Masala");

        provider.add_response(
            "cooking expert",
            "Chicken Tikka Masala\n\nIngredients:\n- 500g chicken thighs\n- 200g yogurt\n- 2 tomatoes\n- 1 onion\n\nSteps:\n1. Marinate the chicken.\n2. Simmer the sauce.\n3. Combine and serve.",
        );

        provider.add_response(
            "only the main ingredients",
            "chicken\nyogurt\ntomatoes\nonion",
        );

        provider.add_response(
            "already received this recipe",
            "Coconut cream works as a one-to-one swap for the yogurt.",
        );

        provider
    }
}

#[async_trait]
impl LlmProvider for FakeProvider {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let responses = self.responses.read().unwrap();

        // Find first matching pattern (case-insensitive)
        let prompt_lower = prompt.to_lowercase();
        for (pattern, response) in responses.iter() {
            if prompt_lower.contains(&pattern.to_lowercase()) {
                return Ok(response.clone());
            }
        }

        // Return default or error
        match &self.default_response {
            Some(response) => Ok(response.clone()),
            None => Err(LlmError::RequestFailed(format!(
                "FakeProvider: No response configured for prompt (first 100 chars): {}",
                prompt.chars().take(100).collect::<String>()
            ))),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_provider_matching() {
        let provider = FakeProvider::with_response("hello", "world");
        let result = provider.complete("Say hello to the user").await.unwrap();
        assert_eq!(result, "world");
    }

    #[tokio::test]
    async fn test_fake_provider_case_insensitive() {
        let provider = FakeProvider::with_response("HELLO", "world");
        let result = provider.complete("hello there").await.unwrap();
        assert_eq!(result, "world");
    }

    #[tokio::test]
    async fn test_fake_provider_no_match() {
        let provider = FakeProvider::new();
        let result = provider.complete("random prompt").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fake_provider_default_response() {
        let provider = FakeProvider::new().with_default_response("default");
        let result = provider.complete("random prompt").await.unwrap();
        assert_eq!(result, "default");
    }

    #[tokio::test]
    async fn test_kitchen_responses() {
        let provider = FakeProvider::with_kitchen_responses();

        let result = provider
            .complete("You are the routing layer of a cooking assistant.")
            .await
            .unwrap();
        assert_eq!(result, "dish_suggestion");

        let result = provider
            .complete("Reply with the bare dish name only")
            .await
            .unwrap();
        assert_eq!(result, "Chicken Tikka Masala");
    }
}
