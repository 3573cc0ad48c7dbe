//! Intent routing: one model call, one defensive parse.

use crate::intent::Intent;
use crate::llm::{LlmError, LlmProvider};
use crate::prompts;

/// Classify one utterance.
///
/// The model reply is parsed strictly: only a bare known category word maps
/// to a real intent, everything else becomes `Unsupported`. Transport and API
/// failures propagate as errors; the caller must not downgrade them to a
/// guessed intent.
pub async fn classify(
    llm: &dyn LlmProvider,
    utterance: &str,
    has_prior_recipe: bool,
) -> Result<Intent, LlmError> {
    let prompt = prompts::render_route_intent_prompt(utterance, has_prior_recipe);
    let reply = llm.complete(&prompt).await?;
    let intent = Intent::from_router_reply(&reply);

    tracing::debug!(intent = %intent, raw_reply = %reply.trim(), "routed utterance");

    Ok(intent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::FakeProvider;

    #[tokio::test]
    async fn test_classify_known_label() {
        let llm = FakeProvider::with_response("routing layer", "recipe");
        let intent = classify(&llm, "how do I make pad thai?", false).await.unwrap();
        assert_eq!(intent, Intent::Recipe);
    }

    #[tokio::test]
    async fn test_classify_prose_reply_is_unsupported() {
        let llm = FakeProvider::with_response("routing layer", "I think this is a recipe request");
        let intent = classify(&llm, "how do I make pad thai?", false).await.unwrap();
        assert_eq!(intent, Intent::Unsupported);
    }

    #[tokio::test]
    async fn test_classify_model_failure_propagates() {
        let llm = FakeProvider::new();
        let result = classify(&llm, "how do I make pad thai?", false).await;
        assert!(result.is_err());
    }
}
