//! Suggestion prompt that proposes one dish for an open-ended request.

/// Render the dish suggestion prompt for the given utterance.
pub fn render_suggest_dish_prompt(utterance: &str) -> String {
    format!(
        r#"You are a friendly cooking assistant helping someone pick what to cook. Suggest exactly one specific dish that fits their request. A short sentence of encouragement is fine, but name only one dish and do not include a recipe.

User request: {utterance}"#,
        utterance = utterance
    )
}
