//! Routing prompt that classifies a user message into one intent category.

/// Render the routing prompt for the given utterance.
///
/// `has_prior_recipe` tells the model whether "followup" is even plausible
/// for this session; without it, short messages like "what about the sauce?"
/// routinely misroute.
pub fn render_route_intent_prompt(utterance: &str, has_prior_recipe: bool) -> String {
    let context_line = if has_prior_recipe {
        "A recipe has already been shared earlier in this conversation."
    } else {
        "No recipe has been shared in this conversation yet."
    };

    format!(
        r#"You are the routing layer of a cooking assistant. Classify the user's message into exactly one category.

Categories:
- dish_suggestion: the user wants ideas for what to cook
- recipe: the user wants the full recipe for a dish
- followup: the user is asking about the recipe already being discussed

If none of the categories apply, reply with: unsupported

{context_line}

User message: {utterance}

Reply with exactly one category name, lowercase, and nothing else."#,
        context_line = context_line,
        utterance = utterance
    )
}
