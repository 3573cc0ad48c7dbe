//! Followup prompt that answers a question about the recipe on the table.

/// Render the followup prompt with the stored dish and recipe for grounding.
pub fn render_followup_prompt(dish_name: &str, recipe_text: &str, utterance: &str) -> String {
    format!(
        r#"You are a cooking assistant. The user already received this recipe and now has a question about it.

Dish: {dish_name}

Recipe:
{recipe_text}

Question: {utterance}

Answer the question directly, grounded in the recipe above. Do not repeat the whole recipe back."#,
        dish_name = dish_name,
        recipe_text = recipe_text,
        utterance = utterance
    )
}
