//! Recipe prompt that produces the complete recipe for a named dish.

/// Render the full recipe prompt for a dish.
///
/// The original utterance rides along so constraints in the request
/// ("make it dairy-free") shape the recipe.
pub fn render_full_recipe_prompt(dish_name: &str, utterance: &str) -> String {
    format!(
        r#"Act as a cooking expert and provide a detailed recipe for {dish_name}.
The user asked: {utterance}

Include:
- Recipe name
- List of ingredients with quantities
- Step-by-step instructions
- Cooking time and difficulty level
- Tips for best results

Format the response in a clear, friendly way."#,
        dish_name = dish_name,
        utterance = utterance
    )
}
