//! Extraction prompt that summarizes a recipe down to its main ingredients.

use crate::context::MAX_MAIN_INGREDIENTS;

/// Render the ingredient extraction prompt for a recipe text.
pub fn render_extract_ingredients_prompt(recipe_text: &str) -> String {
    format!(
        r#"Extract only the main ingredients from this recipe. Reply with at most {max} ingredients, one per line, with no numbering and no quantities.

Recipe:
{recipe_text}"#,
        max = MAX_MAIN_INGREDIENTS,
        recipe_text = recipe_text
    )
}
