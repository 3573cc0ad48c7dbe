//! Photo prompts for the image model.

/// Render the prompt for a single ingredient photo.
pub fn render_ingredient_photo_prompt(ingredient: &str) -> String {
    format!(
        "High-quality photo of fresh {ingredient} on a clean kitchen counter, food photography style",
        ingredient = ingredient
    )
}

/// Render the prompt for the plated final dish photo.
pub fn render_dish_photo_prompt(dish_name: &str) -> String {
    format!(
        "Professional food photography of {dish_name}, beautifully plated, restaurant style presentation",
        dish_name = dish_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingredient_prompt() {
        let prompt = render_ingredient_photo_prompt("basil");
        assert!(prompt.contains("fresh basil"));
        assert!(prompt.contains("kitchen counter"));
    }

    #[test]
    fn test_dish_prompt() {
        let prompt = render_dish_photo_prompt("Margherita Pizza");
        assert!(prompt.contains("Margherita Pizza"));
        assert!(prompt.contains("beautifully plated"));
    }
}
