//! Extraction prompt that pulls a bare dish name out of free-form prose.
//!
//! The suggestion stage returns conversational text ("Sure! How about...").
//! Context and image prompts need the clean name, so extraction is its own
//! model call rather than a regex over prose.

/// Render the dish name extraction prompt for a suggestion reply.
pub fn render_extract_dish_name_prompt(raw_suggestion: &str) -> String {
    format!(
        r#"The message below recommends a dish. Reply with the bare dish name only - no punctuation, no commentary, nothing else.

Message:
{raw_suggestion}"#,
        raw_suggestion = raw_suggestion
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_prompt() {
        let prompt =
            render_extract_dish_name_prompt("Sure! Chicken Vindaloo would hit the spot tonight.");

        assert!(prompt.contains("Chicken Vindaloo would hit the spot"));
        assert!(prompt.contains("bare dish name only"));
    }
}
