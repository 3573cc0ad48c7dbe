//! The model-backed stages behind each intent path.
//!
//! Each stage renders one template, makes one model call, and post-processes
//! the reply into its typed output. Stages never touch conversation state;
//! `handle_turn` owns when results are committed.

use crate::context::MAX_MAIN_INGREDIENTS;
use crate::llm::{LlmError, LlmProvider};
use crate::prompts;

/// Ask for one dish recommendation in conversational prose.
pub async fn suggest_dish(llm: &dyn LlmProvider, utterance: &str) -> Result<String, LlmError> {
    let prompt = prompts::render_suggest_dish_prompt(utterance);
    let reply = llm.complete(&prompt).await?;
    let reply = reply.trim();
    if reply.is_empty() {
        return Err(LlmError::ParseError("empty suggestion reply".to_string()));
    }
    Ok(reply.to_string())
}

/// Reduce a conversational suggestion to the bare dish name.
pub async fn extract_dish_name(
    llm: &dyn LlmProvider,
    raw_suggestion: &str,
) -> Result<String, LlmError> {
    let prompt = prompts::render_extract_dish_name_prompt(raw_suggestion);
    let reply = llm.complete(&prompt).await?;
    let name = normalize_dish_name(&reply);
    if name.is_empty() {
        return Err(LlmError::ParseError(
            "dish name extraction returned nothing usable".to_string(),
        ));
    }
    Ok(name)
}

/// Generate the full recipe text for a dish.
pub async fn full_recipe(
    llm: &dyn LlmProvider,
    dish_name: &str,
    utterance: &str,
) -> Result<String, LlmError> {
    let prompt = prompts::render_full_recipe_prompt(dish_name, utterance);
    let reply = llm.complete(&prompt).await?;
    let reply = reply.trim();
    if reply.is_empty() {
        return Err(LlmError::ParseError("empty recipe reply".to_string()));
    }
    Ok(reply.to_string())
}

/// Summarize a recipe to at most `MAX_MAIN_INGREDIENTS` ingredients.
///
/// An empty list is legal; the image step simply has less to draw.
pub async fn extract_ingredients(
    llm: &dyn LlmProvider,
    recipe_text: &str,
) -> Result<Vec<String>, LlmError> {
    let prompt = prompts::render_extract_ingredients_prompt(recipe_text);
    let reply = llm.complete(&prompt).await?;
    Ok(parse_ingredient_lines(&reply))
}

/// Answer a question about the stored recipe.
pub async fn answer_followup(
    llm: &dyn LlmProvider,
    dish_name: &str,
    recipe_text: &str,
    utterance: &str,
) -> Result<String, LlmError> {
    let prompt = prompts::render_followup_prompt(dish_name, recipe_text, utterance);
    let reply = llm.complete(&prompt).await?;
    let reply = reply.trim();
    if reply.is_empty() {
        return Err(LlmError::ParseError("empty followup reply".to_string()));
    }
    Ok(reply.to_string())
}

/// Strip the quotes and trailing punctuation models tend to wrap names in.
/// Runs until stable so mixed wrapping like `"Pad Thai".` comes out clean.
fn normalize_dish_name(reply: &str) -> String {
    let mut name = reply.trim();
    loop {
        let stripped = name
            .trim_matches(|c| c == '"' || c == '\'')
            .trim_end_matches('.')
            .trim();
        if stripped == name {
            break;
        }
        name = stripped;
    }
    name.to_string()
}

/// Split a model reply into ingredient entries: one per line, list markers
/// stripped, blank lines dropped, capped at `MAX_MAIN_INGREDIENTS`.
fn parse_ingredient_lines(reply: &str) -> Vec<String> {
    reply
        .lines()
        .map(strip_list_marker)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .take(MAX_MAIN_INGREDIENTS)
        .collect()
}

/// Remove a leading "- ", "* ", "1. " or "1) " marker from a line.
fn strip_list_marker(line: &str) -> &str {
    let trimmed = line.trim();
    if let Some(rest) = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
    {
        return rest.trim();
    }
    let digits = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &trimmed[digits..];
        if let Some(rest) = rest.strip_prefix(". ").or_else(|| rest.strip_prefix(") ")) {
            return rest.trim();
        }
    }
    trimmed
}
