//! Conversation state carried across the turns of one chat session.

use serde::{Deserialize, Serialize};

/// Upper bound on entries in a recipe's ingredient summary.
pub const MAX_MAIN_INGREDIENTS: usize = 4;

/// A generated recipe and the ingredient summary derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub dish_name: String,
    /// Full recipe text exactly as the model returned it.
    pub full_text: String,
    /// Derived view of `full_text`, at most `MAX_MAIN_INGREDIENTS` entries.
    pub main_ingredients: Vec<String>,
}

/// One completed exchange: what the user said and what we replied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub utterance: String,
    pub reply: String,
}

/// Per-session conversation state.
///
/// Fields are private on purpose: turn handling mutates this only through
/// methods that keep the state coherent. A recipe is never stored without
/// its dish name, and nothing is written until the producing stage has
/// succeeded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationContext {
    dish_name: Option<String>,
    recipe: Option<Recipe>,
    history: Vec<Exchange>,
}

impl ConversationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dish_name(&self) -> Option<&str> {
        self.dish_name.as_deref()
    }

    pub fn recipe(&self) -> Option<&Recipe> {
        self.recipe.as_ref()
    }

    pub fn has_recipe(&self) -> bool {
        self.recipe.is_some()
    }

    pub fn history(&self) -> &[Exchange] {
        &self.history
    }

    /// Record the outcome of a successful dish-suggestion turn.
    ///
    /// A fresh suggestion starts a new dish thread, so any recipe stored for
    /// the previous dish is dropped; the name and recipe can never disagree.
    pub fn record_suggestion(&mut self, dish_name: impl Into<String>) {
        self.dish_name = Some(dish_name.into());
        self.recipe = None;
    }

    /// Record a successful recipe turn. The dish name and recipe are written
    /// together; there is no way to store one without the other.
    pub fn record_recipe(&mut self, recipe: Recipe) {
        self.dish_name = Some(recipe.dish_name.clone());
        self.recipe = Some(recipe);
    }

    /// Append a completed exchange to the history.
    pub fn record_exchange(&mut self, utterance: impl Into<String>, reply: impl Into<String>) {
        self.history.push(Exchange {
            utterance: utterance.into(),
            reply: reply.into(),
        });
    }
}
