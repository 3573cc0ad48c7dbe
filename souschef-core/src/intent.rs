//! Intent classification for a single user utterance.

use serde::{Deserialize, Serialize};

/// The classified purpose of one user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// The user wants ideas for what to cook.
    DishSuggestion,
    /// The user wants the full recipe for a dish.
    Recipe,
    /// The user is asking about the recipe already being discussed.
    Followup,
    /// Anything the assistant does not handle.
    Unsupported,
}

impl Intent {
    /// Map a raw router reply onto an intent.
    ///
    /// The router contract is a single bare category word. Matching is
    /// case-insensitive after trimming; anything else (empty reply, prose,
    /// several words, an unknown label) maps to `Unsupported` instead of
    /// failing the turn.
    pub fn from_router_reply(reply: &str) -> Self {
        let word = reply.trim();
        if word.split_whitespace().count() != 1 {
            return Intent::Unsupported;
        }
        if word.eq_ignore_ascii_case("dish_suggestion") {
            Intent::DishSuggestion
        } else if word.eq_ignore_ascii_case("recipe") {
            Intent::Recipe
        } else if word.eq_ignore_ascii_case("followup") {
            Intent::Followup
        } else {
            Intent::Unsupported
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::DishSuggestion => "dish_suggestion",
            Intent::Recipe => "recipe",
            Intent::Followup => "followup",
            Intent::Unsupported => "unsupported",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
