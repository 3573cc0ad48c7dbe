//! Core conversation and image pipeline for the souschef recipe assistant.
//!
//! The flow is: classify an utterance into an intent, run that intent's
//! model-backed stages in order, commit the results to per-session
//! [`ConversationContext`], and (for recipes) render ingredient and dish
//! photos through an [`image::ImageModel`]. All model access goes through
//! the [`llm::LlmProvider`] and [`image::ImageModel`] traits so everything
//! above them is testable with fakes.

pub mod chat;
pub mod config;
pub mod context;
pub mod error;
pub mod image;
pub mod intent;
pub mod llm;
pub mod prompts;

pub use chat::{handle_turn, TurnOutcome, TurnRequest, UNSUPPORTED_GUIDANCE};
pub use context::{ConversationContext, Exchange, Recipe, MAX_MAIN_INGREDIENTS};
pub use error::ChatError;
pub use intent::Intent;
