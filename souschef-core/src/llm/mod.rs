//! LLM provider abstraction for the conversation pipeline.
//!
//! This module provides a trait-based abstraction over chat model providers
//! with support for caching and testing. Everything nondeterministic in the
//! pipeline goes through [`LlmProvider`], so routing and stage logic can be
//! exercised against a deterministic fake.

mod caching;
mod fake;
mod gemini;

pub use caching::CachingProvider;
pub use fake::FakeProvider;
pub use gemini::GeminiProvider;

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use crate::config::LlmConfig;

/// Error type for LLM operations.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Request timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Cache error: {0}")]
    CacheError(String),
}

/// Trait for LLM providers.
///
/// Implementations should be stateless and thread-safe. The provider is
/// responsible for making the API call and returning the model's text reply.
#[async_trait]
pub trait LlmProvider: Send + Sync + fmt::Debug {
    /// Send a prompt to the model and get a text response.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// Get the provider name (e.g., "gemini", "fake").
    fn provider_name(&self) -> &'static str;

    /// Get the model name (e.g., "gemini-1.5-flash").
    fn model_name(&self) -> &str;
}

/// Registry of available providers.
///
/// Use environment variables to configure:
/// - SOUSCHEF_LLM_PROVIDER: "gemini" | "fake" (default: "gemini")
/// - GEMINI_API_KEY: API key for Gemini
/// - SOUSCHEF_LLM_MODEL: Model name
/// - SOUSCHEF_LLM_CACHE_DIR: when set, wraps the provider in a disk cache
pub fn create_provider_from_env() -> Result<Box<dyn LlmProvider>, LlmError> {
    let provider = std::env::var("SOUSCHEF_LLM_PROVIDER").unwrap_or_else(|_| "gemini".to_string());

    let inner: Box<dyn LlmProvider> = match provider.as_str() {
        "fake" => Box::new(FakeProvider::default()),
        "gemini" => {
            let config = LlmConfig::from_env()
                .map_err(|e| LlmError::NotConfigured(e.to_string()))?;
            Box::new(GeminiProvider::new(config)?)
        }
        other => {
            return Err(LlmError::NotConfigured(format!(
                "Unknown provider: {}",
                other
            )))
        }
    };

    match std::env::var("SOUSCHEF_LLM_CACHE_DIR") {
        Ok(dir) => Ok(Box::new(CachingProvider::new(
            inner,
            std::path::PathBuf::from(dir),
        ))),
        Err(_) => Ok(inner),
    }
}
