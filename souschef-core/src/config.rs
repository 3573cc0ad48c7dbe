//! Provider configuration from environment variables.

use std::env;
use thiserror::Error;

/// Default Gemini API base URL.
pub const DEFAULT_LLM_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default chat model.
pub const DEFAULT_LLM_MODEL: &str = "gemini-1.5-flash";

/// Default per-request timeout for chat completions, in seconds.
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;

/// Default Hugging Face inference base URL.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://api-inference.huggingface.co/models";

/// Default image model.
pub const DEFAULT_IMAGE_MODEL: &str = "sd-legacy/stable-diffusion-v1-5";

/// Default per-request timeout for image generation, in seconds.
/// Diffusion calls are much slower than chat completions.
pub const DEFAULT_IMAGE_TIMEOUT_SECS: u64 = 120;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
}

/// Chat model client configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// API key for the Gemini API.
    pub api_key: String,
    /// Model name (e.g., "gemini-1.5-flash").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `GEMINI_API_KEY`: API key for the Gemini API
    ///
    /// Optional:
    /// - `SOUSCHEF_LLM_MODEL`: Model name (default: "gemini-1.5-flash")
    /// - `SOUSCHEF_LLM_BASE_URL`: API base URL
    /// - `SOUSCHEF_LLM_TIMEOUT_SECS`: Request timeout (default: 60)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("GEMINI_API_KEY".to_string()))?;

        let model =
            env::var("SOUSCHEF_LLM_MODEL").unwrap_or_else(|_| DEFAULT_LLM_MODEL.to_string());

        let base_url =
            env::var("SOUSCHEF_LLM_BASE_URL").unwrap_or_else(|_| DEFAULT_LLM_BASE_URL.to_string());

        let timeout_secs = env::var("SOUSCHEF_LLM_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_LLM_TIMEOUT_SECS);

        Ok(Self {
            api_key,
            model,
            base_url,
            timeout_secs,
        })
    }
}

/// Image model client configuration.
#[derive(Debug, Clone)]
pub struct ImageGenConfig {
    /// Bearer token for the Hugging Face inference API.
    pub api_token: String,
    /// Model name (e.g., "sd-legacy/stable-diffusion-v1-5").
    pub model: String,
    /// Base URL for the inference API.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl ImageGenConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `HF_API_TOKEN`: Hugging Face inference API token
    ///
    /// Optional:
    /// - `SOUSCHEF_IMAGE_MODEL`: Model name (default: "sd-legacy/stable-diffusion-v1-5")
    /// - `SOUSCHEF_IMAGE_BASE_URL`: API base URL
    /// - `SOUSCHEF_IMAGE_TIMEOUT_SECS`: Request timeout (default: 120)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_token = env::var("HF_API_TOKEN")
            .map_err(|_| ConfigError::MissingEnvVar("HF_API_TOKEN".to_string()))?;

        let model =
            env::var("SOUSCHEF_IMAGE_MODEL").unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string());

        let base_url = env::var("SOUSCHEF_IMAGE_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_IMAGE_BASE_URL.to_string());

        let timeout_secs = env::var("SOUSCHEF_IMAGE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_IMAGE_TIMEOUT_SECS);

        Ok(Self {
            api_token,
            model,
            base_url,
            timeout_secs,
        })
    }
}
