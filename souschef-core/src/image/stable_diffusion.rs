//! Stable Diffusion provider via the Hugging Face inference API.

use super::{ImageModel, ImageModelError};
use crate::config::ImageGenConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Hugging Face inference API provider.
///
/// A successful response is the raw image bytes; errors come back as JSON.
#[derive(Debug)]
pub struct StableDiffusionProvider {
    config: ImageGenConfig,
    client: reqwest::Client,
}

impl StableDiffusionProvider {
    /// Create a new StableDiffusionProvider from configuration.
    pub fn new(config: ImageGenConfig) -> Result<Self, ImageModelError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ImageModelError::RequestFailed(e.to_string()))?;
        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

/// Inference API request format.
#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

/// Error body returned by the inference API. `estimated_time` is only
/// present on cold-start 503s.
#[derive(Debug, Deserialize)]
struct InferenceError {
    error: String,
    #[serde(default)]
    estimated_time: Option<f32>,
}

#[async_trait]
impl ImageModel for StableDiffusionProvider {
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, ImageModelError> {
        let request = InferenceRequest { inputs: prompt };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ImageModelError::Timeout {
                        seconds: self.config.timeout_secs,
                    }
                } else {
                    ImageModelError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(ImageModelError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if status != 200 {
            let body = response
                .text()
                .await
                .map_err(|e| ImageModelError::RequestFailed(e.to_string()))?;
            if let Ok(parsed) = serde_json::from_str::<InferenceError>(&body) {
                if status == 503 && parsed.estimated_time.is_some() {
                    return Err(ImageModelError::ModelLoading {
                        estimated_secs: parsed.estimated_time,
                    });
                }
                return Err(ImageModelError::ApiError {
                    status,
                    message: parsed.error,
                });
            }
            return Err(ImageModelError::ApiError {
                status,
                message: body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ImageModelError::RequestFailed(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    fn provider_name(&self) -> &'static str {
        "stable-diffusion"
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
