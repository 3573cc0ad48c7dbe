//! Image model abstraction, validation, and batch rendering.
//!
//! The [`ImageModel`] trait mirrors [`crate::llm::LlmProvider`] for the
//! image side: one prompt in, raw bytes out. Validation happens in the
//! batch renderer so every model's output passes the same checks.

mod fake;
mod render;
mod stable_diffusion;

pub use fake::FakeImageModel;
pub use render::{is_partial_failure, render_all, ImageRequest, ImageResult, ImageStyle};
pub use stable_diffusion::StableDiffusionProvider;

use async_trait::async_trait;
use std::fmt;
use std::io::Cursor;
use thiserror::Error;

use crate::config::ImageGenConfig;
use image::{ImageFormat, ImageReader};

/// Allowed formats for generated images.
pub const ALLOWED_FORMATS: &[ImageFormat] =
    &[ImageFormat::Jpeg, ImageFormat::Png, ImageFormat::WebP];

/// Maximum size for a generated image (10MB).
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Error type for image model operations.
#[derive(Debug, Error)]
pub enum ImageModelError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Request timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Model is still loading, estimated {estimated_secs:?} seconds")]
    ModelLoading { estimated_secs: Option<f32> },

    #[error("Model returned unusable image data: {0}")]
    InvalidImage(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// A validated generated image with its detected content type.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    /// The raw image bytes.
    pub data: Vec<u8>,
    /// The detected content type (e.g., "image/png").
    pub content_type: String,
}

impl GeneratedImage {
    /// File extension matching the detected content type.
    pub fn extension(&self) -> &'static str {
        match self.content_type.as_str() {
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            _ => "png",
        }
    }
}

/// Trait for image generation models.
///
/// Implementations should be stateless and thread-safe. The returned bytes
/// are unvalidated; the renderer checks them before treating the request
/// as a success.
#[async_trait]
pub trait ImageModel: Send + Sync + fmt::Debug {
    /// Render one image from a text prompt.
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, ImageModelError>;

    /// Get the provider name (e.g., "stable-diffusion", "fake").
    fn provider_name(&self) -> &'static str;

    /// Get the model name (e.g., "sd-legacy/stable-diffusion-v1-5").
    fn model_name(&self) -> &str;
}

/// Validate image data: check format is allowed and detect content type.
///
/// Returns the content type on success (e.g., "image/png").
pub fn validate_image(data: &[u8]) -> Result<String, ImageModelError> {
    if data.len() > MAX_IMAGE_BYTES {
        return Err(ImageModelError::InvalidImage(format!(
            "image too large: {} bytes (max {})",
            data.len(),
            MAX_IMAGE_BYTES
        )));
    }

    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ImageModelError::InvalidImage(format!("failed to read image: {}", e)))?;

    let format = reader
        .format()
        .ok_or_else(|| ImageModelError::InvalidImage("could not detect image format".to_string()))?;

    if !ALLOWED_FORMATS.contains(&format) {
        return Err(ImageModelError::InvalidImage(format!(
            "unsupported image format: {:?}. Allowed: JPEG, PNG, WebP",
            format
        )));
    }

    Ok(format.to_mime_type().to_string())
}

/// Registry of available image models.
///
/// Use environment variables to configure:
/// - SOUSCHEF_IMAGE_PROVIDER: "stable-diffusion" | "fake" (default: "stable-diffusion")
/// - HF_API_TOKEN: Hugging Face inference API token
/// - SOUSCHEF_IMAGE_MODEL: Model name
pub fn create_image_model_from_env() -> Result<Box<dyn ImageModel>, ImageModelError> {
    let provider =
        std::env::var("SOUSCHEF_IMAGE_PROVIDER").unwrap_or_else(|_| "stable-diffusion".to_string());

    match provider.as_str() {
        "fake" => Ok(Box::new(FakeImageModel::default())),
        "stable-diffusion" => {
            let config = ImageGenConfig::from_env()
                .map_err(|e| ImageModelError::NotConfigured(e.to_string()))?;
            Ok(Box::new(StableDiffusionProvider::new(config)?))
        }
        other => Err(ImageModelError::NotConfigured(format!(
            "Unknown image provider: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_png_signature() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        let content_type = validate_image(&png).unwrap();
        assert_eq!(content_type, "image/png");
    }

    #[test]
    fn test_validate_rejects_garbage() {
        let result = validate_image(b"not an image");
        assert!(matches!(result, Err(ImageModelError::InvalidImage(_))));
    }

    #[test]
    fn test_validate_rejects_gif() {
        let result = validate_image(b"GIF89a......");
        assert!(matches!(result, Err(ImageModelError::InvalidImage(_))));
    }

    #[test]
    fn test_extension_from_content_type() {
        let png = GeneratedImage {
            data: vec![],
            content_type: "image/png".to_string(),
        };
        assert_eq!(png.extension(), "png");
        let jpg = GeneratedImage {
            data: vec![],
            content_type: "image/jpeg".to_string(),
        };
        assert_eq!(jpg.extension(), "jpg");
    }
}
