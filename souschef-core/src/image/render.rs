//! Batch rendering: one photo per ingredient plus the plated dish.

use super::{validate_image, GeneratedImage, ImageModel, ImageModelError};
use crate::prompts;
use serde::{Deserialize, Serialize};

/// Which photo template a request uses and which artifact suffix it gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageStyle {
    IngredientPhoto,
    DishPhoto,
}

impl ImageStyle {
    /// Artifact filename suffix for this style.
    pub fn artifact_suffix(&self) -> &'static str {
        match self {
            ImageStyle::IngredientPhoto => "image",
            ImageStyle::DishPhoto => "final",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageStyle::IngredientPhoto => "ingredient_photo",
            ImageStyle::DishPhoto => "dish_photo",
        }
    }
}

/// One requested artwork: what to draw and in which style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub subject: String,
    pub style: ImageStyle,
}

impl ImageRequest {
    fn prompt(&self) -> String {
        match self.style {
            ImageStyle::IngredientPhoto => prompts::render_ingredient_photo_prompt(&self.subject),
            ImageStyle::DishPhoto => prompts::render_dish_photo_prompt(&self.subject),
        }
    }
}

/// Outcome of one request. The batch always holds exactly one entry per
/// request, in request order, whether it succeeded or not.
#[derive(Debug)]
pub struct ImageResult {
    pub request: ImageRequest,
    pub outcome: Result<GeneratedImage, ImageModelError>,
}

impl ImageResult {
    pub fn subject(&self) -> &str {
        &self.request.subject
    }

    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// True when at least one, but not every, request in the batch failed.
pub fn is_partial_failure(results: &[ImageResult]) -> bool {
    let failed = results.iter().filter(|r| !r.is_ok()).count();
    failed > 0 && failed < results.len()
}

/// Render one ingredient photo per entry plus, for a non-blank dish name,
/// one plated dish photo.
///
/// Requests are independent: a failed or unusable image is recorded in its
/// own entry and the rest of the batch still runs. Image failures are not
/// fatal to the batch.
pub async fn render_all(
    model: &dyn ImageModel,
    dish_name: &str,
    ingredients: &[String],
) -> Vec<ImageResult> {
    let mut requests: Vec<ImageRequest> = ingredients
        .iter()
        .map(|ingredient| ImageRequest {
            subject: ingredient.clone(),
            style: ImageStyle::IngredientPhoto,
        })
        .collect();

    let dish = dish_name.trim();
    if !dish.is_empty() {
        requests.push(ImageRequest {
            subject: dish.to_string(),
            style: ImageStyle::DishPhoto,
        });
    }

    let mut results = Vec::with_capacity(requests.len());
    for request in requests {
        let outcome = generate_one(model, &request).await;
        if let Err(error) = &outcome {
            tracing::warn!(
                subject = %request.subject,
                style = ?request.style,
                error = %error,
                "image generation failed"
            );
        }
        results.push(ImageResult { request, outcome });
    }
    results
}

async fn generate_one(
    model: &dyn ImageModel,
    request: &ImageRequest,
) -> Result<GeneratedImage, ImageModelError> {
    let data = model.generate(&request.prompt()).await?;
    let content_type = validate_image(&data)?;
    Ok(GeneratedImage { data, content_type })
}
