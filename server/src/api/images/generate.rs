use crate::api::ErrorResponse;
use crate::artifacts::artifact_file_name;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use souschef_core::image::{is_partial_failure, render_all, ImageResult};
use utoipa::ToSchema;
use uuid::Uuid;

/// What to draw: a plated dish, a list of ingredients, or both. The field
/// names line up with what a recipe turn returns, so a chat response can be
/// forwarded here directly.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateImagesRequest {
    pub dish_name: Option<String>,
    #[serde(default)]
    pub main_ingredients: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateImagesResponse {
    /// Batch id the artifact URLs are scoped under.
    pub batch_id: Uuid,
    pub images: Vec<GeneratedArtifact>,
    pub failed: Vec<FailedGeneration>,
}

/// One stored image, fetchable at `url`.
#[derive(Debug, Serialize, ToSchema)]
pub struct GeneratedArtifact {
    pub subject: String,
    /// "ingredient_photo" or "dish_photo".
    pub style: String,
    pub url: String,
}

/// One request that produced no artifact.
#[derive(Debug, Serialize, ToSchema)]
pub struct FailedGeneration {
    pub subject: String,
    pub style: String,
    pub error: String,
}

/// Generate photos for a dish and its ingredients
///
/// Renders one photo per ingredient plus a plated shot of the dish, stores
/// them under a fresh batch id, and returns a URL for each. Failed requests
/// are reported alongside the successes; they never fail the batch.
#[utoipa::path(
    post,
    path = "/api/images",
    tag = "images",
    request_body = GenerateImagesRequest,
    responses(
        (status = 200, description = "Batch rendered", body = GenerateImagesResponse),
        (status = 400, description = "Nothing to draw", body = ErrorResponse)
    )
)]
pub async fn generate_images(
    State(state): State<AppState>,
    Json(request): Json<GenerateImagesRequest>,
) -> impl IntoResponse {
    let dish_name = request
        .dish_name
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    let ingredients: Vec<String> = request
        .main_ingredients
        .iter()
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .collect();

    if dish_name.is_empty() && ingredients.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Provide a dish_name or at least one ingredient".to_string(),
            }),
        )
            .into_response();
    }

    let batch_id = Uuid::new_v4();
    let results = render_all(state.images.as_ref(), dish_name, &ingredients).await;
    if is_partial_failure(&results) {
        tracing::warn!(batch_id = %batch_id, "image batch partially failed");
    }

    let mut images = Vec::new();
    let mut failed = Vec::new();
    for ImageResult { request, outcome } in results {
        let style = request.style.as_str().to_string();
        match outcome {
            Ok(image) => {
                let file_name =
                    artifact_file_name(&request.subject, request.style, image.extension());
                match state.artifacts.save(batch_id, &file_name, &image.data) {
                    Ok(()) => images.push(GeneratedArtifact {
                        subject: request.subject,
                        style,
                        url: format!("/api/images/{}/{}", batch_id, file_name),
                    }),
                    Err(e) => {
                        tracing::error!(
                            batch_id = %batch_id,
                            file_name = %file_name,
                            error = %e,
                            "failed to store image"
                        );
                        failed.push(FailedGeneration {
                            subject: request.subject,
                            style,
                            error: format!("Failed to store image: {}", e),
                        });
                    }
                }
            }
            Err(e) => failed.push(FailedGeneration {
                subject: request.subject,
                style,
                error: e.to_string(),
            }),
        }
    }

    tracing::info!(
        batch_id = %batch_id,
        stored = images.len(),
        failed = failed.len(),
        "image batch complete"
    );
    (
        StatusCode::OK,
        Json(GenerateImagesResponse {
            batch_id,
            images,
            failed,
        }),
    )
        .into_response()
}
