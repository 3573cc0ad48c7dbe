pub mod generate;
pub mod get_image;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for image endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/images", post(generate::generate_images))
        .route("/api/images/{batch_id}/{name}", get(get_image::get_image))
}

#[derive(OpenApi)]
#[openapi(
    paths(generate::generate_images, get_image::get_image),
    components(schemas(
        generate::GenerateImagesRequest,
        generate::GenerateImagesResponse,
        generate::GeneratedArtifact,
        generate::FailedGeneration,
    ))
)]
pub struct ApiDoc;
