use crate::api::ErrorResponse;
use crate::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

fn image_response(data: Vec<u8>, content_type: &'static str) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CACHE_CONTROL, "public, max-age=31536000, immutable")
        .body(Body::from(data))
        .unwrap()
}

/// Fetch a generated image
///
/// Artifacts are immutable once written, so they are served with a long
/// cache lifetime.
#[utoipa::path(
    get,
    path = "/api/images/{batch_id}/{name}",
    tag = "images",
    params(
        ("batch_id" = Uuid, Path, description = "Batch ID"),
        ("name" = String, Path, description = "Artifact file name"),
    ),
    responses(
        (status = 200, description = "Image data", content_type = "image/png"),
        (status = 404, description = "Image not found", body = ErrorResponse)
    )
)]
pub async fn get_image(
    State(state): State<AppState>,
    Path((batch_id, name)): Path<(Uuid, String)>,
) -> impl IntoResponse {
    match state.artifacts.open(batch_id, &name) {
        Some((data, content_type)) => image_response(data, content_type).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Image not found".to_string(),
            }),
        )
            .into_response(),
    }
}
