use crate::api::ErrorResponse;
use crate::AppState;
use axum::routing::{delete, post};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use souschef_core::{handle_turn, ChatError, TurnRequest};
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

/// Reply shown when a turn fails on the model side. The real cause goes in
/// the `error` field and the logs.
const APOLOGY: &str = "I apologize, but I encountered an error. Please try again.";

/// One chat message from the client.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequest {
    /// Session to continue; omit to start a new one.
    pub session_id: Option<Uuid>,
    pub message: String,
    /// Optional override for the dish under discussion.
    pub dish_name: Option<String>,
    /// Optional override for the recipe text a followup refers to.
    pub recipe_text: Option<String>,
}

/// The assistant's reply for one turn.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChatResponse {
    pub success: bool,
    /// Session id to send with the next message.
    pub session_id: Uuid,
    /// Classified intent ("dish_suggestion", "recipe", "followup",
    /// "unsupported"); absent when the turn failed.
    pub intent: Option<String>,
    pub response: String,
    pub dish_name: Option<String>,
    pub main_ingredients: Option<Vec<String>>,
    pub error: Option<String>,
}

/// Returns the router for chat endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/chat/sessions/{session_id}", delete(delete_session))
}

/// Handle one conversation turn
///
/// Routes the message to a dish suggestion, a full recipe, or a followup
/// answer, updating the session's stored context. Stateless clients can pass
/// `dish_name`/`recipe_text` instead of relying on the session.
#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Turn handled", body = ChatResponse),
        (status = 400, description = "Empty message or missing parameter", body = ErrorResponse),
        (status = 503, description = "Model call failed", body = ChatResponse)
    )
)]
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse {
    let message = request.message.trim();
    if message.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "message must not be empty".to_string(),
            }),
        )
            .into_response();
    }

    let (session_id, context) = state.sessions.get_or_create(request.session_id);
    // Serializes turns within this session; other sessions are unaffected.
    let mut context = context.lock().await;

    let turn = TurnRequest {
        utterance: message,
        dish_name: request.dish_name.as_deref(),
        recipe_text: request.recipe_text.as_deref(),
    };

    match handle_turn(state.llm.as_ref(), turn, &mut context).await {
        Ok(outcome) => {
            tracing::info!(
                session_id = %session_id,
                intent = %outcome.intent,
                "chat turn completed"
            );
            (
                StatusCode::OK,
                Json(ChatResponse {
                    success: true,
                    session_id,
                    intent: Some(outcome.intent.as_str().to_string()),
                    response: outcome.reply,
                    dish_name: outcome.dish_name,
                    main_ingredients: outcome.main_ingredients,
                    error: None,
                }),
            )
                .into_response()
        }
        Err(ChatError::MissingParameter { name }) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("Missing required parameter: {}", name),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(session_id = %session_id, error = %e, "chat turn failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ChatResponse {
                    success: false,
                    session_id,
                    intent: None,
                    response: APOLOGY.to_string(),
                    dish_name: None,
                    main_ingredients: None,
                    error: Some(e.to_string()),
                }),
            )
                .into_response()
        }
    }
}

/// Delete a conversation session
///
/// Drops the stored context; the id becomes invalid for future turns.
#[utoipa::path(
    delete,
    path = "/api/chat/sessions/{session_id}",
    tag = "chat",
    params(
        ("session_id" = Uuid, Path, description = "Session ID"),
    ),
    responses(
        (status = 204, description = "Session deleted"),
        (status = 404, description = "Unknown session", body = ErrorResponse)
    )
)]
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> impl IntoResponse {
    if state.sessions.remove(session_id) {
        tracing::info!(session_id = %session_id, "session deleted");
        StatusCode::NO_CONTENT.into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Session not found".to_string(),
            }),
        )
            .into_response()
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(chat, delete_session),
    components(schemas(ChatRequest, ChatResponse))
)]
pub struct ApiDoc;
