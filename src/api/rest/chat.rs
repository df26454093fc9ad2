use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::Json;
use axum::Router;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chat;
use crate::error::AppError;
use crate::models::message::{BuddyMatch, MatchStatus, Message};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/matches", get(list_matches))
        .route("/matches/:id/status", patch(update_status))
        .route("/matches/:id/messages", get(list_messages).post(send_message))
        .route("/matches/:id/read", post(mark_read))
}

#[derive(Deserialize)]
struct ListMatchesQuery {
    selection_id: Uuid,
}

async fn list_matches(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListMatchesQuery>,
) -> Result<Json<Vec<BuddyMatch>>, AppError> {
    Ok(Json(state.store.fetch_matches(query.selection_id).await?))
}

#[derive(Deserialize)]
struct UpdateStatusRequest {
    status: MatchStatus,
}

async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<BuddyMatch>, AppError> {
    Ok(Json(
        state.store.update_match_status(id, payload.status).await?,
    ))
}

async fn list_messages(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Message>>, AppError> {
    Ok(Json(state.store.fetch_messages(id).await?))
}

#[derive(Deserialize)]
struct SendMessageRequest {
    sender_id: Uuid,
    content: String,
}

async fn send_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<Message>), AppError> {
    let message = chat::send_message(
        state.store.as_ref(),
        id,
        payload.sender_id,
        &payload.content,
    )
    .await?
    .ok_or_else(|| AppError::BadRequest("message content is empty".to_string()))?;

    state.metrics.chat_messages_total.inc();

    Ok((StatusCode::CREATED, Json(message)))
}

#[derive(Deserialize)]
struct MarkReadRequest {
    message_ids: Vec<Uuid>,
}

#[derive(Serialize)]
struct MarkReadResponse {
    acknowledged: bool,
}

/// Read receipts are fire-and-forget: the response acknowledges receipt,
/// not completion.
async fn mark_read(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MarkReadRequest>,
) -> Result<Json<MarkReadResponse>, AppError> {
    state.store.fetch_match(id).await?;
    chat::mark_as_read(state.store.as_ref(), &payload.message_ids).await;

    Ok(Json(MarkReadResponse { acknowledged: true }))
}
