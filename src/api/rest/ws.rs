use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use futures::SinkExt;
use futures::StreamExt;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::chat::ConversationSync;
use crate::error::AppError;
use crate::state::AppState;

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(match_id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    // Reject unknown matches before committing to the upgrade.
    state.store.fetch_match(match_id).await?;

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, match_id)))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, match_id: Uuid) {
    let mut sync = match ConversationSync::activate(state.store.as_ref(), match_id).await {
        Ok(sync) => sync,
        Err(err) => {
            warn!(match_id = %match_id, error = %err, "failed to activate conversation");
            return;
        }
    };

    let (mut sender, mut receiver) = socket.split();

    // First frame is the full history; everything after is incremental.
    let backlog = json!({ "history": sync.messages() }).to_string();
    if sender.send(Message::Text(backlog.into())).await.is_err() {
        return;
    }

    state.metrics.active_conversations.inc();
    info!(match_id = %match_id, "conversation client connected");

    loop {
        tokio::select! {
            event = sync.next_event() => {
                let Some(event) = event else { break };
                let json = match serde_json::to_string(&event) {
                    Ok(json) => json,
                    Err(err) => {
                        warn!(error = %err, "failed to serialize conversation event");
                        continue;
                    }
                };
                if sender.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
            incoming = receiver.next() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(_)) => break,
                }
            }
        }
    }

    state.metrics.active_conversations.dec();
    info!(match_id = %match_id, "conversation client disconnected");
}
