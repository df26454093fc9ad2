use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::scoring::rank_buddies;
use crate::engine::swipe::{DragOffset, DragOutcome, SwipeDirection, SwipeEvent, SwipeSession};
use crate::error::AppError;
use crate::models::message::BuddyMatch;
use crate::state::{AppState, SwipeEntry};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/swipe", post(create_session))
        .route("/swipe/:id", get(get_session))
        .route("/swipe/:id/drag-start", post(drag_start))
        .route("/swipe/:id/drag-move", post(drag_move))
        .route("/swipe/:id/drag-end", post(drag_end))
        .route("/swipe/:id/reset", post(reset_session))
}

#[derive(Deserialize)]
struct CreateSessionRequest {
    selection_id: Uuid,
}

#[derive(Serialize)]
struct SwipeView {
    id: Uuid,
    selection_id: Uuid,
    cursor: usize,
    total: usize,
    exhausted: bool,
    current: Option<Uuid>,
    dragging: bool,
    offset: DragOffset,
    rotation: f64,
    indicator_opacity: f64,
}

impl SwipeView {
    fn from_entry(id: Uuid, entry: &SwipeEntry) -> Self {
        let session = &entry.session;
        Self {
            id,
            selection_id: entry.selection_id,
            cursor: session.cursor(),
            total: session.len(),
            exhausted: session.exhausted(),
            current: session.current(),
            dragging: session.is_dragging(),
            offset: session.offset(),
            rotation: session.rotation(),
            indicator_opacity: session.indicator_opacity(),
        }
    }
}

/// Opens a swipe deck over the selection's ranked buddy candidates, best
/// match on top.
async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SwipeView>), AppError> {
    let answers = state
        .selections
        .get(&payload.selection_id)
        .map(|entry| entry.answers)
        .ok_or_else(|| {
            AppError::NotFound(format!("selection {} not found", payload.selection_id))
        })?;

    let mut rng = state.variety_rng();
    let deck: Vec<Uuid> = rank_buddies(state.catalog.buddies(), &answers, &mut rng)
        .into_iter()
        .map(|scored| scored.buddy.id)
        .collect();

    let id = Uuid::new_v4();
    let entry = SwipeEntry {
        selection_id: payload.selection_id,
        session: SwipeSession::new(deck),
    };
    let view = SwipeView::from_entry(id, &entry);
    state.swipes.insert(id, entry);

    Ok((StatusCode::CREATED, Json(view)))
}

async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SwipeView>, AppError> {
    let entry = state
        .swipes
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("swipe session {id} not found")))?;

    Ok(Json(SwipeView::from_entry(id, &entry)))
}

#[derive(Deserialize)]
struct PointerRequest {
    x: f64,
    y: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum OutcomeKind {
    Ignored,
    Dragging,
    SnapBack,
    Commit,
}

#[derive(Serialize)]
struct DragResponse {
    outcome: OutcomeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    direction: Option<SwipeDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    settled: Option<SwipeEvent>,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    matched: Option<BuddyMatch>,
    session: SwipeView,
}

async fn drag_start(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PointerRequest>,
) -> Result<Json<DragResponse>, AppError> {
    apply_drag(&state, id, |session| session.drag_start(payload.x, payload.y))
}

async fn drag_move(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PointerRequest>,
) -> Result<Json<DragResponse>, AppError> {
    apply_drag(&state, id, |session| session.drag_move(payload.x, payload.y))
}

fn apply_drag(
    state: &AppState,
    id: Uuid,
    op: impl FnOnce(&mut SwipeSession) -> DragOutcome,
) -> Result<Json<DragResponse>, AppError> {
    let mut entry = state
        .swipes
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("swipe session {id} not found")))?;
    let outcome = op(&mut entry.session);

    Ok(Json(DragResponse {
        outcome: kind_of(outcome),
        direction: direction_of(outcome),
        settled: None,
        matched: None,
        session: SwipeView::from_entry(id, &entry),
    }))
}

/// Releases the drag. A committed swipe stays slammed off-screen for the
/// configured settle delay, then advances the deck; a right swipe also
/// records a pending match.
async fn drag_end(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DragResponse>, AppError> {
    let outcome = {
        let mut entry = state
            .swipes
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("swipe session {id} not found")))?;
        entry.session.drag_end()
    };

    let mut settled = None;
    let mut matched = None;
    if let DragOutcome::Commit(direction) = outcome {
        // Lock released during the settle delay so reads still see the
        // card pinned at the commit offset.
        tokio::time::sleep(state.swipe_settle).await;

        let (event, selection_id) = {
            let mut entry = state
                .swipes
                .get_mut(&id)
                .ok_or_else(|| AppError::NotFound(format!("swipe session {id} not found")))?;
            (entry.session.settle(), entry.selection_id)
        };

        if let Some(event) = event {
            let label = match event.direction {
                SwipeDirection::Left => "left",
                SwipeDirection::Right => "right",
            };
            state.metrics.swipes_total.with_label_values(&[label]).inc();

            if direction == SwipeDirection::Right {
                matched = Some(state.store.create_match(selection_id, event.candidate).await?);
            }
            settled = Some(event);
        }
    }

    let entry = state
        .swipes
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("swipe session {id} not found")))?;

    Ok(Json(DragResponse {
        outcome: kind_of(outcome),
        direction: direction_of(outcome),
        settled,
        matched,
        session: SwipeView::from_entry(id, &entry),
    }))
}

async fn reset_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SwipeView>, AppError> {
    let mut entry = state
        .swipes
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("swipe session {id} not found")))?;
    entry.session.reset();

    Ok(Json(SwipeView::from_entry(id, &entry)))
}

fn kind_of(outcome: DragOutcome) -> OutcomeKind {
    match outcome {
        DragOutcome::Ignored => OutcomeKind::Ignored,
        DragOutcome::Dragging => OutcomeKind::Dragging,
        DragOutcome::SnapBack => OutcomeKind::SnapBack,
        DragOutcome::Commit(_) => OutcomeKind::Commit,
    }
}

fn direction_of(outcome: DragOutcome) -> Option<SwipeDirection> {
    match outcome {
        DragOutcome::Commit(direction) => Some(direction),
        _ => None,
    }
}
