use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use serde::Deserialize;
use uuid::Uuid;

use crate::engine::scoring::{
    rank_buddies, rank_destinations, ScoredBuddy, ScoredDestination, BUDDY_SCORE_CAP,
};
use crate::error::AppError;
use crate::models::booking::{BookingSelection, SelectedBuddy};
use crate::models::quiz::QuizAnswers;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/quiz/answers", post(submit_answers))
        .route("/selections/:id", get(get_selection).delete(delete_selection))
        .route("/selections/:id/matches", get(list_matches))
        .route("/selections/:id/buddy", post(choose_buddy))
        .route("/selections/:id/destinations", get(list_destinations))
        .route("/selections/:id/destination", post(choose_destination))
}

async fn submit_answers(
    State(state): State<Arc<AppState>>,
    Json(answers): Json<QuizAnswers>,
) -> (StatusCode, Json<BookingSelection>) {
    let selection = BookingSelection::new(answers);
    state.selections.insert(selection.id, selection.clone());
    (StatusCode::CREATED, Json(selection))
}

async fn get_selection(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingSelection>, AppError> {
    let selection = state
        .selections
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("selection {id} not found")))?;

    Ok(Json(selection.value().clone()))
}

/// Starting over: drops the selection and any swipe decks pinned to it.
async fn delete_selection(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .selections
        .remove(&id)
        .ok_or_else(|| AppError::NotFound(format!("selection {id} not found")))?;
    state.swipes.retain(|_, entry| entry.selection_id != id);

    Ok(StatusCode::NO_CONTENT)
}

async fn list_matches(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ScoredBuddy>>, AppError> {
    let answers = selection_answers(&state, id)?;
    let mut rng = state.variety_rng();

    Ok(Json(rank_buddies(state.catalog.buddies(), &answers, &mut rng)))
}

#[derive(Deserialize)]
struct ChooseBuddyRequest {
    buddy_id: Uuid,
    score: u8,
    #[serde(default)]
    reasons: Vec<String>,
}

async fn choose_buddy(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ChooseBuddyRequest>,
) -> Result<Json<BookingSelection>, AppError> {
    if state.catalog.buddy(payload.buddy_id).is_none() {
        return Err(AppError::NotFound(format!(
            "buddy {} not found",
            payload.buddy_id
        )));
    }
    if u32::from(payload.score) > BUDDY_SCORE_CAP {
        return Err(AppError::Validation {
            field: "score",
            message: format!("score must not exceed {BUDDY_SCORE_CAP}"),
        });
    }

    let mut selection = state
        .selections
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("selection {id} not found")))?;
    selection.buddy = Some(SelectedBuddy {
        buddy_id: payload.buddy_id,
        score: payload.score,
        reasons: payload.reasons,
    });

    Ok(Json(selection.value().clone()))
}

async fn list_destinations(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ScoredDestination>>, AppError> {
    let selection = state
        .selections
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("selection {id} not found")))?;
    let chosen = selection
        .buddy
        .as_ref()
        .ok_or(AppError::MissingBuddy { selection: id })?;
    let buddy = state
        .catalog
        .buddy(chosen.buddy_id)
        .ok_or_else(|| AppError::NotFound(format!("buddy {} not found", chosen.buddy_id)))?;

    Ok(Json(rank_destinations(
        state.catalog.destinations(),
        &selection.answers,
        buddy,
    )))
}

#[derive(Deserialize)]
struct ChooseDestinationRequest {
    destination_id: Uuid,
}

async fn choose_destination(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ChooseDestinationRequest>,
) -> Result<Json<BookingSelection>, AppError> {
    if state.catalog.destination(payload.destination_id).is_none() {
        return Err(AppError::NotFound(format!(
            "destination {} not found",
            payload.destination_id
        )));
    }

    let mut selection = state
        .selections
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("selection {id} not found")))?;
    if selection.buddy.is_none() {
        return Err(AppError::MissingBuddy { selection: id });
    }
    selection.destination_id = Some(payload.destination_id);

    Ok(Json(selection.value().clone()))
}

fn selection_answers(state: &AppState, id: Uuid) -> Result<QuizAnswers, AppError> {
    state
        .selections
        .get(&id)
        .map(|entry| entry.answers)
        .ok_or_else(|| AppError::NotFound(format!("selection {id} not found")))
}
