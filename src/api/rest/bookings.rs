use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::booking::{confirm_booking, validate_contact};
use crate::error::AppError;
use crate::models::booking::BookingConfirmation;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/selections/:id/confirm", post(confirm))
        .route("/selections/:id/itinerary.pdf", get(download_itinerary))
}

#[derive(Deserialize)]
struct ConfirmRequest {
    name: String,
    email: String,
}

async fn confirm(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ConfirmRequest>,
) -> Result<Json<BookingConfirmation>, AppError> {
    let contact = validate_contact(&payload.name, &payload.email)?;

    // Claim the selection under the lock before any await: the confirmed_at
    // stamp is what makes a concurrent confirm lose with a conflict. The
    // pipeline then runs on a snapshot so the lock is not held across the
    // email send.
    let snapshot = {
        let mut selection = state
            .selections
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("selection {id} not found")))?;
        if selection.confirmed_at.is_some() {
            return Err(AppError::Conflict(format!(
                "selection {id} is already confirmed"
            )));
        }
        if selection.buddy.is_none() {
            return Err(AppError::MissingBuddy { selection: id });
        }
        if selection.destination_id.is_none() {
            return Err(AppError::MissingDestination { selection: id });
        }
        selection.contact = Some(contact.clone());
        selection.confirmed_at = Some(Utc::now());
        selection.value().clone()
    };

    let (confirmation, pdf) =
        confirm_booking(&state.catalog, &state.email, &snapshot, &contact).await?;

    let outcome = if confirmation.warning.is_none() {
        "complete"
    } else {
        "degraded"
    };
    state.metrics.bookings_total.with_label_values(&[outcome]).inc();
    let email_outcome = if confirmation.email_sent { "sent" } else { "failed" };
    state
        .metrics
        .email_deliveries_total
        .with_label_values(&[email_outcome])
        .inc();

    if let Some(mut selection) = state.selections.get_mut(&id) {
        selection.pdf = pdf;
    }

    Ok(Json(confirmation))
}

async fn download_itinerary(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let selection = state
        .selections
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("selection {id} not found")))?;
    if selection.confirmed_at.is_none() {
        return Err(AppError::NotFound(format!(
            "selection {id} has no confirmed booking"
        )));
    }
    let pdf = selection
        .pdf
        .clone()
        .ok_or_else(|| AppError::PdfRender("itinerary was not generated".to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"itinerary-{id}.pdf\""),
            ),
        ],
        pdf,
    ))
}
