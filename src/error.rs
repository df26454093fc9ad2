use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("selection {selection} has no buddy chosen yet")]
    MissingBuddy { selection: Uuid },

    #[error("selection {selection} has no destination chosen yet")]
    MissingDestination { selection: Uuid },

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("failed to render itinerary: {0}")]
    PdfRender(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // The two "missing step" errors redirect back to the flow that
        // produces the missing piece instead of reporting a dead end.
        if let Some(location) = self.redirect_target() {
            let body = Json(json!({ "error": self.to_string() }));
            return (
                StatusCode::SEE_OTHER,
                [(header::LOCATION, location)],
                body,
            )
                .into_response();
        }

        let (status, body) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::Validation { field, message } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": message, "field": field }),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, json!({ "error": msg })),
            AppError::PdfRender(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": format!("failed to render itinerary: {msg}") }),
            ),
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg }))
            }
            AppError::MissingBuddy { .. } | AppError::MissingDestination { .. } => unreachable!(),
        };

        (status, Json(body)).into_response()
    }
}

impl AppError {
    fn redirect_target(&self) -> Option<String> {
        match self {
            AppError::MissingBuddy { selection } => {
                Some(format!("/selections/{selection}/matches"))
            }
            AppError::MissingDestination { selection } => {
                Some(format!("/selections/{selection}/destinations"))
            }
            _ => None,
        }
    }
}
