use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::quiz::QuizAnswers;

/// The buddy choice recorded on a selection, with the score it carried at
/// selection time.
#[derive(Debug, Clone, Serialize)]
pub struct SelectedBuddy {
    pub buddy_id: Uuid,
    pub score: u8,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
}

/// The single in-progress booking record. Created by a quiz submission,
/// populated across the match and destination steps, consumed exactly once
/// by confirmation, then optionally cleared.
#[derive(Debug, Clone, Serialize)]
pub struct BookingSelection {
    pub id: Uuid,
    pub answers: QuizAnswers,
    pub buddy: Option<SelectedBuddy>,
    pub destination_id: Option<Uuid>,
    pub contact: Option<ContactInfo>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub pdf: Option<Vec<u8>>,
}

impl BookingSelection {
    pub fn new(answers: QuizAnswers) -> Self {
        Self {
            id: Uuid::new_v4(),
            answers,
            buddy: None,
            destination_id: None,
            contact: None,
            confirmed_at: None,
            created_at: Utc::now(),
            pdf: None,
        }
    }
}

/// Result of the confirmation flow. `confirmed` stays true even when the
/// email could not be delivered; that failure is carried as a warning.
#[derive(Debug, Clone, Serialize)]
pub struct BookingConfirmation {
    pub confirmed: bool,
    pub pdf_available: bool,
    pub email_sent: bool,
    pub warning: Option<String>,
}
