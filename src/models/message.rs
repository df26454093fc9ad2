use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Pending,
    Accepted,
    Rejected,
}

/// An accepted-or-pending connection between a booking selection (the local
/// user side) and a catalog buddy. Each match owns one conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuddyMatch {
    pub id: Uuid,
    pub selection_id: Uuid,
    pub buddy_id: Uuid,
    pub status: MatchStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One chat message. `read_at` is the only mutable field and is set at most
/// once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub match_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

/// Change event emitted by the store for one conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "message", rename_all = "lowercase")]
pub enum MessageEvent {
    Inserted(Message),
    Updated(Message),
}
