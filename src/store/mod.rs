use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::message::{BuddyMatch, MatchStatus, Message, MessageEvent};

/// Persistence gateway for matches and their conversations. Every write
/// that touches a message also publishes a [`MessageEvent`] on the
/// per-match channel, so live subscribers and later fetches agree.
#[async_trait]
pub trait Store: Send + Sync {
    async fn create_match(&self, selection_id: Uuid, buddy_id: Uuid) -> Result<BuddyMatch, AppError>;

    async fn fetch_match(&self, match_id: Uuid) -> Result<BuddyMatch, AppError>;

    /// Matches for a selection, most recently updated first.
    async fn fetch_matches(&self, selection_id: Uuid) -> Result<Vec<BuddyMatch>, AppError>;

    async fn update_match_status(
        &self,
        match_id: Uuid,
        status: MatchStatus,
    ) -> Result<BuddyMatch, AppError>;

    /// Full conversation history in send order.
    async fn fetch_messages(&self, match_id: Uuid) -> Result<Vec<Message>, AppError>;

    async fn insert_message(
        &self,
        match_id: Uuid,
        sender_id: Uuid,
        content: String,
    ) -> Result<Message, AppError>;

    /// Stamps `read_at` on the given messages, skipping any already read.
    /// Returns how many were newly marked.
    async fn mark_read(&self, message_ids: &[Uuid], at: DateTime<Utc>) -> Result<usize, AppError>;

    /// Live event feed for one match. Subscribing is synchronous so callers
    /// can subscribe before fetching history and miss nothing in between.
    fn subscribe(&self, match_id: Uuid) -> broadcast::Receiver<MessageEvent>;
}

/// In-process store backed by [`DashMap`]s. Messages are kept per match in
/// send order; channels are created lazily on first subscribe or publish.
pub struct MemoryStore {
    matches: DashMap<Uuid, BuddyMatch>,
    messages: DashMap<Uuid, Vec<Message>>,
    channels: DashMap<Uuid, broadcast::Sender<MessageEvent>>,
    event_buffer_size: usize,
}

impl MemoryStore {
    pub fn new(event_buffer_size: usize) -> Self {
        Self {
            matches: DashMap::new(),
            messages: DashMap::new(),
            channels: DashMap::new(),
            event_buffer_size,
        }
    }

    fn channel(&self, match_id: Uuid) -> broadcast::Sender<MessageEvent> {
        self.channels
            .entry(match_id)
            .or_insert_with(|| broadcast::channel(self.event_buffer_size).0)
            .clone()
    }

    fn publish(&self, match_id: Uuid, event: MessageEvent) {
        // Send only fails with zero subscribers, which is fine here.
        let _ = self.channel(match_id).send(event);
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_match(&self, selection_id: Uuid, buddy_id: Uuid) -> Result<BuddyMatch, AppError> {
        let now = Utc::now();
        let record = BuddyMatch {
            id: Uuid::new_v4(),
            selection_id,
            buddy_id,
            status: MatchStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.matches.insert(record.id, record.clone());
        Ok(record)
    }

    async fn fetch_match(&self, match_id: Uuid) -> Result<BuddyMatch, AppError> {
        self.matches
            .get(&match_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::NotFound(format!("match {match_id} not found")))
    }

    async fn fetch_matches(&self, selection_id: Uuid) -> Result<Vec<BuddyMatch>, AppError> {
        let mut records: Vec<BuddyMatch> = self
            .matches
            .iter()
            .filter(|entry| entry.selection_id == selection_id)
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(records)
    }

    async fn update_match_status(
        &self,
        match_id: Uuid,
        status: MatchStatus,
    ) -> Result<BuddyMatch, AppError> {
        let mut entry = self
            .matches
            .get_mut(&match_id)
            .ok_or_else(|| AppError::NotFound(format!("match {match_id} not found")))?;
        entry.status = status;
        entry.updated_at = Utc::now();
        Ok(entry.value().clone())
    }

    async fn fetch_messages(&self, match_id: Uuid) -> Result<Vec<Message>, AppError> {
        self.fetch_match(match_id).await?;
        Ok(self
            .messages
            .get(&match_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    async fn insert_message(
        &self,
        match_id: Uuid,
        sender_id: Uuid,
        content: String,
    ) -> Result<Message, AppError> {
        self.fetch_match(match_id).await?;
        let message = Message {
            id: Uuid::new_v4(),
            match_id,
            sender_id,
            content,
            created_at: Utc::now(),
            read_at: None,
        };
        self.messages
            .entry(match_id)
            .or_default()
            .push(message.clone());
        self.publish(match_id, MessageEvent::Inserted(message.clone()));
        Ok(message)
    }

    async fn mark_read(&self, message_ids: &[Uuid], at: DateTime<Utc>) -> Result<usize, AppError> {
        let mut updated = Vec::new();
        for mut entry in self.messages.iter_mut() {
            for message in entry.value_mut().iter_mut() {
                if message.read_at.is_none() && message_ids.contains(&message.id) {
                    message.read_at = Some(at);
                    updated.push(message.clone());
                }
            }
        }
        let count = updated.len();
        for message in updated {
            self.publish(message.match_id, MessageEvent::Updated(message));
        }
        Ok(count)
    }

    fn subscribe(&self, match_id: Uuid) -> broadcast::Receiver<MessageEvent> {
        self.channel(match_id).subscribe()
    }
}
