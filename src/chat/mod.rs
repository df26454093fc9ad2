use futures::StreamExt;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::message::{Message, MessageEvent};
use crate::store::Store;

/// Live view of one match's conversation. Activation subscribes to the
/// event feed before fetching history, so an event raced against the fetch
/// is replayed through `apply` rather than lost; `apply` is idempotent for
/// that case because a racing insert is replaced by id, not duplicated.
pub struct ConversationSync {
    match_id: Uuid,
    messages: Vec<Message>,
    events: BroadcastStream<MessageEvent>,
}

impl ConversationSync {
    pub async fn activate(store: &dyn Store, match_id: Uuid) -> Result<Self, AppError> {
        let events = BroadcastStream::new(store.subscribe(match_id));
        let messages = store.fetch_messages(match_id).await?;
        Ok(Self {
            match_id,
            messages,
            events,
        })
    }

    pub fn match_id(&self) -> Uuid {
        self.match_id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Folds one feed event into the local history. Inserts of an already
    /// known id and updates are replacements; an update for an id we never
    /// saw is dropped, since there is nothing coherent to patch.
    pub fn apply(&mut self, event: &MessageEvent) {
        match event {
            MessageEvent::Inserted(message) => {
                match self.messages.iter_mut().find(|m| m.id == message.id) {
                    Some(existing) => *existing = message.clone(),
                    None => self.messages.push(message.clone()),
                }
            }
            MessageEvent::Updated(message) => {
                match self.messages.iter_mut().find(|m| m.id == message.id) {
                    Some(existing) => *existing = message.clone(),
                    None => debug!(
                        match_id = %self.match_id,
                        message_id = %message.id,
                        "dropping update for unknown message"
                    ),
                }
            }
        }
    }

    /// Next event from the feed, already folded into the local history.
    /// Lagged gaps are logged and skipped; `None` means the feed closed.
    pub async fn next_event(&mut self) -> Option<MessageEvent> {
        loop {
            match self.events.next().await? {
                Ok(event) => {
                    self.apply(&event);
                    return Some(event);
                }
                Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                    warn!(match_id = %self.match_id, skipped, "conversation feed lagged");
                }
            }
        }
    }
}

/// Sends a chat message after trimming whitespace. A message that trims to
/// empty is a quiet no-op, reported as `None`.
pub async fn send_message(
    store: &dyn Store,
    match_id: Uuid,
    sender_id: Uuid,
    content: &str,
) -> Result<Option<Message>, AppError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let message = store
        .insert_message(match_id, sender_id, trimmed.to_owned())
        .await?;
    Ok(Some(message))
}

/// Marks messages read, fire-and-forget: a store failure is logged, never
/// surfaced, because read receipts must not disturb the conversation.
pub async fn mark_as_read(store: &dyn Store, message_ids: &[Uuid]) {
    if message_ids.is_empty() {
        return;
    }
    if let Err(err) = store.mark_read(message_ids, chrono::Utc::now()).await {
        warn!(error = %err, "failed to mark messages as read");
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::{mark_as_read, send_message, ConversationSync};
    use crate::models::message::{Message, MessageEvent};
    use crate::store::{MemoryStore, Store};

    async fn store_with_match() -> (MemoryStore, Uuid) {
        let store = MemoryStore::new(16);
        let record = store
            .create_match(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap();
        (store, record.id)
    }

    #[tokio::test]
    async fn activation_loads_history_and_follows_inserts() {
        let (store, match_id) = store_with_match().await;
        let sender = Uuid::new_v4();
        send_message(&store, match_id, sender, "first").await.unwrap();

        let mut sync = ConversationSync::activate(&store, match_id).await.unwrap();
        assert_eq!(sync.messages().len(), 1);

        send_message(&store, match_id, sender, "  second  ")
            .await
            .unwrap();
        let event = sync.next_event().await.unwrap();
        assert!(matches!(event, MessageEvent::Inserted(_)));
        assert_eq!(sync.messages().len(), 2);
        assert_eq!(sync.messages()[1].content, "second");
    }

    #[tokio::test]
    async fn whitespace_only_message_is_a_no_op() {
        let (store, match_id) = store_with_match().await;
        let sent = send_message(&store, match_id, Uuid::new_v4(), "   \n\t ")
            .await
            .unwrap();
        assert!(sent.is_none());
        assert!(store.fetch_messages(match_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn read_receipts_update_the_local_history() {
        let (store, match_id) = store_with_match().await;
        let sender = Uuid::new_v4();
        let message = send_message(&store, match_id, sender, "hello")
            .await
            .unwrap()
            .unwrap();

        let mut sync = ConversationSync::activate(&store, match_id).await.unwrap();
        mark_as_read(&store, &[message.id]).await;

        let event = sync.next_event().await.unwrap();
        assert!(matches!(event, MessageEvent::Updated(_)));
        assert!(sync.messages()[0].read_at.is_some());
    }

    #[tokio::test]
    async fn update_for_unknown_message_is_dropped() {
        let (store, match_id) = store_with_match().await;
        let mut sync = ConversationSync::activate(&store, match_id).await.unwrap();

        let phantom = Message {
            id: Uuid::new_v4(),
            match_id,
            sender_id: Uuid::new_v4(),
            content: "ghost".into(),
            created_at: chrono::Utc::now(),
            read_at: None,
        };
        sync.apply(&MessageEvent::Updated(phantom));
        assert!(sync.messages().is_empty());
    }

    #[tokio::test]
    async fn replayed_insert_does_not_duplicate() {
        let (store, match_id) = store_with_match().await;
        let message = send_message(&store, match_id, Uuid::new_v4(), "once")
            .await
            .unwrap()
            .unwrap();

        let mut sync = ConversationSync::activate(&store, match_id).await.unwrap();
        sync.apply(&MessageEvent::Inserted(message));
        assert_eq!(sync.messages().len(), 1);
    }
}
