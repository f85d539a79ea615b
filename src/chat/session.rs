use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};
use rand::Rng;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::config::ChatSettings;
use crate::core::IdGenerator;
use crate::models::{ChatMessage, MatchedItem, MessageBody, SenderRole, SessionSummary};

/// The three canned replies the simulated finder rotates through.
const CANNED_REPLIES: [&str; 3] = [
    "Sure! When would you like to meet?",
    "That works for me. See you then!",
    "Great! I'll bring the item.",
];

/// Errors surfaced by session operations.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The session was closed by `mark_reunited` or `close`; no further
    /// messages are accepted.
    #[error("session is closed")]
    Closed,
    #[error("message text is empty")]
    EmptyMessage,
}

/// Observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    /// At least one simulated reply is still pending.
    AwaitingReply,
    Closed,
}

struct SessionInner {
    matched: MatchedItem,
    messages: Vec<ChatMessage>,
    ids: IdGenerator,
    pending_replies: usize,
    online: bool,
    contact_shared: bool,
    closed: bool,
}

impl SessionInner {
    fn push_message(&mut self, sender: SenderRole, body: MessageBody) -> ChatMessage {
        let message = ChatMessage {
            id: self.ids.next_id(),
            sender,
            body,
            timestamp: Utc::now(),
        };
        self.messages.push(message.clone());
        message
    }
}

/// A transient two-party messaging exchange scoped to one match.
///
/// Opening a session seeds the scripted three-message exchange from the
/// original conversation and starts a presence task that re-samples the
/// finder's online status on a fixed interval. Every timer this session
/// schedules is owned by it and aborted on close or drop, so no callback
/// can land on a torn-down session.
pub struct ChatSession {
    id: Uuid,
    settings: ChatSettings,
    inner: Arc<Mutex<SessionInner>>,
    reply_tasks: StdMutex<Vec<JoinHandle<()>>>,
    presence_task: StdMutex<Option<JoinHandle<()>>>,
}

impl ChatSession {
    /// Open a session for a match, seeding the scripted exchange with
    /// back-dated timestamps.
    pub fn open(matched: MatchedItem, settings: ChatSettings) -> Self {
        let now = Utc::now();
        let mut ids = IdGenerator::new();

        let seed = |ids: &mut IdGenerator, sender, text: String, age_secs: i64| ChatMessage {
            id: ids.next_id(),
            sender,
            body: MessageBody::Text(text),
            timestamp: now - ChronoDuration::seconds(age_secs),
        };

        let messages = vec![
            seed(
                &mut ids,
                SenderRole::Finder,
                format!("Hi! I found a {}. Is this yours?", matched.found_item.item_name),
                3600,
            ),
            seed(
                &mut ids,
                SenderRole::Owner,
                "Yes! That looks like mine. Where did you find it?".to_string(),
                3500,
            ),
            seed(
                &mut ids,
                SenderRole::Finder,
                format!(
                    "I found it at {}. Would you like to meet to collect it?",
                    matched.found_item.location
                ),
                3400,
            ),
        ];

        let inner = Arc::new(Mutex::new(SessionInner {
            matched,
            messages,
            ids,
            pending_replies: 0,
            online: true,
            contact_shared: false,
            closed: false,
        }));

        let session = Self {
            id: Uuid::new_v4(),
            settings,
            inner,
            reply_tasks: StdMutex::new(Vec::new()),
            presence_task: StdMutex::new(None),
        };
        session.start_presence_task();

        tracing::debug!("Opened chat session {}", session.id);
        session
    }

    /// Periodically re-sample the simulated online status. Independent of
    /// any real presence signal.
    fn start_presence_task(&self) {
        let inner = Arc::clone(&self.inner);
        let interval = Duration::from_millis(self.settings.presence_interval_ms);
        let probability = self.settings.online_probability.clamp(0.0, 1.0);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick fires immediately; skip it so the initial
            // online status survives one full interval.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let online = rand::thread_rng().gen_bool(probability);
                let mut inner = inner.lock().await;
                if inner.closed {
                    return;
                }
                inner.online = online;
            }
        });

        *self.presence_task.lock().unwrap() = Some(handle);
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Append an owner message and schedule one simulated reply after the
    /// configured typing delay.
    ///
    /// Rejected on a closed session and for empty or whitespace-only text.
    pub async fn send(&self, text: &str) -> Result<ChatMessage, SessionError> {
        if text.trim().is_empty() {
            return Err(SessionError::EmptyMessage);
        }

        let message = {
            let mut inner = self.inner.lock().await;
            if inner.closed {
                return Err(SessionError::Closed);
            }
            inner.pending_replies += 1;
            inner.push_message(SenderRole::Owner, MessageBody::Text(text.to_string()))
        };

        let inner = Arc::clone(&self.inner);
        let delay = Duration::from_millis(self.settings.reply_delay_ms);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut inner = inner.lock().await;
            if inner.closed {
                return;
            }
            let reply = CANNED_REPLIES[rand::thread_rng().gen_range(0..CANNED_REPLIES.len())];
            inner.push_message(SenderRole::Finder, MessageBody::Text(reply.to_string()));
            inner.pending_replies = inner.pending_replies.saturating_sub(1);
        });

        let mut tasks = self.reply_tasks.lock().unwrap();
        tasks.retain(|h| !h.is_finished());
        tasks.push(handle);

        Ok(message)
    }

    /// Share contact details with the other party.
    ///
    /// One-way: the flag never unsets and at most one marker message is
    /// appended. Returns `false` when contact was already shared.
    pub async fn share_contact(&self) -> Result<bool, SessionError> {
        let mut inner = self.inner.lock().await;
        if inner.closed {
            return Err(SessionError::Closed);
        }
        if inner.contact_shared {
            return Ok(false);
        }
        inner.contact_shared = true;
        inner.push_message(SenderRole::Owner, MessageBody::Contact);
        tracing::info!("Contact information shared in session {}", self.id);
        Ok(true)
    }

    /// Terminal action: the item has been handed back. Closes the session
    /// and invalidates every pending timer. Idempotent.
    pub async fn mark_reunited(&self) {
        tracing::info!("Session {}: item marked as reunited", self.id);
        self.close().await;
    }

    /// Close the session and abort pending reply and presence tasks.
    /// Idempotent.
    pub async fn close(&self) {
        {
            let mut inner = self.inner.lock().await;
            if inner.closed {
                return;
            }
            inner.closed = true;
            inner.pending_replies = 0;
        }
        self.abort_tasks();
        tracing::debug!("Closed chat session {}", self.id);
    }

    fn abort_tasks(&self) {
        if let Ok(mut tasks) = self.reply_tasks.lock() {
            for task in tasks.drain(..) {
                task.abort();
            }
        }
        if let Ok(mut presence) = self.presence_task.lock() {
            if let Some(task) = presence.take() {
                task.abort();
            }
        }
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.inner.lock().await.messages.clone()
    }

    pub async fn message_count(&self) -> usize {
        self.inner.lock().await.messages.len()
    }

    /// True while a simulated reply is pending, mirroring the typing
    /// indicator of the original chat.
    pub async fn is_typing(&self) -> bool {
        let inner = self.inner.lock().await;
        !inner.closed && inner.pending_replies > 0
    }

    pub async fn is_online(&self) -> bool {
        self.inner.lock().await.online
    }

    pub async fn contact_shared(&self) -> bool {
        self.inner.lock().await.contact_shared
    }

    pub async fn state(&self) -> SessionState {
        let inner = self.inner.lock().await;
        if inner.closed {
            SessionState::Closed
        } else if inner.pending_replies > 0 {
            SessionState::AwaitingReply
        } else {
            SessionState::Idle
        }
    }

    pub async fn summary(&self) -> SessionSummary {
        let inner = self.inner.lock().await;
        SessionSummary {
            session_id: self.id.to_string(),
            match_id: inner.matched.id.clone(),
            closed: inner.closed,
            message_count: inner.messages.len(),
            contact_shared: inner.contact_shared,
            online: inner.online,
        }
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.abort_tasks();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FoundItem, LostItem};
    use chrono::{NaiveDate, NaiveTime};

    fn test_match() -> MatchedItem {
        MatchedItem {
            id: "m1".to_string(),
            lost_item: LostItem {
                id: "1".to_string(),
                item_name: "Blue Backpack".to_string(),
                description: "Navy blue Jansport backpack with laptop inside".to_string(),
                location: Some("Library 3rd floor".to_string()),
                date: NaiveDate::from_ymd_opt(2025, 10, 28).unwrap(),
                time: NaiveTime::from_hms_opt(14, 30, 0),
                image: None,
                reported_by: "John Doe".to_string(),
            },
            found_item: FoundItem {
                id: "2".to_string(),
                item_name: "Blue Backpack".to_string(),
                description: "Navy blue backpack found near study area".to_string(),
                location: "Library 3rd floor".to_string(),
                date: NaiveDate::from_ymd_opt(2025, 10, 28).unwrap(),
                time: NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
                image: "img-001".to_string(),
                found_by: "Mike Johnson".to_string(),
            },
            match_confidence: 95,
        }
    }

    fn fast_settings() -> ChatSettings {
        ChatSettings {
            reply_delay_ms: 50,
            presence_interval_ms: 1000,
            online_probability: 0.9,
        }
    }

    #[tokio::test]
    async fn test_open_seeds_scripted_exchange() {
        let session = ChatSession::open(test_match(), fast_settings());
        let messages = session.messages().await;

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].sender, SenderRole::Finder);
        assert_eq!(
            messages[0].display_text(),
            "Hi! I found a Blue Backpack. Is this yours?"
        );
        assert_eq!(messages[1].sender, SenderRole::Owner);
        assert_eq!(messages[2].sender, SenderRole::Finder);
        assert!(messages[2].display_text().contains("Library 3rd floor"));
        // Seeded history is back-dated.
        assert!(messages[0].timestamp < messages[1].timestamp);
        assert!(messages[1].timestamp < messages[2].timestamp);
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_appends_then_delayed_reply() {
        let session = ChatSession::open(test_match(), fast_settings());

        session.send("Is the zipper broken?").await.unwrap();
        assert_eq!(session.message_count().await, 4);
        assert!(session.is_typing().await);
        assert_eq!(session.state().await, SessionState::AwaitingReply);

        tokio::time::sleep(Duration::from_millis(60)).await;

        let messages = session.messages().await;
        assert_eq!(messages.len(), 5);
        assert_eq!(messages[4].sender, SenderRole::Finder);
        assert!(CANNED_REPLIES.contains(&messages[4].display_text()));
        assert!(!session.is_typing().await);
        assert_eq!(session.state().await, SessionState::Idle);
    }

    #[tokio::test]
    async fn test_empty_message_rejected() {
        let session = ChatSession::open(test_match(), fast_settings());

        assert_eq!(
            session.send("   ").await.unwrap_err(),
            SessionError::EmptyMessage
        );
        assert_eq!(session.message_count().await, 3);
    }

    #[tokio::test]
    async fn test_share_contact_once() {
        let session = ChatSession::open(test_match(), fast_settings());

        assert!(session.share_contact().await.unwrap());
        assert!(!session.share_contact().await.unwrap());
        assert!(session.contact_shared().await);

        let markers = session
            .messages()
            .await
            .iter()
            .filter(|m| m.is_contact_marker())
            .count();
        assert_eq!(markers, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_session_rejects_send_and_drops_pending_reply() {
        let session = ChatSession::open(test_match(), fast_settings());

        session.send("See you at 5?").await.unwrap();
        session.mark_reunited().await;
        assert_eq!(session.state().await, SessionState::Closed);

        assert_eq!(
            session.send("hello?").await.unwrap_err(),
            SessionError::Closed
        );
        assert_eq!(
            session.share_contact().await.unwrap_err(),
            SessionError::Closed
        );

        // The in-flight reply timer was invalidated by the close.
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(session.message_count().await, 4);
    }

    #[tokio::test]
    async fn test_mark_reunited_idempotent() {
        let session = ChatSession::open(test_match(), fast_settings());
        session.mark_reunited().await;
        session.mark_reunited().await;
        assert_eq!(session.state().await, SessionState::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_presence_resamples_on_interval() {
        let mut settings = fast_settings();
        settings.online_probability = 0.0;
        let session = ChatSession::open(test_match(), settings);

        assert!(session.is_online().await);
        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(!session.is_online().await);
    }
}
