use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::{FoundItem, LostItem, MatchedItem};

/// Everything the admin view needs: the three board lists in insertion
/// order, plus counts for the tab headers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSnapshot {
    #[serde(rename = "lostItems")]
    pub lost_items: Vec<LostItem>,
    #[serde(rename = "foundItems")]
    pub found_items: Vec<FoundItem>,
    #[serde(rename = "matchedItems")]
    pub matched_items: Vec<MatchedItem>,
    #[serde(rename = "lostCount")]
    pub lost_count: usize,
    #[serde(rename = "foundCount")]
    pub found_count: usize,
    #[serde(rename = "matchedCount")]
    pub matched_count: usize,
}

/// Delivered on the notification channel when a delayed scan finds a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchNotification {
    #[serde(rename = "match")]
    pub matched: MatchedItem,
    #[serde(rename = "detectedAt")]
    pub detected_at: DateTime<Utc>,
}

/// Point-in-time view of a chat session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(rename = "matchId")]
    pub match_id: String,
    pub closed: bool,
    #[serde(rename = "messageCount")]
    pub message_count: usize,
    #[serde(rename = "contactShared")]
    pub contact_shared: bool,
    pub online: bool,
}
