use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// A report of a missing belonging filed by its owner.
///
/// Immutable once created; held only in the in-memory registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LostItem {
    pub id: String,
    #[serde(rename = "itemName")]
    pub item_name: String,
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub time: Option<NaiveTime>,
    /// Opaque image reference. Never decoded or validated.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(rename = "reportedBy")]
    pub reported_by: String,
}

/// A report of a recovered belonging filed by the finder.
///
/// All fields are mandatory, image reference included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoundItem {
    pub id: String,
    #[serde(rename = "itemName")]
    pub item_name: String,
    pub description: String,
    pub location: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub image: String,
    #[serde(rename = "foundBy")]
    pub found_by: String,
}

/// A heuristically paired (lost item, found item) with a confidence score.
///
/// Created only as a side effect of a found-item submission; the embedded
/// items are snapshots taken at match time and are never recomputed or
/// invalidated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedItem {
    pub id: String,
    #[serde(rename = "lostItem")]
    pub lost_item: LostItem,
    #[serde(rename = "foundItem")]
    pub found_item: FoundItem,
    /// Integer percentage in [80, 100].
    #[serde(rename = "matchConfidence")]
    pub match_confidence: u8,
}

/// Which of the two match parties authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SenderRole {
    /// The party who reported the item lost.
    #[serde(rename = "lost")]
    Owner,
    /// The party who reported the item found.
    #[serde(rename = "found")]
    Finder,
}

/// Payload of a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum MessageBody {
    Text(String),
    /// Marker emitted when a party shares their contact details.
    Contact,
}

/// A single message inside an open chat session.
///
/// Exists only within the session tied to one [`MatchedItem`] and is
/// discarded when the session closes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub sender: SenderRole,
    #[serde(flatten)]
    pub body: MessageBody,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Text content for display; the contact marker renders as its label.
    pub fn display_text(&self) -> &str {
        match &self.body {
            MessageBody::Text(text) => text,
            MessageBody::Contact => "Contact Info Shared",
        }
    }

    pub fn is_contact_marker(&self) -> bool {
        matches!(self.body, MessageBody::Contact)
    }
}
