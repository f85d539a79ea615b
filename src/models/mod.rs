// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{ChatMessage, FoundItem, LostItem, MatchedItem, MessageBody, SenderRole};
pub use requests::{flatten_errors, FoundItemDraft, LostItemDraft};
pub use responses::{BoardSnapshot, MatchNotification, SessionSummary};
