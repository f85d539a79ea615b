//! Reunite - in-memory matching and handover engine for a campus
//! lost-and-found board.
//!
//! This library holds the decision logic behind the board: an append-only
//! item registry, a naive name-overlap match engine with randomized
//! confidence, and timer-driven chat sessions where a finder and an owner
//! negotiate the handover. Everything lives in one process's transient
//! memory; there is no persistence and no network transport.

pub mod app;
pub mod auth;
pub mod chat;
pub mod config;
pub mod core;
pub mod models;

// Re-export commonly used types
pub use crate::app::{App, SubmitError};
pub use crate::auth::{AuthError, CredentialVerifier, Credentials, FixedCredentialVerifier};
pub use crate::chat::{ChatSession, SessionError, SessionState};
pub use crate::core::{ConfidenceRange, ItemRegistry, MatchCandidate, Matcher};
pub use crate::models::{
    BoardSnapshot, ChatMessage, FoundItem, FoundItemDraft, LostItem, LostItemDraft,
    MatchNotification, MatchedItem, MessageBody, SenderRole,
};
