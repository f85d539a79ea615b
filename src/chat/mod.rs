// Chat session exports
pub mod session;

pub use session::{ChatSession, SessionError, SessionState};
