// Core algorithm exports
pub mod ids;
pub mod matcher;
pub mod registry;

pub use ids::IdGenerator;
pub use matcher::{ConfidenceRange, MatchCandidate, Matcher};
pub use registry::ItemRegistry;
