use chrono::Utc;

/// Millisecond-timestamp identifier source.
///
/// Identifiers are the submission time in Unix milliseconds, rendered as a
/// decimal string. Two submissions landing in the same millisecond bump
/// past the last issued value, so identifiers stay unique and strictly
/// increasing within one generator.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        self.last = if now > self.last { now } else { self.last + 1 };
        self.last.to_string()
    }
}
