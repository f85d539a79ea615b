use rand::Rng;

use crate::models::{FoundItem, LostItem};

/// Inclusive confidence percentage range for synthesized matches.
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceRange {
    pub min: u8,
    pub max: u8,
}

impl Default for ConfidenceRange {
    fn default() -> Self {
        Self { min: 80, max: 100 }
    }
}

/// A lost item paired to a new found item, before the match is recorded.
#[derive(Debug, Clone)]
pub struct MatchCandidate {
    pub lost_item: LostItem,
    pub confidence: u8,
}

/// Naive name-overlap match engine.
///
/// The heuristic is deliberately thin: the lower-cased first whitespace
/// token of the found item's name is looked for as a substring in each
/// lost item's name, and the first textual hit wins. Confidence is drawn
/// uniformly from the configured range and is not grounded in any item
/// attribute. No retry, no re-scan, no invalidation.
#[derive(Debug, Clone)]
pub struct Matcher {
    confidence: ConfidenceRange,
}

impl Matcher {
    pub fn new(confidence: ConfidenceRange) -> Self {
        Self { confidence }
    }

    pub fn with_default_range() -> Self {
        Self {
            confidence: ConfidenceRange::default(),
        }
    }

    /// Scan the lost-item list (in insertion order) for a naive name
    /// overlap with the newly found item.
    ///
    /// Returns `None` when the list is empty or no lost item's name
    /// contains the found name's first token, case-insensitively.
    pub fn try_match(&self, found: &FoundItem, lost_items: &[LostItem]) -> Option<MatchCandidate> {
        let token = found
            .item_name
            .split_whitespace()
            .next()?
            .to_lowercase();

        let hit = lost_items
            .iter()
            .find(|lost| lost.item_name.to_lowercase().contains(&token))?;

        let confidence =
            rand::thread_rng().gen_range(self.confidence.min..=self.confidence.max);

        Some(MatchCandidate {
            lost_item: hit.clone(),
            confidence,
        })
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_range()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn lost(id: &str, name: &str) -> LostItem {
        LostItem {
            id: id.to_string(),
            item_name: name.to_string(),
            description: format!("{} description", name),
            location: Some("Library 3rd floor".to_string()),
            date: NaiveDate::from_ymd_opt(2025, 10, 28).unwrap(),
            time: None,
            image: None,
            reported_by: "John Doe".to_string(),
        }
    }

    fn found(name: &str) -> FoundItem {
        FoundItem {
            id: "f1".to_string(),
            item_name: name.to_string(),
            description: format!("{} found near study area", name),
            location: "Library 3rd floor".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 10, 28).unwrap(),
            time: NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
            image: "img-001".to_string(),
            found_by: "Mike Johnson".to_string(),
        }
    }

    #[test]
    fn test_exact_name_matches() {
        let matcher = Matcher::with_default_range();
        let lost_items = vec![lost("1", "Blue Backpack")];

        let candidate = matcher.try_match(&found("Blue Backpack"), &lost_items);

        let candidate = candidate.expect("expected a match");
        assert_eq!(candidate.lost_item.id, "1");
        assert!(candidate.confidence >= 80 && candidate.confidence <= 100);
    }

    #[test]
    fn test_first_token_only() {
        let matcher = Matcher::with_default_range();
        // "blue" is the token; the second word never participates.
        let lost_items = vec![lost("1", "Light Blue Umbrella")];

        assert!(matcher
            .try_match(&found("Blue Backpack"), &lost_items)
            .is_some());
    }

    #[test]
    fn test_case_insensitive() {
        let matcher = Matcher::with_default_range();
        let lost_items = vec![lost("1", "IPHONE 13")];

        assert!(matcher.try_match(&found("iphone found"), &lost_items).is_some());
    }

    #[test]
    fn test_first_hit_wins_in_list_order() {
        let matcher = Matcher::with_default_range();
        let lost_items = vec![lost("1", "Blue Backpack"), lost("2", "Blue Bottle")];

        let candidate = matcher
            .try_match(&found("Blue Backpack"), &lost_items)
            .unwrap();
        assert_eq!(candidate.lost_item.id, "1");
    }

    #[test]
    fn test_no_hit_yields_none() {
        let matcher = Matcher::with_default_range();
        let lost_items = vec![lost("1", "Blue Backpack"), lost("2", "iPhone 13")];

        assert!(matcher.try_match(&found("Umbrella"), &lost_items).is_none());
    }

    #[test]
    fn test_empty_registry_yields_none() {
        let matcher = Matcher::with_default_range();
        assert!(matcher.try_match(&found("Blue Backpack"), &[]).is_none());
    }

    #[test]
    fn test_blank_name_yields_none() {
        let matcher = Matcher::with_default_range();
        let lost_items = vec![lost("1", "Blue Backpack")];

        assert!(matcher.try_match(&found("   "), &lost_items).is_none());
    }

    #[test]
    fn test_confidence_within_custom_range() {
        let matcher = Matcher::new(ConfidenceRange { min: 90, max: 90 });
        let lost_items = vec![lost("1", "Blue Backpack")];

        let candidate = matcher
            .try_match(&found("Blue Backpack"), &lost_items)
            .unwrap();
        assert_eq!(candidate.confidence, 90);
    }
}
