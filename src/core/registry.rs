use crate::core::ids::IdGenerator;
use crate::core::matcher::MatchCandidate;
use crate::models::{
    BoardSnapshot, FoundItem, FoundItemDraft, LostItem, LostItemDraft, MatchedItem,
};

/// In-memory board registry.
///
/// Append-only: items gain a fresh identifier on insertion and are never
/// updated or deleted. Insertion order is display order. Required-field
/// presence is the caller's responsibility; the registry does no
/// validation and no deduplication.
#[derive(Debug, Default)]
pub struct ItemRegistry {
    lost: Vec<LostItem>,
    found: Vec<FoundItem>,
    matched: Vec<MatchedItem>,
    ids: IdGenerator,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_lost_item(&mut self, draft: LostItemDraft) -> LostItem {
        let item = LostItem {
            id: self.ids.next_id(),
            item_name: draft.item_name,
            description: draft.description,
            location: draft.location,
            date: draft.date,
            time: draft.time,
            image: draft.image,
            reported_by: draft.reported_by,
        };
        self.lost.push(item.clone());
        item
    }

    pub fn add_found_item(&mut self, draft: FoundItemDraft) -> FoundItem {
        let item = FoundItem {
            id: self.ids.next_id(),
            item_name: draft.item_name,
            description: draft.description,
            location: draft.location,
            date: draft.date,
            time: draft.time,
            image: draft.image,
            found_by: draft.found_by,
        };
        self.found.push(item.clone());
        item
    }

    /// Record a match produced by the scan. The embedded items are
    /// snapshots of records that existed at match time.
    pub fn record_match(&mut self, candidate: MatchCandidate, found: FoundItem) -> MatchedItem {
        let matched = MatchedItem {
            id: self.ids.next_id(),
            lost_item: candidate.lost_item,
            found_item: found,
            match_confidence: candidate.confidence,
        };
        self.matched.push(matched.clone());
        matched
    }

    pub fn lost_items(&self) -> &[LostItem] {
        &self.lost
    }

    pub fn found_items(&self) -> &[FoundItem] {
        &self.found
    }

    pub fn matched_items(&self) -> &[MatchedItem] {
        &self.matched
    }

    /// Clone out the full board for the admin view.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            lost_count: self.lost.len(),
            found_count: self.found.len(),
            matched_count: self.matched.len(),
            lost_items: self.lost.clone(),
            found_items: self.found.clone(),
            matched_items: self.matched.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn lost_draft(name: &str) -> LostItemDraft {
        LostItemDraft {
            item_name: name.to_string(),
            description: format!("{} description", name),
            location: None,
            date: NaiveDate::from_ymd_opt(2025, 10, 28).unwrap(),
            time: None,
            image: None,
            reported_by: "John Doe".to_string(),
        }
    }

    fn found_draft(name: &str) -> FoundItemDraft {
        FoundItemDraft {
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
    fn test_append_grows_by_one_with_unique_id() {
        let mut registry = ItemRegistry::new();

        let first = registry.add_lost_item(lost_draft("Blue Backpack"));
        assert_eq!(registry.lost_items().len(), 1);

        let second = registry.add_lost_item(lost_draft("iPhone 13"));
        assert_eq!(registry.lost_items().len(), 2);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_insertion_order_is_display_order() {
        let mut registry = ItemRegistry::new();
        registry.add_lost_item(lost_draft("Blue Backpack"));
        registry.add_lost_item(lost_draft("iPhone 13"));

        let names: Vec<&str> = registry
            .lost_items()
            .iter()
            .map(|i| i.item_name.as_str())
            .collect();
        assert_eq!(names, vec!["Blue Backpack", "iPhone 13"]);
    }

    #[test]
    fn test_ids_unique_across_lists() {
        let mut registry = ItemRegistry::new();
        let lost = registry.add_lost_item(lost_draft("Blue Backpack"));
        let found = registry.add_found_item(found_draft("Blue Backpack"));

        assert_ne!(lost.id, found.id);
    }

    #[test]
    fn test_record_match_snapshot() {
        let mut registry = ItemRegistry::new();
        let lost = registry.add_lost_item(lost_draft("Blue Backpack"));
        let found = registry.add_found_item(found_draft("Blue Backpack"));

        let matched = registry.record_match(
            MatchCandidate {
                lost_item: lost.clone(),
                confidence: 95,
            },
            found.clone(),
        );

        assert_eq!(registry.matched_items().len(), 1);
        assert_eq!(matched.lost_item.id, lost.id);
        assert_eq!(matched.found_item.id, found.id);
        assert_eq!(matched.match_confidence, 95);

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.lost_count, 1);
        assert_eq!(snapshot.found_count, 1);
        assert_eq!(snapshot.matched_count, 1);
    }
}
