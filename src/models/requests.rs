use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// Submission payload for a lost-item report.
///
/// Location, time, and image are optional for lost reports; the owner may
/// not know exactly where or when the item went missing.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LostItemDraft {
    #[validate(length(min = 1, message = "Item name is required"))]
    #[serde(alias = "item_name", rename = "itemName")]
    pub item_name: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub time: Option<NaiveTime>,
    #[serde(default)]
    pub image: Option<String>,
    #[validate(length(min = 1, message = "Your name is required"))]
    #[serde(alias = "reported_by", rename = "reportedBy")]
    pub reported_by: String,
}

/// Submission payload for a found-item report. Every field is required.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FoundItemDraft {
    #[validate(length(min = 1, message = "Item name is required"))]
    #[serde(alias = "item_name", rename = "itemName")]
    pub item_name: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[validate(length(min = 1, message = "Image is required"))]
    pub image: String,
    #[validate(length(min = 1, message = "Your name is required"))]
    #[serde(alias = "found_by", rename = "foundBy")]
    pub found_by: String,
}

/// Flatten validator output into the human-readable message list surfaced
/// to callers. Sorted so repeated validations report in a stable order.
pub fn flatten_errors(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();
    messages.sort();
    messages
}
