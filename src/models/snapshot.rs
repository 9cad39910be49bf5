//! Progress snapshot and import payload classification
//!
//! A snapshot is the serializable `(done, points)` pair used for export and
//! import. Import files carry no explicit marker, so the payload kind is
//! decided by shape inspection: an array whose first element looks like a
//! dataset section is a dataset replacement, everything else is treated as a
//! progress snapshot.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::problem::DatasetSection;

/// Serializable progress snapshot for export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub done: Vec<String>,
    pub points: f64,
}

/// Classified import payload
#[derive(Debug, Clone, PartialEq)]
pub enum ImportPayload {
    /// Full dataset replacement: ordered `{topic, items}` sections
    Dataset(Vec<DatasetSection>),
    /// Progress snapshot, kept as raw JSON so partial payloads can be
    /// partially applied (see `ProgressStore::import_snapshot`)
    Snapshot(Value),
}

/// Parse import file text and classify it by shape.
///
/// Returns an error only when the text is not valid JSON at all, or when a
/// dataset-shaped document fails to deserialize as sections.
pub fn classify_import(text: &str) -> Result<ImportPayload, serde_json::Error> {
    let value: Value = serde_json::from_str(text)?;
    if looks_like_dataset(&value) {
        let sections: Vec<DatasetSection> = serde_json::from_value(value)?;
        Ok(ImportPayload::Dataset(sections))
    } else {
        Ok(ImportPayload::Snapshot(value))
    }
}

fn looks_like_dataset(value: &Value) -> bool {
    value
        .as_array()
        .and_then(|arr| arr.first())
        .map(|first| first.get("topic").is_some() && first.get("items").is_some())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_dataset_shape() {
        let text = r#"[{"topic": "Arrays", "items": [
            {"id": "a", "title": "A", "link": "https://x/a", "difficulty": "Easy"}
        ]}]"#;
        match classify_import(text).unwrap() {
            ImportPayload::Dataset(sections) => {
                assert_eq!(sections.len(), 1);
                assert_eq!(sections[0].topic, "Arrays");
            }
            other => panic!("expected dataset, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_snapshot_shape() {
        let text = r#"{"done": ["a", "b"], "points": 30}"#;
        match classify_import(text).unwrap() {
            ImportPayload::Snapshot(value) => {
                assert_eq!(value["points"], 30);
            }
            other => panic!("expected snapshot, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_empty_array_is_snapshot() {
        // No first element to inspect, so it falls through to snapshot
        match classify_import("[]").unwrap() {
            ImportPayload::Snapshot(_) => {}
            other => panic!("expected snapshot, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_invalid_json() {
        assert!(classify_import("{ not json }").is_err());
    }

    #[test]
    fn test_classify_malformed_dataset_items() {
        // Dataset-shaped but items missing required fields
        let text = r#"[{"topic": "Arrays", "items": [{"id": "a"}]}]"#;
        assert!(classify_import(text).is_err());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let snap = Snapshot {
            done: vec!["two-sum".to_string()],
            points: 10.0,
        };
        let text = serde_json::to_string_pretty(&snap).unwrap();
        let back: Snapshot = serde_json::from_str(&text).unwrap();
        assert_eq!(back, snap);
    }
}
