//! Memory records and the wire shapes used by the persistence service.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::dates::iso_key;

/// One memory as held in application state.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    /// Opaque id assigned by the persistence service on creation.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Hosted image URLs; order is carousel display order.
    pub images: Vec<String>,
    /// When the memory occurred (not when it was saved).
    pub date: NaiveDate,
    /// Canonical `YYYY-MM-DD` join key against the timeline strip.
    pub iso: String,
}

/// Row shape on the wire. Id and timestamps are service-assigned.
#[derive(Clone, Debug, Deserialize)]
pub struct RecordRow {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
    pub memory_date: NaiveDate,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl From<RecordRow> for Record {
    fn from(row: RecordRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            images: row.image_urls,
            iso: iso_key(row.memory_date),
            date: row.memory_date,
        }
    }
}

/// Mutable fields sent to the service on create and on update.
///
/// Create is a whole-record insert, update a whole replacement of these
/// fields; the service never receives id or timestamps from us.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecordPayload {
    pub title: String,
    pub description: String,
    pub image_urls: Vec<String>,
    pub memory_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_row_normalizes_date() {
        let row: RecordRow = serde_json::from_str(
            r#"{
                "id": "abc-1",
                "title": "Trip",
                "description": "Fun",
                "image_urls": ["https://img/a.jpg", "https://img/b.jpg"],
                "memory_date": "2025-07-30",
                "created_at": "2025-07-31T10:00:00Z"
            }"#,
        )
        .unwrap();
        let record = Record::from(row);
        assert_eq!(record.iso, "2025-07-30");
        assert_eq!(record.images.len(), 2);
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2025, 7, 30).unwrap());
    }

    #[test]
    fn test_row_tolerates_missing_optional_fields() {
        let row: RecordRow = serde_json::from_str(
            r#"{"id": "x", "title": "T", "memory_date": "2024-12-01"}"#,
        )
        .unwrap();
        assert!(row.image_urls.is_empty());
        assert!(row.description.is_empty());
        assert!(row.created_at.is_none());
    }

    #[test]
    fn test_payload_wire_field_names() {
        let payload = RecordPayload {
            title: "Trip".into(),
            description: "Fun".into(),
            image_urls: vec!["https://img/a.jpg".into()],
            memory_date: NaiveDate::from_ymd_opt(2025, 7, 30).unwrap(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["title"], "Trip");
        assert_eq!(value["image_urls"][0], "https://img/a.jpg");
        assert_eq!(value["memory_date"], "2025-07-30");
    }
}
