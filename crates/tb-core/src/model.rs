//! # Records
//!
//! The shapes found in a ticket export document:
//!
//! ```text
//! { "tickets": [ { ..., "Comments": [ ... ] } ], "users": [ ... ] }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The whole export document. A missing array reads as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub tickets: Vec<Ticket>,
    #[serde(default)]
    pub users: Vec<User>,
}

/// A single support request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    /// Internal identifier, unique across the export.
    pub import_id: i64,

    /// User-facing sequential number. Drives default ordering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_number: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Open set of values; `open`, `closed` and `pending` are the common ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Numeric code, see [`crate::Priority`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<String>,

    /// Discussion entries, in export order.
    #[serde(
        rename = "Comments",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub comments: Option<Vec<Comment>>,

    /// Every other field of the source record.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Ticket {
    /// Ordering key: the ticket number, or 0 when it is missing.
    #[inline]
    pub fn sort_key(&self) -> i64 {
        self.ticket_number.unwrap_or(0)
    }

    #[inline]
    pub fn comment_count(&self) -> usize {
        self.comments.as_ref().map_or(0, Vec::len)
    }
}

/// One discussion entry. Owned by exactly one [`Ticket`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Structured action tag, e.g. a status transition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub import_id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// `"First Last"`, skipping whichever part the export left out.
    pub fn display_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ticket_keeps_unknown_fields() {
        let raw = json!({
            "import_id": 7,
            "ticket_number": 12,
            "status": "open",
            "source": "email",
            "tags": ["vpn"],
        });
        let ticket: Ticket = serde_json::from_value(raw).unwrap();
        assert_eq!(ticket.import_id, 7);
        assert_eq!(ticket.extra.get("source"), Some(&json!("email")));

        let back = serde_json::to_value(&ticket).unwrap();
        assert_eq!(back["tags"], json!(["vpn"]));
        assert_eq!(back["ticket_number"], json!(12));
    }

    #[test]
    fn test_null_fields_read_as_absent() {
        let raw = json!({
            "import_id": 1,
            "ticket_number": null,
            "assigned_to": null,
            "Comments": [{ "created_by": 3, "body": null }],
        });
        let ticket: Ticket = serde_json::from_value(raw).unwrap();
        assert_eq!(ticket.ticket_number, None);
        assert_eq!(ticket.assigned_to, None);
        assert_eq!(ticket.sort_key(), 0);
        assert_eq!(ticket.comment_count(), 1);
        assert_eq!(ticket.comments.unwrap()[0].body, None);
    }

    #[test]
    fn test_missing_comments_count_as_zero() {
        let ticket: Ticket = serde_json::from_value(json!({ "import_id": 1 })).unwrap();
        assert_eq!(ticket.comment_count(), 0);
        let out = serde_json::to_value(&ticket).unwrap();
        assert!(out.get("Comments").is_none());
    }

    #[test]
    fn test_dataset_missing_arrays_are_empty() {
        let data: Dataset = serde_json::from_str("{}").unwrap();
        assert!(data.tickets.is_empty());
        assert!(data.users.is_empty());
    }

    #[test]
    fn test_display_name_skips_missing_parts() {
        let full: User =
            serde_json::from_value(json!({ "import_id": 1, "first_name": "Ada", "last_name": "Lovelace" }))
                .unwrap();
        assert_eq!(full.display_name(), "Ada Lovelace");

        let first_only: User =
            serde_json::from_value(json!({ "import_id": 2, "first_name": "Grace" })).unwrap();
        assert_eq!(first_only.display_name(), "Grace");
    }
}
