//! The activity record ingested and retained by the system.

use serde::{Deserialize, Serialize};

/// One observation of keyboard and mouse activity.
///
/// The date label is caller-supplied and carried opaquely — it is not
/// parsed, validated, or deduplicated. Records are immutable once appended
/// and have no identity beyond their position in the ring.
///
/// The serde field names are the wire and snapshot format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Caller-supplied date label, e.g. `"2024-03-01 12:00:00"`.
    pub date: String,
    /// Number of keyboard events observed.
    pub keyboard_events: u64,
    /// Number of mouse events observed.
    pub mouse_events: u64,
}

impl ActivityRecord {
    /// Creates a record from a date label and event counts.
    pub fn new(date: impl Into<String>, keyboard_events: u64, mouse_events: u64) -> Self {
        Self {
            date: date.into(),
            keyboard_events,
            mouse_events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let record = ActivityRecord::new("2024-03-01 12:00:00", 120, 45);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "date": "2024-03-01 12:00:00",
                "keyboard_events": 120,
                "mouse_events": 45,
            })
        );
    }

    #[test]
    fn test_decode_rejects_negative_counts() {
        let body = r#"{"date":"2024-03-01","keyboard_events":-3,"mouse_events":0}"#;
        assert!(serde_json::from_str::<ActivityRecord>(body).is_err());
    }
}
