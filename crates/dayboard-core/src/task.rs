use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task priority. Ordering rank puts `High` first so that an ascending
/// priority sort reads High, Normal, Low.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
}

impl Priority {
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::Normal => 2,
            Priority::Low => 3,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::Low => "Low",
            Priority::Normal => "Normal",
            Priority::High => "High",
        };
        f.write_str(label)
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Priority::Low),
            "Normal" => Ok(Priority::Normal),
            "High" => Ok(Priority::High),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

/// A task document as it lives in the remote store. Field names and the
/// epoch-millisecond timestamps match the store's JSON wire shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Store-assigned identifier; immutable once created.
    pub id: String,

    pub text: String,

    #[serde(default)]
    pub priority: Priority,

    /// Identifier of the session user who created the task; set once.
    #[serde(rename = "userId")]
    pub owner: String,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,

    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub deadline: Option<DateTime<Utc>>,
}

/// Create payload. The store assigns the id; the client never generates one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub text: String,
    pub priority: Priority,
    #[serde(rename = "userId")]
    pub owner: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub deadline: Option<DateTime<Utc>>,
}

/// Partial update merged into an existing document. Absent fields are left
/// untouched by the store.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub deadline: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn task_wire_shape_matches_store_documents() {
        let created = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).single().expect("valid date");
        let task = Task {
            id: "a1b2c3".to_string(),
            text: "Buy groceries".to_string(),
            priority: Priority::High,
            owner: "uid-42".to_string(),
            created_at: created,
            deadline: None,
        };

        let value = serde_json::to_value(&task).expect("serialize task");
        assert_eq!(value["userId"], "uid-42");
        assert_eq!(value["createdAt"], created.timestamp_millis());
        assert_eq!(value["priority"], "High");
        assert!(value["deadline"].is_null());
    }

    #[test]
    fn task_deserializes_with_absent_deadline_and_priority() {
        let raw = r#"{
            "id": "doc-1",
            "text": "Call dentist",
            "userId": "uid-7",
            "createdAt": 1767225600000
        }"#;

        let task: Task = serde_json::from_str(raw).expect("deserialize task");
        assert_eq!(task.priority, Priority::Normal);
        assert!(task.deadline.is_none());
        assert_eq!(task.owner, "uid-7");
    }

    #[test]
    fn patch_skips_absent_fields() {
        let patch = TaskPatch {
            text: Some("Renamed".to_string()),
            ..TaskPatch::default()
        };

        let value = serde_json::to_value(&patch).expect("serialize patch");
        let object = value.as_object().expect("patch is an object");
        assert_eq!(object.len(), 1);
        assert_eq!(object["text"], "Renamed");
    }

    #[test]
    fn priority_round_trips_through_display_and_from_str() {
        for priority in [Priority::Low, Priority::Normal, Priority::High] {
            let parsed: Priority = priority.to_string().parse().expect("parse priority");
            assert_eq!(parsed, priority);
        }
        assert!("Urgent".parse::<Priority>().is_err());
    }
}
