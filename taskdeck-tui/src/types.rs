use serde::{Deserialize, Serialize};
use time::Date;

/// Workflow state of a task, serialized with the labels the API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum TaskStatus {
    #[default]
    #[serde(alias = "pending")]
    Pending,
    #[serde(rename = "In Progress", alias = "in-progress", alias = "in progress")]
    InProgress,
    #[serde(alias = "completed")]
    Completed,
}

impl TaskStatus {
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }

    pub fn next(self) -> Self {
        match self {
            TaskStatus::Pending => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Pending,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            TaskStatus::Pending => TaskStatus::Completed,
            TaskStatus::InProgress => TaskStatus::Pending,
            TaskStatus::Completed => TaskStatus::InProgress,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A task as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(with = "crate::time_utils::due_date")]
    pub due_date: Date,
}

impl Task {
    pub fn fields(&self) -> TaskFields {
        TaskFields {
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
            due_date: self.due_date,
        }
    }
}

/// The mutable part of a task, sent on create and update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFields {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    #[serde(with = "crate::time_utils::due_date")]
    pub due_date: Date,
}

/// Email/password pair submitted to the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn task_parses_mongo_style_id_and_timestamp_due_date() {
        let raw = r#"{
            "_id": "65a1",
            "title": "Write report",
            "description": "quarterly",
            "status": "In Progress",
            "dueDate": "2024-03-05T00:00:00.000Z"
        }"#;

        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.id, "65a1");
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.due_date, date!(2024 - 03 - 05));
    }

    #[test]
    fn task_accepts_plain_id_and_missing_optional_fields() {
        let raw = r#"{"id": "7", "title": "A", "dueDate": "2024-01-01"}"#;

        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.id, "7");
        assert_eq!(task.description, "");
        assert_eq!(task.status, TaskStatus::Pending);
    }

    #[test]
    fn fields_serialize_with_api_names() {
        let fields = TaskFields {
            title: "A".to_string(),
            description: "d".to_string(),
            status: TaskStatus::InProgress,
            due_date: date!(2024 - 01 - 01),
        };

        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "A",
                "description": "d",
                "status": "In Progress",
                "dueDate": "2024-01-01"
            })
        );
    }

    #[test]
    fn status_cycles_through_all_values() {
        let mut status = TaskStatus::Pending;
        for expected in [
            TaskStatus::InProgress,
            TaskStatus::Completed,
            TaskStatus::Pending,
        ] {
            status = status.next();
            assert_eq!(status, expected);
        }
        assert_eq!(TaskStatus::Pending.previous(), TaskStatus::Completed);
    }
}
