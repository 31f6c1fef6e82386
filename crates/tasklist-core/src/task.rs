use serde::{Deserialize, Serialize};

use crate::TasklistError;

/// A single todo entry. `id` is assigned by the server and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTask {
    pub title: String,
}

impl CreateTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// The title with surrounding whitespace removed, or an error if nothing is left.
    pub fn validated_title(&self) -> Result<String, TasklistError> {
        validate_title(&self.title)
    }
}

pub fn validate_title(raw: &str) -> Result<String, TasklistError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(TasklistError::InvalidInput("title required".into()));
    }
    Ok(title.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_trims_surrounding_whitespace() {
        assert_eq!(validate_title("  Buy milk \n").unwrap(), "Buy milk");
    }

    #[test]
    fn validate_rejects_blank_titles() {
        for raw in ["", "   ", "\t\n"] {
            assert!(matches!(
                validate_title(raw),
                Err(TasklistError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn blank_title_error_message() {
        let err = CreateTask::new("  ").validated_title().unwrap_err();
        assert_eq!(err.to_string(), "invalid input: title required");
    }

    #[test]
    fn validate_keeps_inner_whitespace() {
        assert_eq!(validate_title(" a  b ").unwrap(), "a  b");
    }

    #[test]
    fn task_deserializes_without_completed_flag() {
        let task: Task = serde_json::from_str(r#"{"id": 3, "title": "x"}"#).unwrap();
        assert_eq!(task.id, 3);
        assert!(!task.completed);
    }

    #[test]
    fn task_serializes_wire_field_names() {
        let task = Task {
            id: 1,
            title: "Task 1".into(),
            completed: true,
        };
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "id": 1, "title": "Task 1", "completed": true })
        );
    }
}
