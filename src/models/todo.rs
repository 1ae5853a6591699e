use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::timestamp;

pub const TITLE_MAX_LEN: usize = 200;
pub const DESCRIPTION_MAX_LEN: usize = 1000;

/// Declaration order follows `level()`, so the derived `Ord` ranks LOW < MEDIUM < HIGH.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn level(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Priority::High => "#FF0000",
            Priority::Medium => "#FFA500",
            Priority::Low => "#00FF00",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: u64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    pub priority: Priority,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "timestamp::rfc3339_option"
    )]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(with = "timestamp::rfc3339")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp::rfc3339")]
    pub updated_at: DateTime<Utc>,
    pub user_id: String,
}

impl Todo {
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }

    /// Refresh `updated_at`, always moving it strictly forward.
    pub fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        };
    }

    /// Overwrite every client-editable field. id, owner and created_at are left alone.
    pub fn apply(&mut self, req: TodoRequest) {
        self.title = req.title;
        self.description = req.description;
        self.completed = req.completed;
        self.priority = req.priority;
        self.due_date = req.due_date;
        self.touch();
    }
}

/// Body of `POST /todos` and `PUT /todos/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoRequest {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "timestamp::rfc3339_option"
    )]
    pub due_date: Option<DateTime<Utc>>,
}

impl TodoRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            completed: false,
            priority: Priority::default(),
            due_date: None,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("title must not be blank".to_string()));
        }
        if self.title.chars().count() > TITLE_MAX_LEN {
            return Err(AppError::Validation(format!(
                "title must be between 1 and {} characters",
                TITLE_MAX_LEN
            )));
        }
        if let Some(description) = &self.description {
            if description.chars().count() > DESCRIPTION_MAX_LEN {
                return Err(AppError::Validation(format!(
                    "description must be at most {} characters",
                    DESCRIPTION_MAX_LEN
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_todo() -> Todo {
        let now = Utc::now();
        Todo {
            id: 1,
            title: "Write report".to_string(),
            description: None,
            completed: false,
            priority: Priority::Medium,
            due_date: None,
            created_at: now,
            updated_at: now,
            user_id: "alice".to_string(),
        }
    }

    #[test]
    fn test_priority_levels_and_order() {
        assert_eq!(Priority::High.level(), 3);
        assert_eq!(Priority::Medium.level(), 2);
        assert_eq!(Priority::Low.level(), 1);
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
        assert_eq!(Priority::High.color(), "#FF0000");
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_priority_json_is_uppercase() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"HIGH\"");
        let parsed: Priority = serde_json::from_str("\"LOW\"").unwrap();
        assert_eq!(parsed, Priority::Low);
    }

    #[test]
    fn test_request_defaults() {
        let req: TodoRequest = serde_json::from_str(r#"{"title":"Buy milk"}"#).unwrap();
        assert_eq!(req.priority, Priority::Medium);
        assert!(!req.completed);
        assert!(req.description.is_none());
        assert!(req.due_date.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_request_rejects_null_priority() {
        let parsed = serde_json::from_str::<TodoRequest>(r#"{"title":"x","priority":null}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_validate_title_bounds() {
        assert!(TodoRequest::new("").validate().is_err());
        assert!(TodoRequest::new("   ").validate().is_err());
        assert!(TodoRequest::new("a".repeat(TITLE_MAX_LEN)).validate().is_ok());
        assert!(TodoRequest::new("a".repeat(TITLE_MAX_LEN + 1)).validate().is_err());
        // multi-byte characters count once
        assert!(TodoRequest::new("宿".repeat(TITLE_MAX_LEN)).validate().is_ok());
    }

    #[test]
    fn test_validate_description_length() {
        let mut req = TodoRequest::new("ok");
        req.description = Some("d".repeat(DESCRIPTION_MAX_LEN));
        assert!(req.validate().is_ok());
        req.description = Some("d".repeat(DESCRIPTION_MAX_LEN + 1));
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_touch_moves_forward() {
        let mut todo = sample_todo();
        todo.updated_at = Utc::now() + Duration::seconds(60);
        let before = todo.updated_at;
        todo.touch();
        assert!(todo.updated_at > before);
    }

    #[test]
    fn test_json_field_names() {
        let todo = sample_todo();
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["userId"], "alice");
        assert_eq!(json["priority"], "MEDIUM");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("dueDate").is_none());
        assert!(json.get("description").is_none());
    }
}
