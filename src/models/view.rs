use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::timestamp;
use crate::models::{Priority, Todo};

/// List entry returned by `GET /todos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoSummary {
    pub id: u64,
    pub title: String,
    pub completed: bool,
    pub priority: Priority,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "timestamp::rfc3339_option"
    )]
    pub due_date: Option<DateTime<Utc>>,
}

impl From<Todo> for TodoSummary {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            completed: todo.completed,
            priority: todo.priority,
            due_date: todo.due_date,
        }
    }
}

/// Full representation for single-item responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoDetail {
    #[serde(flatten)]
    pub todo: Todo,
    pub priority_level: u8,
    pub priority_color: String,
}

impl From<Todo> for TodoDetail {
    fn from(todo: Todo) -> Self {
        Self {
            priority_level: todo.priority.level(),
            priority_color: todo.priority.color().to_string(),
            todo,
        }
    }
}
