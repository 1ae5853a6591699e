use chrono::{DateTime, Utc};

use crate::models::{Priority, Todo};

/// Optional list criteria. Unset fields accept every todo.
#[derive(Debug, Clone, Default)]
pub struct TodoFilter {
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    pub due_before: Option<DateTime<Utc>>,
    pub due_after: Option<DateTime<Utc>>,
    pub search: Option<String>,
}

impl TodoFilter {
    pub fn matches(&self, todo: &Todo) -> bool {
        if let Some(completed) = self.completed {
            if todo.completed != completed {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if todo.priority != priority {
                return false;
            }
        }
        if let Some(before) = self.due_before {
            if !todo.due_date.is_some_and(|due| due < before) {
                return false;
            }
        }
        if let Some(after) = self.due_after {
            if !todo.due_date.is_some_and(|due| due > after) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let in_title = todo.title.to_lowercase().contains(&needle);
            let in_description = todo
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle));
            if !in_title && !in_description {
                return false;
            }
        }
        true
    }
}

/// Visibility predicate every store operation runs through: the caller's own
/// todos, narrowed by `filter`.
pub fn visible_to<'a>(user_id: &'a str, filter: &'a TodoFilter) -> impl Fn(&Todo) -> bool + 'a {
    move |todo: &Todo| todo.is_owned_by(user_id) && filter.matches(todo)
}
