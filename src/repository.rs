use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::models::filter::visible_to;
use crate::models::{Todo, TodoFilter, TodoRequest};

/// In-memory todo store. Every lookup goes through the owner check, so a todo
/// belonging to someone else behaves exactly like a missing one.
pub struct TodoRepository {
    todos: RwLock<HashMap<u64, Todo>>,
    next_id: AtomicU64,
}

impl Default for TodoRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoRepository {
    pub fn new() -> Self {
        Self {
            todos: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Owner's todos matching `filter`, ordered by id.
    pub async fn list(&self, user_id: &str, filter: &TodoFilter) -> Vec<Todo> {
        let visible = visible_to(user_id, filter);
        let todos = self.todos.read().await;
        let mut found: Vec<Todo> = todos
            .values()
            .filter(|todo| visible(*todo))
            .cloned()
            .collect();
        found.sort_by_key(|todo| todo.id);
        debug!("listed {} todos for {}", found.len(), user_id);
        found
    }

    pub async fn find(&self, id: u64, user_id: &str) -> Option<Todo> {
        let todos = self.todos.read().await;
        todos
            .get(&id)
            .filter(|todo| todo.is_owned_by(user_id))
            .cloned()
    }

    pub async fn insert(&self, user_id: &str, req: TodoRequest) -> Todo {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();

        let todo = Todo {
            id,
            title: req.title,
            description: req.description,
            completed: req.completed,
            priority: req.priority,
            due_date: req.due_date,
            created_at: now,
            updated_at: now,
            user_id: user_id.to_string(),
        };

        self.todos.write().await.insert(id, todo.clone());
        info!("created todo {} for {}", id, user_id);
        todo
    }

    pub async fn update(&self, id: u64, user_id: &str, req: TodoRequest) -> Option<Todo> {
        let mut todos = self.todos.write().await;
        let current = todos.get_mut(&id).filter(|todo| todo.is_owned_by(user_id))?;
        current.apply(req);
        debug!("updated todo {}", id);
        Some(current.clone())
    }

    pub async fn toggle_complete(&self, id: u64, user_id: &str) -> Option<Todo> {
        let mut todos = self.todos.write().await;
        let current = todos.get_mut(&id).filter(|todo| todo.is_owned_by(user_id))?;
        current.completed = !current.completed;
        current.touch();
        debug!("todo {} completed={}", id, current.completed);
        Some(current.clone())
    }

    /// Returns false when nothing the caller owns was removed.
    pub async fn delete(&self, id: u64, user_id: &str) -> bool {
        let mut todos = self.todos.write().await;
        let owned = todos.get(&id).is_some_and(|todo| todo.is_owned_by(user_id));
        if owned {
            todos.remove(&id);
            info!("deleted todo {} for {}", id, user_id);
        }
        owned
    }
}
