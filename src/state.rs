use std::sync::Arc;

use crate::auth::IdentityProvider;
use crate::repository::TodoRepository;

#[derive(Clone)]
pub struct AppState {
    pub todos: Arc<TodoRepository>,
    pub identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            todos: Arc::new(TodoRepository::new()),
            identity,
        }
    }
}
