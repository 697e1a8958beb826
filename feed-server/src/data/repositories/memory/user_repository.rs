use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;

use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::user::{UNASSIGNED_USER_ID, User};

#[derive(Debug, Default)]
pub(crate) struct InMemoryUserRepository {
    table: Mutex<UserTable>,
}

impl InMemoryUserRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Default)]
struct UserTable {
    users: HashMap<i64, User>,
    last_assigned_id: i64,
}

impl UserTable {
    fn id_of(&self, username: &str) -> Option<i64> {
        self.users
            .values()
            .find(|user| user.username == username)
            .map(|user| user.id)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let table = self.table.lock().await;
        Ok(table.users.get(&id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let table = self.table.lock().await;
        Ok(table
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn save(&self, mut user: User) -> Result<User, DomainError> {
        let mut table = self.table.lock().await;

        if let Some(owner) = table.id_of(&user.username)
            && owner != user.id
        {
            return Err(DomainError::AlreadyExists("username".to_string()));
        }

        if user.id <= UNASSIGNED_USER_ID {
            let id = table
                .last_assigned_id
                .checked_add(1)
                .ok_or_else(|| DomainError::Unexpected("user id space exhausted".to_string()))?;
            table.last_assigned_id = id;
            user.id = id;
            info!(user_id = user.id, username = %user.username, "user registered");
        } else if !table.users.contains_key(&user.id) {
            return Err(DomainError::NotFound(format!("user id: {}", user.id)));
        }

        table.users.insert(user.id, user.clone());
        Ok(user)
    }
}
