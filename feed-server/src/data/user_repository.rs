use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::user::User;

#[async_trait]
pub(crate) trait UserRepository: Send + Sync {
    async fn get_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;
    /// Inserts a user with an unassigned id, otherwise replaces the user
    /// stored under the same id. Returns the stored copy.
    async fn save(&self, user: User) -> Result<User, DomainError>;
}

#[async_trait]
impl<T: UserRepository + ?Sized> UserRepository for Arc<T> {
    async fn get_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        (**self).get_by_id(id).await
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        (**self).get_by_username(username).await
    }

    async fn save(&self, user: User) -> Result<User, DomainError> {
        (**self).save(user).await
    }
}
