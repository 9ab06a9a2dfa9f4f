//! `UserRepository` implementation for the in-memory store.

use async_trait::async_trait;

use super::{InMemoryStore, read, write};
use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId};

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: NewUser) -> Result<User, UserPersistenceError> {
        let mut table = write(&self.users).map_err(UserPersistenceError::query)?;
        let mut id = UserId::random();
        while table.contains(&id) {
            id = UserId::random();
        }
        let stored = User::new(id, user);
        table.push(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let table = read(&self.users).map_err(UserPersistenceError::query)?;
        Ok(table.get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserPersistenceError> {
        let table = read(&self.users).map_err(UserPersistenceError::query)?;
        Ok(table
            .rows
            .iter()
            .find(|user| user.username().as_ref() == username)
            .cloned())
    }
}
