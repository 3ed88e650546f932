use super::MemoryStore;
use crate::domain::{Email, User};
use crate::ports::user_repository::{Result, UserRepository};
use async_trait::async_trait;

#[async_trait]
impl UserRepository for MemoryStore {
    /// Case-insensitive match through `Email`'s equality
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>> {
        let state = self.lock()?;
        Ok(state.users.iter().find(|u| &u.email == email).cloned())
    }

    async fn insert(&self, user: User) -> Result<()> {
        let mut state = self.lock()?;
        if state.users.iter().any(|u| u.email == user.email) {
            return Err(format!("duplicate email: {}", user.email.as_str()).into());
        }
        state.users.push(user);
        Ok(())
    }
}
