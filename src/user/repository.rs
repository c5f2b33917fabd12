//! Storage port for users.

use crate::user::{NewUser, User, UserPatch};

pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised by a [`UserRepository`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("email {0:?} is already used by another user")]
    EmailTaken(String),
    #[error("user store lock is poisoned")]
    Poisoned,
}

/// Port for user persistence.
///
/// Absent users are `Ok(None)` or `Ok(false)`, never an error.
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    /// Every user, in insertion order.
    async fn list(&self) -> Result<Vec<User>>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>>;
    /// Store a new user under a freshly generated identifier.
    async fn create(&self, user: NewUser) -> Result<User>;
    /// Merge `patch` onto an existing user.
    async fn update(&self, id: &str, patch: UserPatch) -> Result<Option<User>>;
    /// Remove a user. Returns whether one was removed.
    async fn delete(&self, id: &str) -> Result<bool>;
}
