//! Driving port for user lookups.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserQuery: Send + Sync {
    /// Fetch a user with their remaining budget.
    async fn get_user(&self, id: &UserId) -> Result<User, Error>;
}
