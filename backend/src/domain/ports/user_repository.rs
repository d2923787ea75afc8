//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Insert or update a user record.
    async fn save(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Remove a user together with the events they nominated and any slot
    /// those events hold. Vote and trade history is kept.
    ///
    /// Returns `false` when no such user exists.
    async fn delete(&self, id: &UserId) -> Result<bool, UserRepositoryError>;
}
