//! Driving port for registering users and nominating events.

use async_trait::async_trait;

use crate::domain::{Error, RankedEvent, User, UserId, UserProfileDraft};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    pub profile: UserProfileDraft,
    /// Initial vote budget; the configured default applies when absent.
    pub vote_budget: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NominateEventRequest {
    pub name: String,
    pub keyword: String,
    pub owner: UserId,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationCommand: Send + Sync {
    /// Validate and store a new user under a fresh identifier.
    async fn register_user(&self, request: RegisterUserRequest) -> Result<User, Error>;

    /// Remove a user with their events and those events' slots.
    async fn delete_user(&self, id: &UserId) -> Result<(), Error>;

    /// Nominate an event with an empty tally for an existing owner.
    async fn nominate_event(&self, request: NominateEventRequest) -> Result<RankedEvent, Error>;
}
