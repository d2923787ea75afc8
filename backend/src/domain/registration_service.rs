//! User registration, lookup and event nomination.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, error, info};

use crate::domain::ports::{
    EventRepository, EventRepositoryError, NominateEventRequest, RegisterUserRequest,
    RegistrationCommand, UserQuery, UserRepository, UserRepositoryError,
};
use crate::domain::{
    EntityKind, Error, EventId, EventValidationError, RankedEvent, User, UserId, UserProfile,
    UserValidationError,
};

fn map_user_error(error: UserRepositoryError) -> Error {
    error!(%error, "user store operation failed");
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user store error: {message}"))
        }
    }
}

fn map_event_error(error: EventRepositoryError) -> Error {
    error!(%error, "event store operation failed");
    match error {
        EventRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("event store unavailable: {message}"))
        }
        EventRepositoryError::Query { message } => {
            Error::internal(format!("event store error: {message}"))
        }
    }
}

fn invalid_field(field: &'static str, message: String) -> Error {
    debug!(field, %message, "rejected registration request");
    Error::request_not_valid(message).with_details(json!({
        "field": field,
        "code": "invalid_field",
    }))
}

fn map_profile_error(error: UserValidationError) -> Error {
    invalid_field(error.field(), error.to_string())
}

fn map_nomination_error(error: EventValidationError) -> Error {
    invalid_field(error.field(), error.to_string())
}

/// Service implementing [`RegistrationCommand`] and [`UserQuery`].
#[derive(Clone)]
pub struct RegistrationService<U, E> {
    user_repo: Arc<U>,
    event_repo: Arc<E>,
    default_vote_budget: u32,
}

impl<U, E> RegistrationService<U, E> {
    /// Create a service granting `default_vote_budget` to registrations that
    /// do not ask for a budget.
    pub fn new(user_repo: Arc<U>, event_repo: Arc<E>, default_vote_budget: u32) -> Self {
        Self {
            user_repo,
            event_repo,
            default_vote_budget,
        }
    }
}

impl<U, E> RegistrationService<U, E>
where
    U: UserRepository,
{
    async fn require_user(&self, id: &UserId) -> Result<User, Error> {
        self.user_repo
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| {
                debug!(user = %id, "unknown user");
                Error::unknown_entity(EntityKind::User, id)
            })
    }
}

#[async_trait]
impl<U, E> RegistrationCommand for RegistrationService<U, E>
where
    U: UserRepository,
    E: EventRepository,
{
    async fn register_user(&self, request: RegisterUserRequest) -> Result<User, Error> {
        let profile = UserProfile::new(request.profile).map_err(map_profile_error)?;
        let budget = request.vote_budget.unwrap_or(self.default_vote_budget);
        let user = User::new(UserId::random(), profile, budget);

        self.user_repo.save(&user).await.map_err(map_user_error)?;
        info!(user = %user.id(), budget, "user registered");
        Ok(user)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), Error> {
        let removed = self.user_repo.delete(id).await.map_err(map_user_error)?;
        if !removed {
            debug!(user = %id, "delete rejected: unknown user");
            return Err(Error::unknown_entity(EntityKind::User, id));
        }
        info!(user = %id, "user deleted");
        Ok(())
    }

    async fn nominate_event(&self, request: NominateEventRequest) -> Result<RankedEvent, Error> {
        let NominateEventRequest {
            name,
            keyword,
            owner,
        } = request;
        let event = RankedEvent::nominate(EventId::random(), name, keyword, owner)
            .map_err(map_nomination_error)?;
        self.require_user(&owner).await?;

        self.event_repo
            .save(&event)
            .await
            .map_err(map_event_error)?;
        info!(event = %event.id(), owner = %owner, name = event.name(), "event nominated");
        Ok(event)
    }
}

#[async_trait]
impl<U, E> UserQuery for RegistrationService<U, E>
where
    U: UserRepository,
    E: EventRepository,
{
    async fn get_user(&self, id: &UserId) -> Result<User, Error> {
        self.require_user(id).await
    }
}

#[cfg(test)]
#[path = "registration_service_tests.rs"]
mod tests;
