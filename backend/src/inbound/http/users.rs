//! User registration handlers.
//!
//! ```text
//! POST   /api/v1/users {"userName":"ada","gender":"female","age":36,...}
//! GET    /api/v1/users/{userId}
//! DELETE /api/v1/users/{userId}
//! ```

use actix_web::{delete, get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::RegisterUserRequest;
use crate::domain::{User, UserId, UserProfileDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_uuid, FieldName};

/// Registration payload; `voteBudget` falls back to the configured default.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserBody {
    pub user_name: String,
    pub gender: String,
    pub age: u32,
    pub email: String,
    pub phone: String,
    pub vote_budget: Option<u32>,
}

/// Registered user with their remaining budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub user_name: String,
    pub gender: String,
    pub age: u32,
    pub email: String,
    pub phone: String,
    pub vote_budget: u32,
}

impl From<User> for UserBody {
    fn from(user: User) -> Self {
        let profile = user.profile();
        Self {
            id: user.id().to_string(),
            user_name: profile.name().to_owned(),
            gender: profile.gender().to_owned(),
            age: profile.age(),
            email: profile.email().to_owned(),
            phone: profile.phone().to_owned(),
            vote_budget: user.vote_budget(),
        }
    }
}

fn user_id_from_path(raw: &str) -> ApiResult<UserId> {
    Ok(UserId::from_uuid(parse_uuid(raw, FieldName::new("userId"))?))
}

/// Register a voter.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = RegisterUserBody,
    responses(
        (status = 201, description = "User registered", body = UserBody),
        (status = 400, description = "Invalid profile", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser"
)]
#[post("/users")]
pub async fn register_user(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterUserBody>,
) -> ApiResult<HttpResponse> {
    let RegisterUserBody {
        user_name,
        gender,
        age,
        email,
        phone,
        vote_budget,
    } = payload.into_inner();
    let user = state
        .registration
        .register_user(RegisterUserRequest {
            profile: UserProfileDraft {
                name: user_name,
                gender,
                age,
                email,
                phone,
            },
            vote_budget,
        })
        .await?;
    Ok(HttpResponse::Created().json(UserBody::from(user)))
}

/// Fetch a user and their remaining budget.
#[utoipa::path(
    get,
    path = "/api/v1/users/{userId}",
    params(("userId" = String, Path, format = "uuid")),
    responses(
        (status = 200, description = "User", body = UserBody),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{user_id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserBody>> {
    let id = user_id_from_path(&path)?;
    let user = state.users.get_user(&id).await?;
    Ok(web::Json(user.into()))
}

/// Delete a user with their nominated events and those events' slots.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{userId}",
    params(("userId" = String, Path, format = "uuid")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{user_id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = user_id_from_path(&path)?;
    state.registration.delete_user(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
