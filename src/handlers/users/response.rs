//! User response DTOs

use serde::Serialize;

pub use crate::handlers::auth::UserResponse;

/// `/users/get` returns one user when a target is set and every user otherwise
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum UsersResponse {
    One(UserResponse),
    All(Vec<UserResponse>),
}

/// Profile update response
#[derive(Debug, Serialize)]
pub struct UpdateUserResponse {
    pub user: UserResponse,
}
