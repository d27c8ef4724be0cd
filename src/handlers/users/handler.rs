//! User handler implementations

use axum::{extract::State, Json};
use validator::Validate;

use crate::{auth::RequestContext, error::AppResult, services::UserService, state::AppState};

use super::{
    request::UpdateUserRequest,
    response::{UpdateUserResponse, UsersResponse},
};

/// Get the resolved target user, or all users for a superadmin without `?email=`
pub async fn get_users(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> AppResult<Json<UsersResponse>> {
    let response = UserService::get_users(state.db(), &ctx).await?;
    Ok(Json(response))
}

/// Update profile details
pub async fn update_user(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(payload): Json<UpdateUserRequest>,
) -> AppResult<Json<UpdateUserResponse>> {
    payload.validate()?;

    let response = UserService::update_user(state.db(), &ctx, payload).await?;
    Ok(Json(response))
}
