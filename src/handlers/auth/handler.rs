//! Authentication handler implementations

use axum::{extract::State, Json};
use validator::Validate;

use crate::{error::AppResult, services::AuthService, state::AppState};

use super::{
    request::{RefreshTokenRequest, SignInRequest},
    response::{RefreshResponse, SignInResponse},
};

/// Sign in with an identity provider token, creating the user on first visit
pub async fn sign_in(
    State(state): State<AppState>,
    Json(payload): Json<SignInRequest>,
) -> AppResult<Json<SignInResponse>> {
    payload.validate()?;

    let response = AuthService::sign_in(
        state.db(),
        state.verifier(),
        state.tokens(),
        &state.config().identity.superadmin_emails,
        payload,
    )
    .await?;

    Ok(Json(response))
}

/// Refresh access token
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(payload): Json<RefreshTokenRequest>,
) -> AppResult<Json<RefreshResponse>> {
    let response = AuthService::refresh(state.db(), state.tokens(), &payload.refresh_token).await?;

    Ok(Json(response))
}
