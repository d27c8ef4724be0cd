//! Contest handler implementations
//!
//! Contest-scoped routes read the contest id from [`RequestContext`], where the
//! gate placed it after checking the path.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    auth::RequestContext,
    error::AppResult,
    models::{Leaderboard, Participant},
    services::ContestService,
    state::AppState,
};

use super::{
    request::{ContestQuery, CreateContestRequest},
    response::{CheckRegistrationResponse, ContestResponse, ContestsResponse},
};

/// Create a new contest
pub async fn create_contest(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(payload): Json<CreateContestRequest>,
) -> AppResult<(StatusCode, Json<ContestResponse>)> {
    payload.validate()?;

    let contest = ContestService::create_contest(state.db(), &ctx, payload).await?;
    Ok((StatusCode::CREATED, Json(contest)))
}

/// List contests, or get one started contest with `?id=`
pub async fn get_contests(
    State(state): State<AppState>,
    Query(query): Query<ContestQuery>,
) -> AppResult<Json<ContestsResponse>> {
    let response = ContestService::get_contests(state.db(), query.id.as_deref()).await?;
    Ok(Json(response))
}

/// Register for a contest
pub async fn register(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> AppResult<(StatusCode, Json<Participant>)> {
    let participant = ContestService::register(state.db(), &ctx).await?;
    Ok((StatusCode::CREATED, Json(participant)))
}

/// Get contest registrations
pub async fn get_registrations(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> AppResult<Json<Vec<Participant>>> {
    let participants = ContestService::get_registrations(state.db(), &ctx).await?;
    Ok(Json(participants))
}

/// Check whether the caller is registered
pub async fn check_registration(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> AppResult<Json<CheckRegistrationResponse>> {
    let response = ContestService::check_registration(state.db(), &ctx).await?;
    Ok(Json(response))
}

/// Get contest leaderboard
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<ContestQuery>,
) -> AppResult<Json<Leaderboard>> {
    let leaderboard = ContestService::get_leaderboard(state.db(), query.id.as_deref()).await?;
    Ok(Json(leaderboard))
}
