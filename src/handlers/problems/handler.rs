//! Problem handler implementations

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{auth::RequestContext, error::AppResult, services::ProblemService, state::AppState};

use super::{
    request::{CreateProblemRequest, ProblemQuery, UpdateProblemRequest},
    response::{ProblemResponse, ProblemsResponse},
};

/// Upload a new problem
pub async fn create_problem(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(payload): Json<CreateProblemRequest>,
) -> AppResult<(StatusCode, Json<ProblemResponse>)> {
    payload.validate()?;

    let problem = ProblemService::create_problem(state.db(), &ctx, payload).await?;
    Ok((StatusCode::CREATED, Json(problem)))
}

/// List published problems, or get one with `?id=`
pub async fn get_problems(
    State(state): State<AppState>,
    Query(query): Query<ProblemQuery>,
) -> AppResult<Json<ProblemsResponse>> {
    let response = ProblemService::get_problems(state.db(), query.id.as_deref()).await?;
    Ok(Json(response))
}

/// List unpublished problems
pub async fn get_hidden_problems(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> AppResult<Json<Vec<ProblemResponse>>> {
    let problems = ProblemService::get_hidden_problems(state.db(), &ctx).await?;
    Ok(Json(problems))
}

/// Update a problem
pub async fn update_problem(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(pid): Path<String>,
    Json(payload): Json<UpdateProblemRequest>,
) -> AppResult<Json<ProblemResponse>> {
    payload.validate()?;

    let problem = ProblemService::update_problem(state.db(), &ctx, &pid, payload).await?;
    Ok(Json(problem))
}
