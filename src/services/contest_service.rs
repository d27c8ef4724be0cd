//! Contest service

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    auth::RequestContext,
    db::repositories::{ContestRepository, ParticipantRepository},
    error::{AppError, AppResult},
    handlers::contests::{
        request::CreateContestRequest,
        response::{CheckRegistrationResponse, ContestResponse, ContestsResponse},
    },
    models::{Contest, Leaderboard, Participant},
};

/// Contest service for business logic
pub struct ContestService;

impl ContestService {
    /// Create a contest hosted by the caller
    pub async fn create_contest(
        pool: &PgPool,
        ctx: &RequestContext,
        payload: CreateContestRequest,
    ) -> AppResult<ContestResponse> {
        if payload.end_time <= payload.start_time {
            return Err(AppError::InvalidInput(
                "Contest end time must be after start time".to_string(),
            ));
        }

        let contest = ContestRepository::create(
            pool,
            &payload.title,
            &payload.description,
            payload.start_time,
            payload.end_time,
            &ctx.email,
            &payload.problems,
        )
        .await?;

        Ok(contest.into())
    }

    /// One contest once it has started, or every contest without its problem set
    pub async fn get_contests(pool: &PgPool, id: Option<&str>) -> AppResult<ContestsResponse> {
        if let Some(raw) = id.filter(|raw| !raw.is_empty()) {
            let contest = Self::find_contest(pool, raw).await?;

            if !contest.has_started(Utc::now().timestamp()) {
                return Err(AppError::Forbidden("Contest has not started yet".to_string()));
            }
            return Ok(ContestsResponse::One(contest.into()));
        }

        let contests = ContestRepository::list_all(pool).await?;
        Ok(ContestsResponse::All(
            contests
                .into_iter()
                .map(|c| c.without_problems().into())
                .collect(),
        ))
    }

    /// Register the caller for the contest in the request context
    pub async fn register(pool: &PgPool, ctx: &RequestContext) -> AppResult<Participant> {
        let contest = Self::find_contest(pool, ctx.require_contest_id()?).await?;

        match ParticipantRepository::create(pool, &contest.id, &ctx.email).await {
            Err(AppError::AlreadyExists(_)) => Err(AppError::AlreadyExists(
                "Already registered for this contest".to_string(),
            )),
            result => result,
        }
    }

    /// Registrations of a contest, visible to its host and superadmins
    pub async fn get_registrations(
        pool: &PgPool,
        ctx: &RequestContext,
    ) -> AppResult<Vec<Participant>> {
        let contest = Self::find_contest(pool, ctx.require_contest_id()?).await?;

        if !ctx.role.is_superadmin() && !contest.is_hosted_by(&ctx.email) {
            return Err(AppError::Forbidden(
                "Not authorised to view contest participants".to_string(),
            ));
        }

        ParticipantRepository::list_by_contest(pool, &contest.id).await
    }

    /// Whether the caller is registered for the contest
    pub async fn check_registration(
        pool: &PgPool,
        ctx: &RequestContext,
    ) -> AppResult<CheckRegistrationResponse> {
        let contest = Self::find_contest(pool, ctx.require_contest_id()?).await?;
        let existing = ParticipantRepository::find_registration(pool, &contest.id, &ctx.email).await?;

        Ok(CheckRegistrationResponse {
            is_registered: existing.is_some(),
            existing_registration: existing,
        })
    }

    /// Participants of a contest ordered by score
    pub async fn get_leaderboard(pool: &PgPool, id: Option<&str>) -> AppResult<Leaderboard> {
        let raw = id
            .filter(|raw| !raw.is_empty())
            .ok_or_else(|| AppError::InvalidInput("Missing contest ID".to_string()))?;
        let contest = Self::find_contest(pool, raw).await?;

        Ok(Leaderboard {
            contest_id: contest.id,
            participants: ParticipantRepository::leaderboard(pool, &contest.id).await?,
        })
    }

    async fn find_contest(pool: &PgPool, raw_id: &str) -> AppResult<Contest> {
        let id = parse_contest_id(raw_id)?;

        ContestRepository::find_by_id(pool, &id)
            .await?
            .ok_or_else(|| AppError::NotFound("Contest not found".to_string()))
    }
}

fn parse_contest_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::InvalidInput("Invalid contest ID".to_string()))
}
