//! Problem service

use sqlx::PgPool;

use crate::{
    auth::{RequestContext, Role},
    db::repositories::{NewProblem, ProblemRepository},
    error::{AppError, AppResult},
    handlers::problems::{
        request::{CreateProblemRequest, UpdateProblemRequest},
        response::{ProblemResponse, ProblemsResponse},
    },
    models::Problem,
};

/// Problem service for business logic
pub struct ProblemService;

impl ProblemService {
    /// Create a problem authored by the caller. Only superadmin uploads are published.
    pub async fn create_problem(
        pool: &PgPool,
        ctx: &RequestContext,
        payload: CreateProblemRequest,
    ) -> AppResult<ProblemResponse> {
        let problem = ProblemRepository::create(
            pool,
            NewProblem {
                title: &payload.title,
                description: &payload.description,
                constraints: &payload.constraints,
                test_cases: &payload.test_cases,
                author_id: &ctx.email,
                visibility: ctx.role.is_superadmin(),
            },
        )
        .await?;

        Ok(problem.into())
    }

    /// Published problems with sample test cases only
    pub async fn get_problems(pool: &PgPool, id: Option<&str>) -> AppResult<ProblemsResponse> {
        if let Some(raw) = id.filter(|raw| !raw.is_empty()) {
            let pid = Self::parse_pid(raw)?;
            let problem = ProblemRepository::find_visible_by_pid(pool, pid)
                .await?
                .ok_or_else(|| AppError::NotFound("Problem not found".to_string()))?;

            return Ok(ProblemsResponse::One(problem.into_samples().into()));
        }

        let problems = ProblemRepository::list_visible(pool).await?;
        Ok(ProblemsResponse::All(Self::samples(problems)))
    }

    /// Unpublished problems: every one for a superadmin, the caller's own otherwise
    pub async fn get_hidden_problems(
        pool: &PgPool,
        ctx: &RequestContext,
    ) -> AppResult<Vec<ProblemResponse>> {
        let author = match ctx.role {
            Role::SuperAdmin => None,
            Role::User => Some(ctx.email.as_str()),
        };

        let problems = ProblemRepository::list_hidden(pool, author).await?;
        Ok(Self::samples(problems))
    }

    /// Edit a problem. Authors may edit their own; a user edit always unpublishes.
    pub async fn update_problem(
        pool: &PgPool,
        ctx: &RequestContext,
        pid: &str,
        payload: UpdateProblemRequest,
    ) -> AppResult<ProblemResponse> {
        let pid = Self::parse_pid(pid)?;
        let existing = ProblemRepository::find_by_pid(pool, pid)
            .await?
            .ok_or_else(|| AppError::NotFound("Problem not found".to_string()))?;

        if !ctx.role.is_superadmin() && !existing.is_authored_by(&ctx.email) {
            return Err(AppError::Forbidden(
                "You can only update your own problems".to_string(),
            ));
        }

        let merged = merge_update(existing, payload, ctx.role);
        let updated = ProblemRepository::update(
            pool,
            pid,
            NewProblem {
                title: &merged.title,
                description: &merged.description,
                constraints: &merged.constraints,
                test_cases: &merged.test_cases.0,
                author_id: &merged.author_id,
                visibility: merged.visibility,
            },
        )
        .await?;

        Ok(updated.into())
    }

    fn parse_pid(raw: &str) -> AppResult<i32> {
        raw.parse()
            .map_err(|_| AppError::InvalidInput("Invalid problem ID".to_string()))
    }

    fn samples(problems: Vec<Problem>) -> Vec<ProblemResponse> {
        problems
            .into_iter()
            .map(|p| p.into_samples().into())
            .collect()
    }
}

/// Apply an update: non-empty fields replace, visibility follows the editor's role
fn merge_update(mut problem: Problem, update: UpdateProblemRequest, role: Role) -> Problem {
    let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());

    if let Some(title) = non_empty(update.title) {
        problem.title = title;
    }
    if let Some(description) = non_empty(update.description) {
        problem.description = description;
    }
    if let Some(constraints) = non_empty(update.constraints) {
        problem.constraints = constraints;
    }
    if let Some(test_cases) = update.test_cases {
        problem.test_cases.0 = test_cases;
    }

    problem.visibility = match role {
        Role::User => false,
        Role::SuperAdmin => update.visibility.unwrap_or(problem.visibility),
    };

    problem
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use sqlx::types::Json;

    use super::*;
    use crate::models::TestCase;

    fn published() -> Problem {
        Problem {
            pid: 7,
            title: "Two Sum".to_string(),
            description: "Find two numbers".to_string(),
            constraints: "n <= 1e5".to_string(),
            test_cases: Json(vec![TestCase {
                input: "1 2".to_string(),
                output: "3".to_string(),
            }]),
            author_id: "alice@x.com".to_string(),
            visibility: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_fields_keep_existing_values() {
        let update = UpdateProblemRequest {
            title: Some(String::new()),
            description: Some("New statement".to_string()),
            ..Default::default()
        };

        let merged = merge_update(published(), update, Role::SuperAdmin);
        assert_eq!(merged.title, "Two Sum");
        assert_eq!(merged.description, "New statement");
        assert_eq!(merged.test_cases.len(), 1);
        assert!(merged.visibility);
    }

    #[test]
    fn test_user_edit_unpublishes() {
        let update = UpdateProblemRequest {
            visibility: Some(true),
            ..Default::default()
        };

        assert!(!merge_update(published(), update, Role::User).visibility);
    }

    #[test]
    fn test_superadmin_controls_visibility() {
        let hide = UpdateProblemRequest {
            visibility: Some(false),
            ..Default::default()
        };

        assert!(!merge_update(published(), hide, Role::SuperAdmin).visibility);
    }

    #[test]
    fn test_test_cases_replaced_when_present() {
        let update = UpdateProblemRequest {
            test_cases: Some(vec![]),
            ..Default::default()
        };

        assert!(merge_update(published(), update, Role::SuperAdmin).test_cases.is_empty());
    }

    #[test]
    fn test_parse_pid() {
        assert_eq!(ProblemService::parse_pid("42").unwrap(), 42);
        assert!(matches!(ProblemService::parse_pid("abc"), Err(AppError::InvalidInput(_))));
    }
}
