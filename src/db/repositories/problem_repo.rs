//! Problem repository

use sqlx::{types::Json, PgPool};

use crate::{
    error::AppResult,
    models::{Problem, TestCase},
};

/// Fields of a problem written on insert or update
#[derive(Debug, Clone)]
pub struct NewProblem<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub constraints: &'a str,
    pub test_cases: &'a [TestCase],
    pub author_id: &'a str,
    pub visibility: bool,
}

/// Repository for problem database operations
pub struct ProblemRepository;

impl ProblemRepository {
    /// Create a new problem; the pid is assigned by the database
    pub async fn create(pool: &PgPool, problem: NewProblem<'_>) -> AppResult<Problem> {
        let problem = sqlx::query_as::<_, Problem>(
            r#"
            INSERT INTO problems (title, description, constraints, test_cases, author_id, visibility)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(problem.title)
        .bind(problem.description)
        .bind(problem.constraints)
        .bind(Json(problem.test_cases))
        .bind(problem.author_id)
        .bind(problem.visibility)
        .fetch_one(pool)
        .await?;

        Ok(problem)
    }

    /// Find problem by pid
    pub async fn find_by_pid(pool: &PgPool, pid: i32) -> AppResult<Option<Problem>> {
        let problem = sqlx::query_as::<_, Problem>(r#"SELECT * FROM problems WHERE pid = $1"#)
            .bind(pid)
            .fetch_optional(pool)
            .await?;

        Ok(problem)
    }

    /// Find a visible problem by pid
    pub async fn find_visible_by_pid(pool: &PgPool, pid: i32) -> AppResult<Option<Problem>> {
        let problem = sqlx::query_as::<_, Problem>(
            r#"SELECT * FROM problems WHERE pid = $1 AND visibility = TRUE"#,
        )
        .bind(pid)
        .fetch_optional(pool)
        .await?;

        Ok(problem)
    }

    /// List visible problems
    pub async fn list_visible(pool: &PgPool) -> AppResult<Vec<Problem>> {
        let problems = sqlx::query_as::<_, Problem>(
            r#"SELECT * FROM problems WHERE visibility = TRUE ORDER BY pid"#,
        )
        .fetch_all(pool)
        .await?;

        Ok(problems)
    }

    /// List hidden problems, optionally restricted to one author
    pub async fn list_hidden(pool: &PgPool, author_id: Option<&str>) -> AppResult<Vec<Problem>> {
        let problems = sqlx::query_as::<_, Problem>(
            r#"
            SELECT * FROM problems
            WHERE visibility = FALSE AND ($1::TEXT IS NULL OR author_id = $1)
            ORDER BY pid
            "#,
        )
        .bind(author_id)
        .fetch_all(pool)
        .await?;

        Ok(problems)
    }

    /// Replace the editable fields of a problem
    pub async fn update(pool: &PgPool, pid: i32, problem: NewProblem<'_>) -> AppResult<Problem> {
        let problem = sqlx::query_as::<_, Problem>(
            r#"
            UPDATE problems
            SET
                title = $2,
                description = $3,
                constraints = $4,
                test_cases = $5,
                visibility = $6,
                updated_at = NOW()
            WHERE pid = $1
            RETURNING *
            "#,
        )
        .bind(pid)
        .bind(problem.title)
        .bind(problem.description)
        .bind(problem.constraints)
        .bind(Json(problem.test_cases))
        .bind(problem.visibility)
        .fetch_one(pool)
        .await?;

        Ok(problem)
    }
}
