//! Contest participant repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppResult, models::Participant};

/// Repository for contest registrations
pub struct ParticipantRepository;

impl ParticipantRepository {
    /// Register a user for a contest with a zero score
    pub async fn create(pool: &PgPool, contest_id: &Uuid, user_id: &str) -> AppResult<Participant> {
        let participant = sqlx::query_as::<_, Participant>(
            r#"
            INSERT INTO participants (contest_id, user_id)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(contest_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(participant)
    }

    /// Find a user's registration for a contest
    pub async fn find_registration(
        pool: &PgPool,
        contest_id: &Uuid,
        user_id: &str,
    ) -> AppResult<Option<Participant>> {
        let participant = sqlx::query_as::<_, Participant>(
            r#"SELECT * FROM participants WHERE contest_id = $1 AND user_id = $2"#,
        )
        .bind(contest_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(participant)
    }

    /// List registrations of a contest in registration order
    pub async fn list_by_contest(pool: &PgPool, contest_id: &Uuid) -> AppResult<Vec<Participant>> {
        let participants = sqlx::query_as::<_, Participant>(
            r#"SELECT * FROM participants WHERE contest_id = $1 ORDER BY registered_at"#,
        )
        .bind(contest_id)
        .fetch_all(pool)
        .await?;

        Ok(participants)
    }

    /// List registrations of a contest by descending score
    pub async fn leaderboard(pool: &PgPool, contest_id: &Uuid) -> AppResult<Vec<Participant>> {
        let participants = sqlx::query_as::<_, Participant>(
            r#"
            SELECT * FROM participants
            WHERE contest_id = $1
            ORDER BY score DESC, registered_at
            "#,
        )
        .bind(contest_id)
        .fetch_all(pool)
        .await?;

        Ok(participants)
    }
}
