//! Contest participant model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Contest registration
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Participant {
    pub id: Uuid,
    pub contest_id: Uuid,
    /// Email of the registered user
    pub user_id: String,
    pub score: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<String>,
    pub registered_at: DateTime<Utc>,
}

/// Participants of a contest ordered by score
#[derive(Debug, Clone, Serialize)]
pub struct Leaderboard {
    pub contest_id: Uuid,
    pub participants: Vec<Participant>,
}
