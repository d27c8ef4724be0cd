//! Contest model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Contest database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Contest {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Unix seconds
    pub start_time: i64,
    /// Unix seconds
    pub end_time: i64,
    /// Email of the host
    pub host_id: String,
    /// Problem ids
    pub problems: Vec<i32>,
    pub created_at: DateTime<Utc>,
}

impl Contest {
    /// Check if the contest has started at unix time `now`
    pub fn has_started(&self, now: i64) -> bool {
        now >= self.start_time
    }

    /// Check if `email` hosts this contest
    pub fn is_hosted_by(&self, email: &str) -> bool {
        self.host_id == email
    }

    /// Hide the problem set, used for listings
    pub fn without_problems(mut self) -> Self {
        self.problems.clear();
        self
    }
}
