//! Contest response DTOs

use serde::Serialize;
use uuid::Uuid;

use crate::models::{Contest, Participant};

/// Contest response
#[derive(Debug, Serialize)]
pub struct ContestResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub start_time: i64,
    pub end_time: i64,
    pub host_id: String,
    pub problems: Vec<i32>,
}

impl From<Contest> for ContestResponse {
    fn from(contest: Contest) -> Self {
        Self {
            id: contest.id,
            title: contest.title,
            description: contest.description,
            start_time: contest.start_time,
            end_time: contest.end_time,
            host_id: contest.host_id,
            problems: contest.problems,
        }
    }
}

/// `/contests/get` returns one started contest for `?id=` and the listing otherwise
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ContestsResponse {
    One(ContestResponse),
    All(Vec<ContestResponse>),
}

/// Registration check response
#[derive(Debug, Serialize)]
pub struct CheckRegistrationResponse {
    pub is_registered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_registration: Option<Participant>,
}
