//! Contest request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::MAX_CONTEST_TITLE_LENGTH;

/// Create contest request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateContestRequest {
    #[validate(length(min = 1, max = MAX_CONTEST_TITLE_LENGTH))]
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Unix seconds
    pub start_time: i64,

    /// Unix seconds
    pub end_time: i64,

    /// Problem ids
    #[serde(default)]
    pub problems: Vec<i32>,
}

/// `?id=` lookup query
#[derive(Debug, Default, Deserialize)]
pub struct ContestQuery {
    pub id: Option<String>,
}
