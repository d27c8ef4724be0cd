//! Problem request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{constants::MAX_PROBLEM_TITLE_LENGTH, models::TestCase};

/// Create problem request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProblemRequest {
    #[validate(length(min = 1, max = MAX_PROBLEM_TITLE_LENGTH))]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub constraints: String,

    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}

/// Update problem request; empty or absent fields keep their value
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProblemRequest {
    #[validate(length(max = MAX_PROBLEM_TITLE_LENGTH))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub constraints: Option<String>,
    pub test_cases: Option<Vec<TestCase>>,
    /// Only honoured for superadmins
    pub visibility: Option<bool>,
}

/// `?id=` lookup query
#[derive(Debug, Default, Deserialize)]
pub struct ProblemQuery {
    pub id: Option<String>,
}
