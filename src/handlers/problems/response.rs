//! Problem response DTOs

use serde::Serialize;

use crate::models::{Problem, TestCase};

/// Problem response
#[derive(Debug, Serialize)]
pub struct ProblemResponse {
    pub pid: i32,
    pub title: String,
    pub description: String,
    pub constraints: String,
    pub test_cases: Vec<TestCase>,
    pub author_id: String,
    pub visibility: bool,
}

impl From<Problem> for ProblemResponse {
    fn from(problem: Problem) -> Self {
        Self {
            pid: problem.pid,
            title: problem.title,
            description: problem.description,
            constraints: problem.constraints,
            test_cases: problem.test_cases.0,
            author_id: problem.author_id,
            visibility: problem.visibility,
        }
    }
}

/// `/problems/get` returns one problem for `?id=` and the listing otherwise
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ProblemsResponse {
    One(ProblemResponse),
    All(Vec<ProblemResponse>),
}
