//! Problem model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};

use crate::constants::SAMPLE_TEST_CASES;

/// Problem database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Problem {
    pub pid: i32,
    pub title: String,
    pub description: String,
    pub constraints: String,
    pub test_cases: Json<Vec<TestCase>>,
    /// Email of the author
    pub author_id: String,
    pub visibility: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Problem {
    /// Keep only the public sample test cases
    pub fn into_samples(mut self) -> Self {
        self.test_cases.0.truncate(SAMPLE_TEST_CASES);
        self
    }

    /// Check if `email` authored this problem
    pub fn is_authored_by(&self, email: &str) -> bool {
        self.author_id == email
    }
}

/// A single input/expected output pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub input: String,
    pub output: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem(cases: usize) -> Problem {
        Problem {
            pid: 1,
            title: "Two Sum".to_string(),
            description: String::new(),
            constraints: String::new(),
            test_cases: Json(
                (0..cases)
                    .map(|i| TestCase {
                        input: i.to_string(),
                        output: i.to_string(),
                    })
                    .collect(),
            ),
            author_id: "alice@x.com".to_string(),
            visibility: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_samples_are_truncated() {
        assert_eq!(problem(5).into_samples().test_cases.len(), 2);
        assert_eq!(problem(1).into_samples().test_cases.len(), 1);
    }

    #[test]
    fn test_authorship() {
        let p = problem(0);
        assert!(p.is_authored_by("alice@x.com"));
        assert!(!p.is_authored_by("bob@x.com"));
    }
}
