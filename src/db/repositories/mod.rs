//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod contest_repo;
pub mod participant_repo;
pub mod problem_repo;
pub mod user_repo;

pub use contest_repo::ContestRepository;
pub use participant_repo::ParticipantRepository;
pub use problem_repo::{NewProblem, ProblemRepository};
pub use user_repo::UserRepository;
