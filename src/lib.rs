//! Worldwide Coders - Competitive Programming Contest Backend
//!
//! This library provides the REST backend for a contest platform: problems,
//! contests, registrations and user profiles, all behind a single request gate.
//!
//! # Request gate
//!
//! Every route passes through [`middleware::auth`], which
//! - lets exempt paths through untouched
//! - validates the bearer session token
//! - checks the caller's role against the route table
//! - attaches a typed [`auth::RequestContext`] for handlers
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Repositories**: Database access
//! - **Models**: Domain models

pub mod auth;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod router;
pub mod services;
pub mod state;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use router::build_router;
pub use state::AppState;
