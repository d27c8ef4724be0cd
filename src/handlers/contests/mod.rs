//! Contest handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Contest routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/contests/create", post(handler::create_contest))
        .route("/contests/get", get(handler::get_contests))
        .route("/contests/register/{contestId}", post(handler::register))
        .route(
            "/contests/get/registrations/{contestId}",
            get(handler::get_registrations),
        )
        .route(
            "/contests/check/registrations/{contestId}",
            get(handler::check_registration),
        )
        .route("/contests/leaderboard", get(handler::get_leaderboard))
}
