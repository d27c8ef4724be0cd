//! Problem handlers

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

/// Problem routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/problems/upload", post(handler::create_problem))
        .route("/problems/get", get(handler::get_problems))
        .route("/problems/getnotvisible", get(handler::get_hidden_problems))
        .route("/problems/update/{pid}", post(handler::update_problem))
}
