//! Authentication handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{routing::post, Router};

use crate::{constants::paths, state::AppState};

/// Authentication routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(paths::CREATE, post(handler::sign_in))
        .route(paths::REFRESH, post(handler::refresh_token))
}
