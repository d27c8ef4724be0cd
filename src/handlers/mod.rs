//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.
//! Routes are registered with their full paths so the request gate sees the
//! same paths its route table is written against.

pub mod auth;
pub mod contests;
pub mod health;
pub mod problems;
pub mod users;

use axum::{middleware, Router};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Create all API routes, every one behind the request gate
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(users::routes())
        .merge(problems::routes())
        .merge(contests::routes())
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
