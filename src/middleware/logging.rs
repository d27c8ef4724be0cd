//! Request logging middleware
//!
//! Runs outside the gate and reads the [`GateOutcome`] it leaves on the
//! response, so every line carries the caller and how the gate handled them.

use axum::{
    body::Body,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, warn};

use super::auth::GateOutcome;

/// Request logging middleware
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let duration_ms = format!("{:.2}", start.elapsed().as_secs_f64() * 1000.0);
    let status = response.status().as_u16();
    let outcome = response.extensions().get::<GateOutcome>();
    // No outcome means the router matched no route
    let gate = outcome.map_or_else(|| "unrouted".to_string(), ToString::to_string);
    let caller = outcome.and_then(GateOutcome::caller).unwrap_or("-");

    match response.status() {
        s if s.is_server_error() => warn!(
            %method, %path, %status, %gate, %caller, %duration_ms,
            "Request completed with server error"
        ),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN if outcome == Some(&GateOutcome::Rejected) => warn!(
            %method, %path, %status, %gate, %duration_ms,
            "Request rejected by gate"
        ),
        s if s.is_client_error() && s != StatusCode::NOT_FOUND => warn!(
            %method, %path, %status, %gate, %caller, %duration_ms,
            "Request completed with client error"
        ),
        _ => info!(
            %method, %path, %status, %gate, %caller, %duration_ms,
            "Request completed"
        ),
    }

    response
}
