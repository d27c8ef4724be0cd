//! Authentication middleware

use std::fmt;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::{
    auth::{Admission, PathParams, Role},
    state::AppState,
};

/// How the gate handled a request, attached to the response for request logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    Exempt,
    Admitted { email: String, role: Role },
    Rejected,
}

impl GateOutcome {
    pub fn caller(&self) -> Option<&str> {
        match self {
            Self::Admitted { email, .. } => Some(email),
            Self::Exempt | Self::Rejected => None,
        }
    }
}

impl fmt::Display for GateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exempt => f.write_str("exempt"),
            Self::Admitted { role, .. } => write!(f, "admitted:{}", role),
            Self::Rejected => f.write_str("rejected"),
        }
    }
}

/// Request gate middleware.
///
/// Installed with `route_layer` so the router has already matched the route and
/// recorded its path parameters. Rejections are plain-text 401/403 responses.
pub async fn auth_middleware(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let (mut parts, body) = request.into_parts();
    let path_params = PathParams::from_parts(&mut parts).await;

    let admission = state
        .gate()
        .admit(&parts.uri, parts.headers.get(AUTHORIZATION), &path_params);

    let mut request = Request::from_parts(parts, body);
    let outcome = match admission {
        Ok(Admission::Exempt) => {
            debug!(path = %request.uri().path(), "Exempt route, skipping authentication");
            GateOutcome::Exempt
        }
        Ok(Admission::Authenticated(context)) => {
            debug!(
                path = %request.uri().path(),
                email = %context.email,
                role = %context.role,
                contest_id = ?context.contest_id,
                "Request admitted"
            );
            let outcome = GateOutcome::Admitted {
                email: context.email.clone(),
                role: context.role,
            };
            request.extensions_mut().insert(context);
            outcome
        }
        Err(e) => {
            debug!(path = %request.uri().path(), error = %e, status = %e.status_code(), "Request rejected by gate");
            let mut response = e.into_response();
            response.extensions_mut().insert(GateOutcome::Rejected);
            return response;
        }
    };

    let mut response = next.run(request).await;
    response.extensions_mut().insert(outcome);
    response
}
