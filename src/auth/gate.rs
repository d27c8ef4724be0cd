//! Request gate.
//!
//! Every routed request passes through [`Gate::admit`]. It runs these steps in
//! order and stops at the first failure:
//!
//! 1. exempt path → forward untouched
//! 2. bearer header → 401 when absent or malformed
//! 3. token decode → 401 when invalid
//! 4. route role check → 403
//! 5. per-route enrichment → 403, otherwise forward with [`RequestContext`]

use axum::http::{HeaderValue, Uri};

use crate::constants::BEARER_PREFIX;
use crate::error::AuthError;

use super::context::{enrich, Caller, PathParams, RequestContext};
use super::role::RoleSet;
use super::routes::RouteTable;
use super::token::{Claims, TokenCodec};

/// Outcome of a successful pass through the gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// No credentials needed for this path
    Exempt,
    /// Authenticated, with the context handlers will read
    Authenticated(RequestContext),
}

pub struct Gate {
    routes: RouteTable,
    tokens: TokenCodec,
}

impl Gate {
    pub fn new(routes: RouteTable, tokens: TokenCodec) -> Self {
        Self { routes, tokens }
    }

    pub fn tokens(&self) -> &TokenCodec {
        &self.tokens
    }

    pub fn admit(
        &self,
        uri: &Uri,
        authorization: Option<&HeaderValue>,
        path_params: &PathParams,
    ) -> Result<Admission, AuthError> {
        let path = uri.path();
        if self.routes.is_exempt(path) {
            return Ok(Admission::Exempt);
        }

        let token = bearer_token(authorization)?;
        let claims = self.tokens.decode(token)?;

        let held = RoleSet::parse(&claims.role);
        self.routes.authorize(path, &held)?;

        let caller = caller_from(claims, &held)
            .ok_or_else(|| AuthError::RoleForbidden(path.to_string()))?;

        enrich(uri, path_params, &caller).map(Admission::Authenticated)
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header
pub fn bearer_token(header: Option<&HeaderValue>) -> Result<&str, AuthError> {
    let value = header.ok_or(AuthError::MalformedHeader("No auth header provided"))?;
    let value = value
        .to_str()
        .map_err(|_| AuthError::MalformedHeader("Invalid token type"))?;

    value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::MalformedHeader("Invalid token type"))
}

fn caller_from(claims: Claims, held: &RoleSet) -> Option<Caller> {
    Some(Caller {
        role: held.effective()?,
        email: claims.email,
        subject_id: claims.sub,
    })
}
