//! Per-route request context.
//!
//! Once the coarse role check passes, [`enrich`] derives the values handlers act on
//! (target email, contest id) and enforces the ownership rules that a role alone
//! cannot express. The result travels to handlers as a typed [`RequestContext`] in
//! the request extensions.

use std::collections::HashMap;

use axum::{
    extract::{FromRequestParts, Query, RawPathParams},
    http::{request::Parts, Uri},
};
use serde::Deserialize;

use crate::constants::{params, paths};
use crate::error::{AppError, AuthError};

use super::role::Role;

/// Authenticated caller as asserted by a session token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub email: String,
    /// Effective role (superadmin wins over user for composite claims)
    pub role: Role,
    pub subject_id: String,
}

/// Values attached to an authenticated request for downstream handlers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub email: String,
    pub role: Role,
    pub subject_id: String,
    /// User a `/users/*` request acts on; `None` means every user
    pub target_email: Option<String>,
    pub contest_id: Option<String>,
}

impl RequestContext {
    fn for_caller(caller: &Caller) -> Self {
        Self {
            email: caller.email.clone(),
            role: caller.role,
            subject_id: caller.subject_id.clone(),
            target_email: None,
            contest_id: None,
        }
    }

    fn with_target_email(mut self, email: Option<String>) -> Self {
        self.target_email = email;
        self
    }

    fn with_contest(mut self, contest_id: &str) -> Self {
        self.contest_id = Some(contest_id.to_string());
        self
    }

    /// Contest id forwarded by the gate, for handlers on contest routes
    pub fn require_contest_id(&self) -> Result<&str, AppError> {
        self.contest_id
            .as_deref()
            .ok_or_else(|| AppError::InvalidInput("Missing contest ID".to_string()))
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Router path parameters of the matched route
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(HashMap<String, String>);

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Read the params axum stored while routing; empty when there are none
    pub async fn from_parts(parts: &mut Parts) -> Self {
        match RawPathParams::from_request_parts(parts, &()).await {
            Ok(raw) => raw
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
            Err(_) => Self::default(),
        }
    }
}

impl FromIterator<(String, String)> for PathParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Default, Deserialize)]
struct EmailQuery {
    #[serde(default)]
    email: Option<String>,
}

/// Derive the request context for `uri` and enforce per-route ownership.
///
/// Paths without a dedicated branch pass through with only the caller identity.
pub fn enrich(uri: &Uri, path_params: &PathParams, caller: &Caller) -> Result<RequestContext, AuthError> {
    let path = uri.path();
    let context = RequestContext::for_caller(caller);

    if path.starts_with(paths::USERS_GET) {
        let target = match caller.role {
            Role::User => Some(caller.email.clone()),
            Role::SuperAdmin => Query::<EmailQuery>::try_from_uri(uri)
                .map(|Query(query)| query)
                .unwrap_or_default()
                .email
                .filter(|email| !email.is_empty()),
        };
        return Ok(context.with_target_email(target));
    }

    if path.starts_with(paths::USERS_UPDATE) {
        let email = path_params
            .get(params::EMAIL)
            .ok_or(AuthError::MissingParameter(params::EMAIL))?;

        if !caller.role.is_superadmin() && email != caller.email {
            return Err(AuthError::OwnershipForbidden(
                "you can only update your own details".to_string(),
            ));
        }
        return Ok(context.with_target_email(Some(email.to_string())));
    }

    if path.starts_with(paths::CONTESTS_REGISTRATIONS)
        || path.starts_with(paths::CONTESTS_CHECK_REGISTRATION)
    {
        let contest_id = path_params
            .get(params::CONTEST_ID)
            .ok_or(AuthError::MissingParameter(params::CONTEST_ID))?;
        return Ok(context.with_contest(contest_id));
    }

    if path.starts_with(paths::CONTESTS_REGISTER) {
        // Registration acts on the caller; the id is forwarded when routed
        return Ok(match path_params.get(params::CONTEST_ID) {
            Some(contest_id) => context.with_contest(contest_id),
            None => context,
        });
    }

    // Problem and contest creation routes only need the caller identity
    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller(email: &str, role: Role) -> Caller {
        Caller {
            email: email.to_string(),
            role,
            subject_id: "64f000000000000000000001".to_string(),
        }
    }

    fn params(pairs: &[(&str, &str)]) -> PathParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn uri(raw: &str) -> Uri {
        raw.parse().unwrap()
    }

    #[test]
    fn test_user_lookup_is_pinned_to_self() {
        let ctx = enrich(
            &uri("/users/get?email=other@x.com"),
            &PathParams::default(),
            &caller("alice@x.com", Role::User),
        )
        .unwrap();

        assert_eq!(ctx.target_email.as_deref(), Some("alice@x.com"));
    }

    #[test]
    fn test_superadmin_lookup_follows_query() {
        let admin = caller("root@x.com", Role::SuperAdmin);

        let ctx = enrich(&uri("/users/get?email=other@x.com"), &PathParams::default(), &admin).unwrap();
        assert_eq!(ctx.target_email.as_deref(), Some("other@x.com"));

        let all = enrich(&uri("/users/get"), &PathParams::default(), &admin).unwrap();
        assert_eq!(all.target_email, None);

        let empty = enrich(&uri("/users/get?email="), &PathParams::default(), &admin).unwrap();
        assert_eq!(empty.target_email, None);
    }

    #[test]
    fn test_update_self_allowed() {
        let ctx = enrich(
            &uri("/users/update/alice@x.com"),
            &params(&[("email", "alice@x.com")]),
            &caller("alice@x.com", Role::User),
        )
        .unwrap();

        assert_eq!(ctx.target_email.as_deref(), Some("alice@x.com"));
    }

    #[test]
    fn test_update_other_forbidden_for_user() {
        let err = enrich(
            &uri("/users/update/bob@x.com"),
            &params(&[("email", "bob@x.com")]),
            &caller("alice@x.com", Role::User),
        )
        .unwrap_err();

        assert!(matches!(err, AuthError::OwnershipForbidden(_)));
    }

    #[test]
    fn test_update_other_allowed_for_superadmin() {
        let ctx = enrich(
            &uri("/users/update/alice@x.com"),
            &params(&[("email", "alice@x.com")]),
            &caller("root@x.com", Role::SuperAdmin),
        )
        .unwrap();

        assert_eq!(ctx.target_email.as_deref(), Some("alice@x.com"));
        assert_eq!(ctx.email, "root@x.com");
    }

    #[test]
    fn test_update_without_param_is_rejected() {
        let err = enrich(
            &uri("/users/update/"),
            &PathParams::default(),
            &caller("root@x.com", Role::SuperAdmin),
        )
        .unwrap_err();

        assert_eq!(err, AuthError::MissingParameter("email"));
    }

    #[test]
    fn test_registrations_forward_contest_role_and_email() {
        let ctx = enrich(
            &uri("/contests/get/registrations/64fabc"),
            &params(&[("contestId", "64fabc")]),
            &caller("host@x.com", Role::User),
        )
        .unwrap();

        assert_eq!(ctx.contest_id.as_deref(), Some("64fabc"));
        assert_eq!(ctx.role, Role::User);
        assert_eq!(ctx.email, "host@x.com");
    }

    #[test]
    fn test_registration_check_requires_contest() {
        let err = enrich(
            &uri("/contests/check/registrations/"),
            &PathParams::default(),
            &caller("bob@x.com", Role::User),
        )
        .unwrap_err();

        assert_eq!(err, AuthError::MissingParameter("contestId"));
    }

    #[test]
    fn test_register_forwards_email_and_contest() {
        let ctx = enrich(
            &uri("/contests/register/64f1"),
            &params(&[("contestId", "64f1")]),
            &caller("bob@x.com", Role::User),
        )
        .unwrap();

        assert_eq!(ctx.email, "bob@x.com");
        assert_eq!(ctx.contest_id.as_deref(), Some("64f1"));
    }

    #[test]
    fn test_pass_through_routes() {
        for path in ["/problems/upload", "/problems/getnotvisible", "/problems/update/7", "/contests/create", "/elsewhere"] {
            let ctx = enrich(&uri(path), &PathParams::default(), &caller("alice@x.com", Role::User)).unwrap();
            assert_eq!(ctx.email, "alice@x.com");
            assert_eq!(ctx.target_email, None);
            assert_eq!(ctx.contest_id, None);
        }
    }
}
