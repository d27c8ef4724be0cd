//! Authentication service
//!
//! Sign-in trusts the identity provider for the email address, then finds or
//! creates the local user and issues a session token pair.

use sqlx::PgPool;
use tracing::{debug, info};

use crate::{
    auth::{IdentityVerifier, TokenCodec, TokenPair},
    constants::roles,
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    handlers::auth::{RefreshResponse, SignInRequest, SignInResponse},
    models::User,
};

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Verify an identity provider token and sign the user in
    pub async fn sign_in(
        pool: &PgPool,
        verifier: &dyn IdentityVerifier,
        tokens: &TokenCodec,
        superadmin_emails: &[String],
        payload: SignInRequest,
    ) -> AppResult<SignInResponse> {
        if !verifier.verify(&payload.email, &payload.token).await {
            return Err(AppError::InvalidLoginToken);
        }

        let user = match UserRepository::find_by_email(pool, &payload.email).await? {
            Some(_) => UserRepository::update_image(pool, &payload.email, &payload.image).await?,
            None => Self::create_user(pool, superadmin_emails, &payload).await?,
        };

        let TokenPair {
            token,
            refresh_token,
        } = tokens.issue(&user.email, &user.role, &user.id.to_string())?;

        debug!(email = %user.email, role = %user.role, "User signed in");

        Ok(SignInResponse {
            user: user.into(),
            token,
            refresh_token,
        })
    }

    /// Exchange a refresh token for a new pair, picking up the user's current role
    pub async fn refresh(
        pool: &PgPool,
        tokens: &TokenCodec,
        refresh_token: &str,
    ) -> AppResult<RefreshResponse> {
        let claims = tokens.decode_refresh(refresh_token)?;

        let user = UserRepository::find_by_email(pool, &claims.email)
            .await?
            .ok_or(AppError::InvalidToken)?;

        let pair = tokens.issue(&user.email, &user.role, &user.id.to_string())?;

        Ok(RefreshResponse {
            token: pair.token,
            refresh_token: pair.refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: tokens.access_ttl_secs(),
        })
    }

    async fn create_user(
        pool: &PgPool,
        superadmin_emails: &[String],
        payload: &SignInRequest,
    ) -> AppResult<User> {
        let role = Self::initial_role(superadmin_emails, &payload.email);

        match UserRepository::create(pool, &payload.email, &payload.name, &payload.image, role).await {
            Ok(user) => {
                info!(email = %user.email, role = %user.role, "Created user");
                Ok(user)
            }
            // A concurrent first sign-in created the row
            Err(AppError::AlreadyExists(_)) => UserRepository::find_by_email(pool, &payload.email)
                .await?
                .ok_or_else(|| AppError::NotFound("User not found".to_string())),
            Err(e) => Err(e),
        }
    }

    /// Role assigned on first sign-in
    pub fn initial_role(superadmin_emails: &[String], email: &str) -> &'static str {
        if superadmin_emails.iter().any(|admin| admin.eq_ignore_ascii_case(email)) {
            roles::SUPERADMIN
        } else {
            roles::USER
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::verifier::MockIdentityVerifier;
    use chrono::Duration;
    use sqlx::postgres::PgPoolOptions;

    #[test]
    fn test_initial_role() {
        let admins = vec!["root@x.com".to_string()];

        assert_eq!(AuthService::initial_role(&admins, "root@x.com"), roles::SUPERADMIN);
        assert_eq!(AuthService::initial_role(&admins, "ROOT@x.com"), roles::SUPERADMIN);
        assert_eq!(AuthService::initial_role(&admins, "alice@x.com"), roles::USER);
        assert_eq!(AuthService::initial_role(&[], "root@x.com"), roles::USER);
    }

    #[tokio::test]
    async fn test_rejected_identity_never_touches_the_database() {
        // Lazy pool: any query would fail, so reaching the error proves we stopped early
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://nobody@127.0.0.1:1/none")
            .unwrap();
        let tokens = TokenCodec::new("svc_secret", Duration::hours(1), Duration::hours(2));

        let mut verifier = MockIdentityVerifier::new();
        verifier.expect_verify().times(1).returning(|_, _| false);

        let payload = SignInRequest {
            email: "alice@x.com".to_string(),
            name: "Alice".to_string(),
            image: String::new(),
            token: "ya29.bad".to_string(),
        };

        let result = AuthService::sign_in(&pool, &verifier, &tokens, &[], payload).await;
        assert!(matches!(result, Err(AppError::InvalidLoginToken)));
    }

    #[tokio::test]
    async fn test_refresh_rejects_access_tokens() {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://nobody@127.0.0.1:1/none")
            .unwrap();
        let tokens = TokenCodec::new("svc_secret", Duration::hours(1), Duration::hours(2));
        let pair = tokens.issue("alice@x.com", "user", "1").unwrap();

        let result = AuthService::refresh(&pool, &tokens, &pair.token).await;
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }
}
