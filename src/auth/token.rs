//! Session token issuing and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::JwtConfig;
use crate::constants::{ACCESS_TOKEN_TYPE, REFRESH_TOKEN_TYPE};
use crate::error::{AppError, AppResult, AuthError};

/// JWT claims carried by session tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// User email
    pub email: String,
    /// Role claim, possibly a comma separated composite
    pub role: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Token type
    pub token_type: String,
}

/// Access and refresh token issued together at sign-in
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub token: String,
    pub refresh_token: String,
}

/// Signs and verifies session tokens with the process-wide secret
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenCodec {
    pub fn new(secret: &str, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl,
            refresh_ttl,
        }
    }

    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(
            &config.secret,
            Duration::hours(config.expiry_hours),
            Duration::hours(config.refresh_expiry_hours),
        )
    }

    /// Issue an access/refresh token pair for a user
    pub fn issue(&self, email: &str, role: &str, subject_id: &str) -> AppResult<TokenPair> {
        Ok(TokenPair {
            token: self.sign(email, role, subject_id, ACCESS_TOKEN_TYPE, self.access_ttl)?,
            refresh_token: self.sign(email, role, subject_id, REFRESH_TOKEN_TYPE, self.refresh_ttl)?,
        })
    }

    /// Verify and decode an access token
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        self.decode_typed(token, ACCESS_TOKEN_TYPE)
    }

    /// Verify and decode a refresh token
    pub fn decode_refresh(&self, token: &str) -> Result<Claims, AuthError> {
        self.decode_typed(token, REFRESH_TOKEN_TYPE)
    }

    /// Access token lifetime in seconds
    pub fn access_ttl_secs(&self) -> i64 {
        self.access_ttl.num_seconds()
    }

    fn decode_typed(&self, token: &str, expected_type: &str) -> Result<Claims, AuthError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &Validation::default())?.claims;

        if claims.token_type != expected_type {
            return Err(AuthError::InvalidToken("unexpected token type".to_string()));
        }
        if claims.email.is_empty() {
            return Err(AuthError::InvalidToken("missing email claim".to_string()));
        }

        Ok(claims)
    }

    fn sign(
        &self,
        email: &str,
        role: &str,
        subject_id: &str,
        token_type: &str,
        ttl: Duration,
    ) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject_id.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            token_type: token_type.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))
    }
}
