//! Authentication request DTOs

use serde::Deserialize;
use validator::Validate;

/// Sign-in request carrying an identity provider access token
#[derive(Debug, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(email)]
    pub email: String,

    #[serde(default)]
    #[validate(length(max = 100))]
    pub name: String,

    #[serde(default)]
    pub image: String,

    /// Identity provider access token
    #[serde(default)]
    pub token: String,
}

/// Token refresh request
#[derive(Debug, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}
