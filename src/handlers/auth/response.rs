//! Authentication response DTOs

use serde::Serialize;
use uuid::Uuid;

use crate::models::User;

/// User profile returned at sign-in
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub phone: String,
    pub description: String,
    pub role: String,
    pub image: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            phone: user.phone,
            description: user.description,
            role: user.role,
            image: user.image,
        }
    }
}

/// Sign-in response
#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub user: UserResponse,
    pub token: String,
    pub refresh_token: String,
}

/// Token refresh response
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}
