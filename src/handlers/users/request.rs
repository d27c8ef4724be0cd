//! User request DTOs

use serde::Deserialize;
use validator::Validate;

/// Profile update request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[serde(default)]
    #[validate(length(max = 32))]
    pub phone: String,

    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,
}
