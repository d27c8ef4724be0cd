//! Custom error types and handling
//!
//! This module defines the application's error types and implements
//! conversion to HTTP responses for the Axum framework.
//!
//! Two families live here:
//! - [`AuthError`] is produced by the request gate and rendered as a plain-text
//!   rejection (401/403) before any handler runs.
//! - [`AppError`] is produced by handlers and services and rendered as a JSON body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Errors raised while authenticating or authorizing a request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Authorization header absent or not of the form `Bearer <token>`
    #[error("{0}")]
    MalformedHeader(&'static str),

    /// Signature, expiry or claim validation failed
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Caller's role is not permitted on the matched route
    #[error("Access forbidden for route: {0}")]
    RoleForbidden(String),

    /// A router path parameter required by the route is absent
    #[error("Permission denied: no {0} provided")]
    MissingParameter(&'static str),

    /// Caller does not own the targeted resource
    #[error("Permission denied: {0}")]
    OwnershipForbidden(String),

    /// Identity provider could not be reached or answered garbage
    #[error("Identity provider unreachable: {0}")]
    VerifierUnreachable(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MalformedHeader(_) | Self::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            Self::RoleForbidden(_) | Self::MissingParameter(_) | Self::OwnershipForbidden(_) => {
                StatusCode::FORBIDDEN
            }
            Self::VerifierUnreachable(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AuthError::InvalidToken(err.to_string())
    }
}

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("User token not valid")]
    InvalidLoginToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Resource errors
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    // Rate limiting
    #[error("Too many requests")]
    TooManyRequests,

    // Internal errors
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

/// Error details in response
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

impl AppError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidLoginToken => "INVALID_LOGIN_TOKEN",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::AlreadyExists(_) => "ALREADY_EXISTS",
            Self::Database(_) => "DATABASE_ERROR",
            Self::TooManyRequests => "TOO_MANY_REQUESTS",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidLoginToken | Self::Validation(_) | Self::InvalidInput(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::InvalidToken | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::AlreadyExists(_) => StatusCode::CONFLICT,
            Self::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log internal errors but don't expose details to clients
        let message = match &self {
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                "An internal error occurred".to_string()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                "A database error occurred".to_string()
            }
            _ => self.to_string(),
        };

        let body = ErrorResponse {
            error: ErrorDetails {
                code: self.error_code().to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    AppError::AlreadyExists("Resource already exists".to_string())
                } else {
                    AppError::Database(db_err.to_string())
                }
            }
            _ => AppError::Database(err.to_string()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MalformedHeader(_) => AppError::Unauthorized,
            AuthError::InvalidToken(_) => AppError::InvalidToken,
            AuthError::VerifierUnreachable(_) => AppError::InvalidLoginToken,
            other => AppError::Forbidden(other.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_status_codes() {
        assert_eq!(
            AuthError::MalformedHeader("No auth header provided").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::InvalidToken("ExpiredSignature".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::RoleForbidden("/users/get".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AuthError::MissingParameter("email").status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_auth_error_messages() {
        assert_eq!(
            AuthError::RoleForbidden("/contests/register/1".into()).to_string(),
            "Access forbidden for route: /contests/register/1"
        );
        assert_eq!(
            AuthError::MissingParameter("contestId").to_string(),
            "Permission denied: no contestId provided"
        );
        assert_eq!(
            AuthError::OwnershipForbidden("you can only update your own details".into())
                .to_string(),
            "Permission denied: you can only update your own details"
        );
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(AppError::InvalidLoginToken.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::NotFound("User not found".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::AlreadyExists("x".into()).status_code(),
            StatusCode::CONFLICT
        );
    }
}
