//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded once at startup and passed to the components that need it.

use std::env;
use std::str::FromStr;

use crate::auth::UnmatchedRoutePolicy;
use crate::constants::{
    DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_IDENTITY_TIMEOUT_SECS, DEFAULT_JWT_EXPIRY_HOURS,
    DEFAULT_LOG_LEVEL, DEFAULT_REFRESH_TOKEN_EXPIRY_HOURS, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, DEFAULT_TOKENINFO_URL,
};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub jwt: JwtConfig,
    pub identity: IdentityConfig,
    pub auth: AuthConfig,
    pub rate_limit: RateLimitConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
}

/// Session token configuration
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_hours: i64,
    pub refresh_expiry_hours: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiry_hours", &self.expiry_hours)
            .field("refresh_expiry_hours", &self.refresh_expiry_hours)
            .finish()
    }
}

/// External identity provider configuration
///
/// `master_token` and `internal_secret` are bypass secrets: when bypass is enabled,
/// a login token equal to either one is accepted without asking the provider.
/// Anyone holding them can sign in as any email. Keep bypass disabled in production
/// or rotate both secrets regularly.
#[derive(Clone)]
pub struct IdentityConfig {
    pub tokeninfo_url: String,
    pub timeout_secs: u64,
    pub bypass_enabled: bool,
    pub master_token: Option<String>,
    pub internal_secret: Option<String>,
    /// Emails that receive the superadmin role on first sign-in
    pub superadmin_emails: Vec<String>,
}

// Secrets stay out of debug output
impl std::fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("tokeninfo_url", &self.tokeninfo_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("bypass_enabled", &self.bypass_enabled)
            .field("master_token", &self.master_token.as_ref().map(|_| "<redacted>"))
            .field("internal_secret", &self.internal_secret.as_ref().map(|_| "<redacted>"))
            .field("superadmin_emails", &self.superadmin_emails)
            .finish()
    }
}

/// Request gate configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub unmatched_routes: UnmatchedRoutePolicy,
}

/// Rate limiting configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub enabled: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            redis: RedisConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            identity: IdentityConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            rate_limit: RateLimitConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let log_format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("pretty") | Err(_) => LogFormat::Pretty,
            Ok(_) => return Err(ConfigError::InvalidValue("LOG_FORMAT".to_string())),
        };

        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: parse_or("PORT", DEFAULT_SERVER_PORT)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()),
            log_format,
        })
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: required("DATABASE_URL")?,
            max_connections: parse_or("DATABASE_MAX_CONNECTIONS", DEFAULT_DATABASE_MAX_CONNECTIONS)?,
        })
    }
}

impl RedisConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
        })
    }
}

impl JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret: required("JWT_SECRET")?,
            expiry_hours: parse_or("JWT_EXPIRY_HOURS", DEFAULT_JWT_EXPIRY_HOURS)?,
            refresh_expiry_hours: parse_or(
                "REFRESH_TOKEN_EXPIRY_HOURS",
                DEFAULT_REFRESH_TOKEN_EXPIRY_HOURS,
            )?,
        })
    }
}

impl IdentityConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            tokeninfo_url: env::var("IDENTITY_TOKENINFO_URL")
                .unwrap_or_else(|_| DEFAULT_TOKENINFO_URL.to_string()),
            timeout_secs: parse_or("IDENTITY_TIMEOUT_SECS", DEFAULT_IDENTITY_TIMEOUT_SECS)?,
            bypass_enabled: parse_or("IDENTITY_BYPASS_ENABLED", false)?,
            master_token: non_empty("MASTER_TOKEN"),
            internal_secret: non_empty("INTERNAL_SHARED_SECRET"),
            superadmin_emails: env::var("SUPERADMIN_EMAILS")
                .map(|raw| split_list(&raw))
                .unwrap_or_default(),
        })
    }
}

impl AuthConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            unmatched_routes: parse_or("AUTH_UNMATCHED_ROUTES", UnmatchedRoutePolicy::Deny)?,
        })
    }
}

impl RateLimitConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            enabled: parse_or("RATE_LIMIT_ENABLED", true)?,
        })
    }
}

fn required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::Missing(key.to_string()))
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

fn parse_or<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        Err(_) => Ok(default),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list(" root@x.com, ,ops@x.com "),
            vec!["root@x.com".to_string(), "ops@x.com".to_string()]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_identity_debug_redacts_secrets() {
        let identity = IdentityConfig {
            tokeninfo_url: DEFAULT_TOKENINFO_URL.to_string(),
            timeout_secs: DEFAULT_IDENTITY_TIMEOUT_SECS,
            bypass_enabled: true,
            master_token: Some("very-secret".to_string()),
            internal_secret: Some("also-secret".to_string()),
            superadmin_emails: vec![],
        };

        let rendered = format!("{:?}", identity);
        assert!(!rendered.contains("very-secret"));
        assert!(!rendered.contains("also-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_jwt_debug_redacts_signing_secret() {
        let jwt = JwtConfig {
            secret: "hs256-signing-secret".to_string(),
            expiry_hours: DEFAULT_JWT_EXPIRY_HOURS,
            refresh_expiry_hours: DEFAULT_REFRESH_TOKEN_EXPIRY_HOURS,
        };

        let rendered = format!("{:?}", jwt);
        assert!(!rendered.contains("hs256-signing-secret"));
        assert!(rendered.contains("<redacted>"));
        assert!(rendered.contains("expiry_hours: 24"));
    }

    #[test]
    fn test_parse_or_uses_default_when_unset() {
        let port: u16 = parse_or("WWC_TEST_SURELY_UNSET_PORT", DEFAULT_SERVER_PORT).unwrap();
        assert_eq!(port, 5112);
    }
}
