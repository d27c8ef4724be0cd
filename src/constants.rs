//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 5112;

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default access token expiry in hours
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;

/// Default refresh token expiry in hours
pub const DEFAULT_REFRESH_TOKEN_EXPIRY_HOURS: i64 = 168;

/// Token type claim for access tokens
pub const ACCESS_TOKEN_TYPE: &str = "access";

/// Token type claim for refresh tokens
pub const REFRESH_TOKEN_TYPE: &str = "refresh";

/// Scheme prefix of the Authorization header
pub const BEARER_PREFIX: &str = "Bearer ";

/// Google OAuth2 tokeninfo endpoint
pub const DEFAULT_TOKENINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/tokeninfo";

/// Timeout for identity provider calls in seconds
pub const DEFAULT_IDENTITY_TIMEOUT_SECS: u64 = 5;

// =============================================================================
// USER ROLES
// =============================================================================

/// User role identifiers
pub mod roles {
    pub const USER: &str = "user";
    pub const SUPERADMIN: &str = "superadmin";

    /// All user roles
    pub const ALL: &[&str] = &[USER, SUPERADMIN];
}

// =============================================================================
// ROUTES
// =============================================================================

/// Route paths and prefixes known to the request gate
pub mod paths {
    pub const CREATE: &str = "/create";
    pub const REFRESH: &str = "/refresh";
    pub const HEALTH: &str = "/health";

    pub const USERS_GET: &str = "/users/get";
    pub const USERS_UPDATE: &str = "/users/update/";

    pub const PROBLEMS_GET: &str = "/problems/get";
    pub const PROBLEMS_UPLOAD: &str = "/problems/upload";
    pub const PROBLEMS_NOT_VISIBLE: &str = "/problems/getnotvisible";
    pub const PROBLEMS_UPDATE: &str = "/problems/update/";

    pub const CONTESTS_GET: &str = "/contests/get";
    pub const CONTESTS_CREATE: &str = "/contests/create";
    pub const CONTESTS_LEADERBOARD: &str = "/contests/leaderboard";
    pub const CONTESTS_REGISTER: &str = "/contests/register/";
    pub const CONTESTS_REGISTRATIONS: &str = "/contests/get/registrations/";
    pub const CONTESTS_CHECK_REGISTRATION: &str = "/contests/check/registrations/";
}

/// Router path parameter names read by context enrichment
pub mod params {
    pub const EMAIL: &str = "email";
    pub const CONTEST_ID: &str = "contestId";
}

// =============================================================================
// PROBLEMS
// =============================================================================

/// Number of test cases exposed as public samples
pub const SAMPLE_TEST_CASES: usize = 2;

/// Maximum problem title length
pub const MAX_PROBLEM_TITLE_LENGTH: u64 = 256;

/// Maximum contest title length
pub const MAX_CONTEST_TITLE_LENGTH: u64 = 256;

// =============================================================================
// RATE LIMITING
// =============================================================================

/// Rate limiting configuration
pub mod rate_limits {
    /// Account creation / login - max requests
    pub const AUTH_MAX_REQUESTS: i64 = 10;
    /// Account creation / login - window in seconds
    pub const AUTH_WINDOW_SECS: i64 = 60;

    /// General API - max requests
    pub const GENERAL_MAX_REQUESTS: i64 = 100;
    /// General API - window in seconds
    pub const GENERAL_WINDOW_SECS: i64 = 60;

    /// Budget for connecting to Redis and for each counter command, in milliseconds
    pub const REDIS_TIMEOUT_MS: u64 = 500;
}
