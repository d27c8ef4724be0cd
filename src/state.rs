//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor. Everything in it is
//! built once at startup and read-only afterwards.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use crate::auth::{Gate, IdentityVerifier, RouteTable, TokenCodec};
use crate::config::Config;
use crate::constants::rate_limits::REDIS_TIMEOUT_MS;
use crate::middleware::rate_limit::RateLimiter;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Database connection pool
    db: PgPool,

    /// Shared Redis connection for request counters
    rate_limiter: RateLimiter,

    /// Request gate (route table + token codec)
    gate: Gate,

    /// Sign-in identity verifier
    verifier: Arc<dyn IdentityVerifier>,

    /// Application configuration
    config: Config,
}

impl AppState {
    /// Create a new application state
    pub fn new(
        db: PgPool,
        redis: redis::Client,
        verifier: Arc<dyn IdentityVerifier>,
        config: Config,
    ) -> Self {
        let gate = Gate::new(
            RouteTable::standard(config.auth.unmatched_routes),
            TokenCodec::from_config(&config.jwt),
        );

        let rate_limiter = RateLimiter::new(redis, Duration::from_millis(REDIS_TIMEOUT_MS));

        Self {
            inner: Arc::new(AppStateInner {
                db,
                rate_limiter,
                gate,
                verifier,
                config,
            }),
        }
    }

    /// Get a reference to the database pool
    pub fn db(&self) -> &PgPool {
        &self.inner.db
    }

    /// Get a reference to the rate limiter
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.inner.rate_limiter
    }

    /// Get a reference to the request gate
    pub fn gate(&self) -> &Gate {
        &self.inner.gate
    }

    /// Get a reference to the session token codec
    pub fn tokens(&self) -> &TokenCodec {
        self.inner.gate.tokens()
    }

    /// Get a reference to the sign-in identity verifier
    pub fn verifier(&self) -> &dyn IdentityVerifier {
        self.inner.verifier.as_ref()
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
