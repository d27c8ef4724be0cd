//! Rate limiting middleware
//!
//! Fixed-window counters in Redis keyed by client address and path bucket.
//! When Redis is unavailable requests are let through.

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use redis::{
    aio::{ConnectionManager, ConnectionManagerConfig},
    AsyncCommands, RedisError, RedisResult,
};
use std::{net::SocketAddr, time::Duration};
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::{constants, constants::paths, state::AppState};

/// Rate limit middleware
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !state.config().rate_limit.enabled {
        return next.run(request).await;
    }

    let ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let path = request.uri().path();

    let (limit, window) = get_rate_limit(path);
    let key = format!("rate_limit:{}:{}", ip, path_bucket(path));

    match state.rate_limiter().hit(&key, window).await {
        Ok(count) if count > limit => {
            return (
                StatusCode::TOO_MANY_REQUESTS,
                format!("Rate limit exceeded. Try again in {} seconds.", window),
            )
                .into_response();
        }
        Ok(_) => {}
        Err(e) => warn!(error = %e, key = %key, "Rate limiter unavailable, allowing request"),
    }

    next.run(request).await
}

/// Redis-backed request counters.
///
/// One [`ConnectionManager`] is shared by all requests. It is created on first
/// use so the server starts while Redis is down; a failed attempt leaves the cell
/// empty and the next request tries again.
pub struct RateLimiter {
    client: redis::Client,
    manager: OnceCell<ConnectionManager>,
    timeout: Duration,
}

impl RateLimiter {
    pub fn new(client: redis::Client, timeout: Duration) -> Self {
        Self {
            client,
            manager: OnceCell::new(),
            timeout,
        }
    }

    /// Count one request against `key`, starting the window on the first hit.
    ///
    /// Bounded by the limiter timeout even when Redis never answers.
    pub async fn hit(&self, key: &str, window: i64) -> RedisResult<i64> {
        tokio::time::timeout(self.timeout * 2, self.count(key, window))
            .await
            .map_err(|_| RedisError::from(std::io::Error::from(std::io::ErrorKind::TimedOut)))?
    }

    async fn count(&self, key: &str, window: i64) -> RedisResult<i64> {
        let mut conn = self.connection().await?;
        let count: i64 = conn.incr(key, 1).await?;

        if count == 1 {
            let _: () = conn.expire(key, window).await?;
        }

        Ok(count)
    }

    async fn connection(&self) -> RedisResult<ConnectionManager> {
        self.manager
            .get_or_try_init(|| async {
                let config = ConnectionManagerConfig::new()
                    .set_connection_timeout(self.timeout)
                    .set_response_timeout(self.timeout)
                    .set_number_of_retries(1);
                let manager =
                    ConnectionManager::new_with_config(self.client.clone(), config).await?;
                info!("Connected to Redis for rate limiting");
                Ok::<_, RedisError>(manager)
            })
            .await
            .cloned()
    }
}

/// Get rate limit for a path
fn get_rate_limit(path: &str) -> (i64, i64) {
    if is_sign_in(path) {
        (
            constants::rate_limits::AUTH_MAX_REQUESTS,
            constants::rate_limits::AUTH_WINDOW_SECS,
        )
    } else {
        (
            constants::rate_limits::GENERAL_MAX_REQUESTS,
            constants::rate_limits::GENERAL_WINDOW_SECS,
        )
    }
}

fn is_sign_in(path: &str) -> bool {
    path == paths::CREATE || path == paths::REFRESH
}

/// Get bucket for path (for grouping similar endpoints)
fn path_bucket(path: &str) -> &'static str {
    if is_sign_in(path) {
        "auth"
    } else if path.starts_with("/users") {
        "users"
    } else if path.starts_with("/contests") {
        "contests"
    } else if path.starts_with("/problems") {
        "problems"
    } else {
        "general"
    }
}
