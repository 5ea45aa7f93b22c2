use axum::{
    Json,
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::{
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{AtomicI64, Ordering},
    },
};
use tracing::{debug, warn};

use crate::analysis::dtos::ErrorResponse;

/// Fixed-window request counter keyed by client IP.
///
/// Entries whose window has expired are swept at most once per window, so
/// the map holds roughly the clients seen in the last two windows.
#[derive(Clone)]
pub struct RateLimit {
    store: Arc<DashMap<String, RateLimitData>>,
    last_sweep: Arc<AtomicI64>,
    max_requests: u32,
    window_seconds: i64,
}

#[derive(Debug, Clone)]
struct RateLimitData {
    count: u32,
    window_start: DateTime<Utc>,
}

impl RateLimit {
    pub fn new(max_requests: u32, window_seconds: i64) -> Self {
        Self {
            store: Arc::new(DashMap::new()),
            last_sweep: Arc::new(AtomicI64::new(i64::MIN)),
            max_requests,
            window_seconds,
        }
    }

    /// Count one request from `key` at `now`; false once the window is spent.
    pub fn check(&self, key: &str, now: DateTime<Utc>) -> bool {
        self.sweep_expired(now);

        let window = Duration::seconds(self.window_seconds);
        let mut entry = self
            .store
            .entry(key.to_string())
            .or_insert_with(|| RateLimitData {
                count: 0,
                window_start: now,
            });

        let data = entry.value_mut();

        if now.signed_duration_since(data.window_start) >= window {
            data.count = 0;
            data.window_start = now;
        }

        data.count = data.count.saturating_add(1);
        data.count <= self.max_requests
    }

    /// Drop clients whose window ended. Must not run while an entry guard is
    /// held.
    fn sweep_expired(&self, now: DateTime<Utc>) {
        let now_secs = now.timestamp();
        let last = self.last_sweep.load(Ordering::Relaxed);
        if now_secs.saturating_sub(last) < self.window_seconds {
            return;
        }
        // One caller wins the sweep for this window
        if self
            .last_sweep
            .compare_exchange(last, now_secs, Ordering::AcqRel, Ordering::Relaxed)
            .is_err()
        {
            return;
        }

        let window = Duration::seconds(self.window_seconds);
        let before = self.store.len();
        self.store
            .retain(|_, data| now.signed_duration_since(data.window_start) < window);
        let removed = before.saturating_sub(self.store.len());
        if removed > 0 {
            debug!(
                removed,
                remaining = self.store.len(),
                "Swept expired rate limit entries"
            );
        }
    }

    pub fn tracked_clients(&self) -> usize {
        self.store.len()
    }
}

/// IP-based rate limiting middleware.
pub async fn rate_limit_middleware(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(rate_limit): State<RateLimit>,
    req: Request,
    next: Next,
) -> Response {
    let ip = addr.ip().to_string();

    if !rate_limit.check(&ip, Utc::now()) {
        warn!(client = %ip, path = %req.uri().path(), "Rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(ErrorResponse {
                error: "Rate limit exceeded".to_string(),
            }),
        )
            .into_response();
    }

    next.run(req).await
}
