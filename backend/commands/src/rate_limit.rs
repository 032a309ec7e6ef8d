//! Per-(user, command) sliding-window rate limiter.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::debug;

use crate::types::RateLimit;

/// Rate limit result.
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    pub allowed: bool,
    /// Time until the oldest counted request leaves the window.
    pub retry_after: Duration,
    pub remaining: usize,
}

/// How often idle windows are swept.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

struct Window {
    stamps: VecDeque<Instant>,
    span: Duration,
}

#[derive(Default)]
struct Windows {
    by_key: HashMap<(i64, String), Window>,
    last_sweep: Option<Instant>,
}

impl Windows {
    /// Drop windows whose newest request has left its span.
    fn sweep(&mut self, now: Instant) {
        if self.last_sweep.is_some_and(|at| now.duration_since(at) < SWEEP_INTERVAL) {
            return;
        }
        self.last_sweep = Some(now);
        self.by_key.retain(|_, w| {
            w.stamps.back().is_some_and(|last| now.duration_since(*last) < w.span)
        });
    }
}

#[derive(Default)]
pub struct CommandRateLimiter {
    windows: Mutex<Windows>,
}

impl CommandRateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a request if it fits in the window.
    pub async fn check(&self, user_id: i64, command: &str, limit: RateLimit) -> RateLimitResult {
        self.check_at(user_id, command, limit, Instant::now()).await
    }

    async fn check_at(
        &self,
        user_id: i64,
        command: &str,
        limit: RateLimit,
        now: Instant,
    ) -> RateLimitResult {
        let mut windows = self.windows.lock().await;
        windows.sweep(now);
        let window = windows
            .by_key
            .entry((user_id, command.to_string()))
            .or_insert_with(|| Window { stamps: VecDeque::new(), span: limit.window });
        window.span = limit.window;
        let stamps = &mut window.stamps;

        while let Some(front) = stamps.front() {
            if now.duration_since(*front) >= limit.window {
                stamps.pop_front();
            } else {
                break;
            }
        }

        if stamps.len() < limit.max_requests {
            stamps.push_back(now);
            let remaining = limit.max_requests - stamps.len();
            debug!(user_id, command, remaining, "Rate limit check: allowed");
            RateLimitResult { allowed: true, retry_after: Duration::ZERO, remaining }
        } else {
            let retry_after = stamps
                .front()
                .map(|oldest| limit.window.saturating_sub(now.duration_since(*oldest)))
                .unwrap_or_default();
            debug!(user_id, command, "Rate limit check: denied");
            RateLimitResult { allowed: false, retry_after, remaining: 0 }
        }
    }

    #[cfg(test)]
    async fn tracked(&self) -> usize {
        self.windows.lock().await.by_key.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn limits_after_max() {
        let limiter = CommandRateLimiter::new();
        let limit = RateLimit::new(2, 60);
        assert!(limiter.check(1, "echo", limit).await.allowed);
        assert!(limiter.check(1, "echo", limit).await.allowed);
        let denied = limiter.check(1, "echo", limit).await;
        assert!(!denied.allowed);
        assert!(denied.retry_after > Duration::ZERO);
    }

    #[tokio::test]
    async fn users_and_commands_are_separate() {
        let limiter = CommandRateLimiter::new();
        let limit = RateLimit::new(1, 60);
        assert!(limiter.check(1, "echo", limit).await.allowed);
        assert!(limiter.check(2, "echo", limit).await.allowed);
        assert!(limiter.check(1, "ping", limit).await.allowed);
        assert!(!limiter.check(1, "echo", limit).await.allowed);
    }

    #[tokio::test]
    async fn window_slides() {
        let limiter = CommandRateLimiter::new();
        let limit = RateLimit::new(1, 60);
        let start = Instant::now();
        assert!(limiter.check_at(1, "echo", limit, start).await.allowed);
        assert!(!limiter.check_at(1, "echo", limit, start + Duration::from_secs(59)).await.allowed);
        assert!(limiter.check_at(1, "echo", limit, start + Duration::from_secs(60)).await.allowed);
    }

    #[tokio::test]
    async fn idle_windows_are_dropped() {
        let limiter = CommandRateLimiter::new();
        let limit = RateLimit::new(5, 60);
        let start = Instant::now();
        limiter.check_at(1, "echo", limit, start).await;
        limiter.check_at(2, "echo", limit, start + Duration::from_secs(30)).await;
        assert_eq!(limiter.tracked().await, 2);

        limiter.check_at(3, "echo", limit, start + Duration::from_secs(61)).await;
        assert_eq!(limiter.tracked().await, 2);
        limiter.check_at(3, "echo", limit, start + Duration::from_secs(130)).await;
        assert_eq!(limiter.tracked().await, 1);
    }
}
