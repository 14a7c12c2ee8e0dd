use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;
use tokio::time::{sleep, Duration};
use reqwest::Response;

/// Tracks GitHub's primary rate limit from response headers and waits for
/// the reset when the quota runs out.
pub struct RateLimiter {
    state: Mutex<RateLimitState>,
}

struct RateLimitState {
    remaining: Option<u32>,
    reset_at: Option<Instant>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RateLimitState {
                remaining: None,
                reset_at: None,
            }),
        }
    }

    pub async fn wait(&self) {
        let wait_duration = {
            let state = self.state.lock().await;
            match (state.remaining, state.reset_at) {
                (Some(0), Some(reset_at)) => reset_at.checked_duration_since(Instant::now()),
                _ => None,
            }
        };

        if let Some(wait_duration) = wait_duration {
            tracing::info!("Rate limited, waiting {:?}", wait_duration);
            sleep(wait_duration).await;
            let mut state = self.state.lock().await;
            state.remaining = None;
            state.reset_at = None;
        }
    }

    pub async fn update_from_response(&self, response: &Response) {
        let remaining = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u32>().ok());

        let Some(remaining) = remaining else {
            return;
        };

        let reset = response
            .headers()
            .get("x-ratelimit-reset")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let mut state = self.state.lock().await;
        state.remaining = Some(remaining);
        state.reset_at = reset.and_then(reset_instant);
    }

    pub async fn remaining(&self) -> Option<u32> {
        self.state.lock().await.remaining
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

fn reset_instant(reset_timestamp: u64) -> Option<Instant> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    (reset_timestamp > now).then(|| Instant::now() + Duration::from_secs(reset_timestamp - now))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_in_the_past_is_ignored() {
        assert!(reset_instant(0).is_none());
    }

    #[test]
    fn test_reset_in_the_future() {
        let future = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
            + 30;
        assert!(reset_instant(future).is_some());
    }

    #[tokio::test]
    async fn test_wait_without_limit_returns_immediately() {
        let limiter = RateLimiter::new();
        limiter.wait().await;
        assert_eq!(limiter.remaining().await, None);
    }
}
