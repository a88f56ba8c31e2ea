//! Sliding-window request limiter keyed by caller identity.
//!
//! The counters live in memory only: they are per [`RateLimiter`] instance
//! and start empty on every process start, so separate processes sharing a
//! database do not share limits.
//!
//! Keys that stay idle for a whole window are swept out at most once per
//! window, during an ordinary check, so the map only holds recent callers.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::error::{Result, TravelError};

/// Admits at most `max_requests` per key within any `window`.
#[derive(Debug)]
pub struct RateLimiter {
    /// Admission times per key within the current window
    requests: DashMap<String, Vec<Instant>>,
    last_sweep: Mutex<Instant>,
    window: Duration,
    max_requests: u32,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            requests: DashMap::new(),
            last_sweep: Mutex::new(Instant::now()),
            window,
            max_requests,
        }
    }

    /// Records a request for `key`, or fails with `RateLimited` when the key
    /// has used up its window.
    pub fn check(&self, key: &str) -> Result<()> {
        if self.check_and_record(key, Instant::now()) {
            Ok(())
        } else {
            Err(TravelError::RateLimited {
                key: key.to_string(),
            })
        }
    }

    fn check_and_record(&self, key: &str, now: Instant) -> bool {
        self.sweep_if_due(now);

        let mut entry = self.requests.entry(key.to_string()).or_default();
        entry.retain(|&at| now.saturating_duration_since(at) < self.window);

        if entry.len() >= self.max_requests as usize {
            return false;
        }

        entry.push(now);
        true
    }

    /// Drops keys with no requests left in the window, at most once a window.
    fn sweep_if_due(&self, now: Instant) {
        {
            // A panic while holding the lock leaves the instant usable
            let mut last_sweep = self.last_sweep.lock().unwrap_or_else(PoisonError::into_inner);
            if now.saturating_duration_since(*last_sweep) < self.window {
                return;
            }
            *last_sweep = now;
        }

        self.requests.retain(|_, times| {
            times.retain(|&at| now.saturating_duration_since(at) < self.window);
            !times.is_empty()
        });
    }

    /// Number of keys currently tracked.
    pub fn tracked_keys(&self) -> usize {
        self.requests.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_once_window_is_full() {
        let limiter = RateLimiter::new(2, Duration::from_secs(60));
        assert!(limiter.check("alice").is_ok());
        assert!(limiter.check("alice").is_ok());
        assert!(matches!(
            limiter.check("alice"),
            Err(TravelError::RateLimited { ref key }) if key == "alice"
        ));
    }

    #[test]
    fn test_keys_are_counted_separately() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        assert!(limiter.check("alice").is_ok());
        assert!(limiter.check("bob").is_ok());
        assert!(limiter.check("alice").is_err());
    }

    #[test]
    fn test_old_requests_leave_the_window() {
        let limiter = RateLimiter::new(1, Duration::from_secs(10));
        let start = Instant::now();
        assert!(limiter.check_and_record("alice", start));
        assert!(!limiter.check_and_record("alice", start + Duration::from_secs(5)));
        assert!(limiter.check_and_record("alice", start + Duration::from_secs(11)));
    }

    #[test]
    fn test_rejected_requests_are_not_recorded() {
        let limiter = RateLimiter::new(1, Duration::from_secs(10));
        let start = Instant::now();
        assert!(limiter.check_and_record("alice", start));
        assert!(!limiter.check_and_record("alice", start + Duration::from_secs(9)));
        // only the admitted request counts, so the window reopens at 10s
        assert!(limiter.check_and_record("alice", start + Duration::from_secs(10)));
    }

    #[test]
    fn test_idle_keys_are_swept_once_a_window_passes() {
        let limiter = RateLimiter::new(5, Duration::from_secs(10));
        let start = Instant::now();
        for user in ["alice", "bob", "carol"] {
            assert!(limiter.check_and_record(user, start));
        }
        assert!(limiter.check_and_record("dave", start + Duration::from_secs(5)));
        assert_eq!(limiter.tracked_keys(), 4);

        // alice, bob and carol fell out of the window; dave is still in it
        assert!(limiter.check_and_record("erin", start + Duration::from_secs(12)));
        assert_eq!(limiter.tracked_keys(), 2);
    }
}
