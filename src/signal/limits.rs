//! Per-source signal rate limiting

use chrono::{DateTime, Duration, Utc};
use std::collections::{HashMap, VecDeque};

/// Sliding-window count of accepted signals per source tag
///
/// Owned by the caller that forwards signals; the extractor itself keeps no
/// state between messages. Source tags are compared case-insensitively.
pub struct SignalRateLimiter {
    window: Duration,
    accepted: HashMap<String, VecDeque<DateTime<Utc>>>,
}

impl SignalRateLimiter {
    /// Create a limiter over the given window
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            accepted: HashMap::new(),
        }
    }

    /// Create a limiter over a one hour window
    pub fn hourly() -> Self {
        Self::new(Duration::hours(1))
    }

    /// Signals accepted for `source` within the window ending at `now`
    pub fn recent_count(&mut self, source: &str, now: DateTime<Utc>) -> usize {
        let cutoff = now - self.window;
        match self.accepted.get_mut(&source.to_ascii_lowercase()) {
            Some(times) => {
                while times.front().is_some_and(|t| *t <= cutoff) {
                    times.pop_front();
                }
                times.len()
            }
            None => 0,
        }
    }

    /// Record an accepted signal for `source`
    pub fn record(&mut self, source: &str, at: DateTime<Utc>) {
        self.accepted
            .entry(source.to_ascii_lowercase())
            .or_default()
            .push_back(at);
    }

    /// Forget all history
    pub fn reset(&mut self) {
        self.accepted.clear();
    }
}

impl Default for SignalRateLimiter {
    fn default() -> Self {
        Self::hourly()
    }
}
