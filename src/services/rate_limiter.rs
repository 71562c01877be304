//! Login attempt limiter.
//!
//! Counts login attempts per caller identity inside a fixed window that
//! starts at the first attempt. The sixth attempt inside the window is
//! refused without looking at the password.
//!
//! # Memory
//!
//! The map is capped at `capacity` identities. When it is full, identities
//! whose window has elapsed are swept; if none have, the identity with the
//! oldest window start is evicted to make room.
//!
//! State is process-local. Several instances behind a load balancer each
//! keep their own counts.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Attempts allowed per window.
pub const MAX_ATTEMPTS: u32 = 5;

/// Window length, measured from the first attempt.
pub const WINDOW: Duration = Duration::from_secs(10 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Limited,
}

#[derive(Debug, Clone, Copy)]
struct Attempts {
    count: u32,
    first: Instant,
}

#[derive(Debug)]
pub struct LoginRateLimiter {
    attempts: Mutex<HashMap<String, Attempts>>,
    capacity: usize,
    max_attempts: u32,
    window: Duration,
}

impl LoginRateLimiter {
    pub fn new(capacity: usize) -> Self {
        Self::with_limits(capacity, MAX_ATTEMPTS, WINDOW)
    }

    pub fn with_limits(capacity: usize, max_attempts: u32, window: Duration) -> Self {
        Self {
            attempts: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
            max_attempts,
            window,
        }
    }

    /// Record an attempt from `identity` now.
    pub fn register(&self, identity: &str) -> Decision {
        self.register_at(identity, Instant::now())
    }

    /// Record an attempt and decide, as one step under the lock.
    pub fn register_at(&self, identity: &str, now: Instant) -> Decision {
        let mut attempts = self
            .attempts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(entry) = attempts.get_mut(identity) {
            if now.saturating_duration_since(entry.first) > self.window {
                *entry = Attempts { count: 1, first: now };
                return Decision::Allowed;
            }
            entry.count = entry.count.saturating_add(1);
            return if entry.count > self.max_attempts {
                Decision::Limited
            } else {
                Decision::Allowed
            };
        }

        if attempts.len() >= self.capacity {
            self.make_room(&mut attempts, now);
        }
        attempts.insert(identity.to_string(), Attempts { count: 1, first: now });
        Decision::Allowed
    }

    /// Number of identities currently tracked.
    pub fn tracked(&self) -> usize {
        self.attempts
            .lock()
            .map(|a| a.len())
            .unwrap_or_else(|poisoned| poisoned.into_inner().len())
    }

    fn make_room(&self, attempts: &mut HashMap<String, Attempts>, now: Instant) {
        let window = self.window;
        attempts.retain(|_, a| now.saturating_duration_since(a.first) <= window);
        if attempts.len() < self.capacity {
            return;
        }

        let oldest = attempts
            .iter()
            .min_by_key(|(_, a)| a.first)
            .map(|(identity, _)| identity.clone());
        if let Some(identity) = oldest {
            tracing::debug!(%identity, "login limiter full, evicting oldest identity");
            attempts.remove(&identity);
        }
    }
}
