//! Time-to-live cache for fetched tables.

use std::time::{Duration, Instant};

/// Holds one value together with the instant it was produced.
///
/// Callers pass `now` explicitly so expiry can be driven from tests.
#[derive(Debug)]
pub struct TtlCache<T> {
    ttl: Duration,
    entry: Option<(Instant, T)>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached value if it is younger than the TTL.
    pub fn get(&self, now: Instant) -> Option<&T> {
        self.entry
            .as_ref()
            .filter(|(stored_at, _)| now.saturating_duration_since(*stored_at) < self.ttl)
            .map(|(_, value)| value)
    }

    /// Return the fresh cached value, or produce and store a new one.
    ///
    /// Errors from `produce` are returned as-is and leave the cache untouched.
    pub fn get_or_try_insert_with<E, F>(&mut self, now: Instant, produce: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(value) = self.get(now) {
            return Ok(value.clone());
        }

        let value = produce()?;
        self.entry = Some((now, value.clone()));
        Ok(value)
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}
