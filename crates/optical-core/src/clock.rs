//! Monotonic wall clock for record timestamps and timestamp-derived ids.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

/// Hands out strictly increasing UTC timestamps at microsecond granularity.
///
/// Two calls never return the same instant, even when the system clock has not
/// advanced between them (or has stepped backwards).
#[derive(Debug, Default)]
pub struct Clock {
    last_micros: AtomicI64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next timestamp, strictly after every previously returned one.
    pub fn now(&self) -> DateTime<Utc> {
        let micros = self.tick();
        DateTime::from_timestamp_micros(micros).unwrap_or_else(Utc::now)
    }

    /// Build a unique id of the form `<prefix>-<micros>`.
    pub fn stamped_id(&self, prefix: &str) -> String {
        format!("{}-{}", prefix, self.tick())
    }

    fn tick(&self) -> i64 {
        let wall = Utc::now().timestamp_micros();
        let mut last = self.last_micros.load(Ordering::Relaxed);
        loop {
            let next = wall.max(last + 1);
            match self.last_micros.compare_exchange_weak(
                last,
                next,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return next,
                Err(current) => last = current,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_is_strictly_increasing() {
        let clock = Clock::new();
        let mut previous = clock.now();
        for _ in 0..1000 {
            let next = clock.now();
            assert!(next > previous);
            previous = next;
        }
    }

    #[test]
    fn test_stamped_ids_are_unique() {
        let clock = Clock::new();
        let ids: std::collections::HashSet<_> = (0..500).map(|_| clock.stamped_id("INV")).collect();
        assert_eq!(ids.len(), 500);
        assert!(ids.iter().all(|id| id.starts_with("INV-")));
    }
}
