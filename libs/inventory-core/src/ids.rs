use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

/// Produces the string identifiers of scoped rows.
///
/// Uniqueness is only guaranteed per generator instance. A generator backing a
/// database that already holds ids must be seeded past them.
pub trait IdGenerator: Send + Sync {
    /// Returns `"<prefix>-<digits>"`, never repeating a value within this generator.
    fn next_id(&self, prefix: &str) -> String;
}

/// Clock-seeded counter: the digits are the current time in microseconds,
/// bumped past the last issued value when two calls land on the same tick.
///
/// A clock that reads earlier than the last issued value (or before the epoch)
/// only slows the digits down to a plain counter; they never go backwards.
#[derive(Debug, Default)]
pub struct MonotonicIdGenerator {
    last: AtomicU64,
}

impl MonotonicIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts after `last`, e.g. the largest suffix already stored.
    pub fn resume_after(last: u64) -> Self {
        Self {
            last: AtomicU64::new(last),
        }
    }

    fn next_value(&self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_micros()).unwrap_or(0);
        let prev = self
            .last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |prev| {
                Some(now.max(prev + 1))
            })
            .unwrap_or_else(|prev| prev);
        now.max(prev + 1)
    }
}

impl IdGenerator for MonotonicIdGenerator {
    fn next_id(&self, prefix: &str) -> String {
        format!("{prefix}-{}", self.next_value())
    }
}
