//! Time helpers and the clock seam used by reducers that stamp records.

use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

thread_local! {
    static LAST_TIMESTAMP_MS: Cell<u64> = const { Cell::new(0) };
}

/// Returns the current unix timestamp in milliseconds.
pub fn unix_time_ms_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Returns a monotonic unix millisecond timestamp.
///
/// Values are monotonic within the current thread even when the system clock does not advance.
pub fn next_monotonic_timestamp_ms() -> u64 {
    let now = unix_time_ms_now();
    LAST_TIMESTAMP_MS.with(|last| {
        let next = now.max(last.get().saturating_add(1));
        last.set(next);
        next
    })
}

/// Source of wall-clock timestamps for record creation and modification.
pub trait Clock {
    /// Current time as unix milliseconds.
    fn now_ms(&self) -> u64;
}

#[derive(Debug, Clone, Copy, Default)]
/// Clock backed by the system time, monotonic per thread.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        next_monotonic_timestamp_ms()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Clock that always reports the same instant.
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_ms(&self) -> u64 {
        self.0
    }
}
