//! Shared plumbing for the background loops: interruptible sleep and
//! per-tick fault isolation.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Per-loop counters returned when a loop thread exits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub ticks: u64,
    /// Ticks that panicked and were skipped
    pub faults: u64,
}

/// Sleep for `period` unless `running` is cleared first.
///
/// Uses `park_timeout` so the controller can `unpark` the thread for an
/// immediate wakeup on stop. Early (spurious) wakeups re-park until the
/// deadline.
pub fn pause(running: &AtomicBool, period: Duration) {
    let deadline = Instant::now() + period;
    while running.load(Ordering::Acquire) {
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        thread::park_timeout(deadline - now);
    }
}

/// Run one tick, converting a panic into a logged fault so the loop keeps
/// going.
pub fn guarded<T>(loop_name: &str, stats: &mut LoopStats, tick: impl FnOnce() -> T) -> Option<T> {
    stats.ticks += 1;
    match catch_unwind(AssertUnwindSafe(tick)) {
        Ok(value) => Some(value),
        Err(payload) => {
            stats.faults += 1;
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            tracing::error!(loop_name, tick = stats.ticks, "Tick failed: {}", message);
            None
        }
    }
}
