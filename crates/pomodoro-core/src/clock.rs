//! Time sources for the engine
//!
//! - SystemClock: the real monotonic clock, sleeps the thread
//! - ManualClock: virtual time that jumps forward on sleep (for tests and dry runs)

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Trait for the engine's time source
pub trait Clock: Send + Sync {
    /// Current point in time
    fn now(&self) -> Instant;

    /// Block for roughly `duration`
    fn sleep(&self, duration: Duration);
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Virtual clock. `sleep` returns immediately after moving time forward.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    offset_nanos: AtomicU64,
    slept_nanos: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset_nanos: AtomicU64::new(0),
            slept_nanos: AtomicU64::new(0),
        }
    }

    /// Move time forward without counting it as sleep
    pub fn advance(&self, duration: Duration) {
        add_saturating(&self.offset_nanos, duration);
    }

    /// Total virtual time spent in `sleep`
    pub fn slept(&self) -> Duration {
        Duration::from_nanos(self.slept_nanos.load(Ordering::SeqCst))
    }

    /// Total virtual time since the clock was created
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.offset_nanos.load(Ordering::SeqCst))
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        add_saturating(&self.slept_nanos, duration);
        add_saturating(&self.offset_nanos, duration);
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }

    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}

/// Counters stick at `u64::MAX` nanoseconds (about 584 years) instead of wrapping.
fn add_saturating(counter: &AtomicU64, duration: Duration) {
    let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
    // The closure never returns None, so the update cannot fail
    let _ = counter.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
        Some(current.saturating_add(nanos))
    });
}
