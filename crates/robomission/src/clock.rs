//! Time sources and tick scheduling.
//!
//! [`Clock`] reports monotonic time since its own origin. [`Ticker`] is the
//! runner's only suspension point. The fake variants let tests drive ticks
//! without real time passing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default poll interval (2 ms)
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 2;

/// Monotonic time source.
pub trait Clock {
    /// Time since the clock's origin.
    fn now(&self) -> Duration;

    fn elapsed_since(&self, earlier: Duration) -> Duration {
        self.now().saturating_sub(earlier)
    }
}

/// Wall time from [`std::time::Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Manually advanced clock for deterministic tests.
///
/// Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct FakeClock {
    nanos: Arc<AtomicU64>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.nanos.fetch_add(saturating_nanos(by), Ordering::SeqCst);
    }

    pub fn set(&self, to: Duration) {
        self.nanos.store(saturating_nanos(to), Ordering::SeqCst);
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }
}

fn saturating_nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}

/// Tick scheduler.
pub trait Ticker {
    fn interval(&self) -> Duration;

    /// Suspend until the next tick boundary.
    fn wait_next(&mut self);
}

/// Sleeps until fixed tick boundaries.
///
/// Boundaries that were already missed are skipped instead of replayed, so a
/// slow tick never causes a burst of catch-up ticks.
#[derive(Debug, Clone)]
pub struct IntervalTicker {
    interval: Duration,
    next: Option<Instant>,
}

impl IntervalTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: None,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }
}

impl Default for IntervalTicker {
    fn default() -> Self {
        Self::from_millis(DEFAULT_TICK_INTERVAL_MS)
    }
}

impl Ticker for IntervalTicker {
    fn interval(&self) -> Duration {
        self.interval
    }

    fn wait_next(&mut self) {
        let now = Instant::now();
        let deadline = self.next.unwrap_or(now + self.interval);
        if deadline > now {
            std::thread::sleep(deadline - now);
            self.next = Some(deadline + self.interval);
        } else {
            self.next = Some(now + self.interval);
        }
    }
}

/// Advances a [`FakeClock`] by one interval per tick without sleeping.
#[derive(Debug, Clone)]
pub struct FakeTicker {
    clock: FakeClock,
    interval: Duration,
    ticks: u64,
}

impl FakeTicker {
    pub fn new(clock: FakeClock, interval: Duration) -> Self {
        Self {
            clock,
            interval,
            ticks: 0,
        }
    }

    /// Number of completed waits.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Ticker for FakeTicker {
    fn interval(&self) -> Duration {
        self.interval
    }

    fn wait_next(&mut self) {
        self.clock.advance(self.interval);
        self.ticks += 1;
    }
}
