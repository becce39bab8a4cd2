use std::time::{Duration, Instant};

/// Time source for the tick loop.
///
/// The loop reads `now` to decide which phase it is in and calls `sleep`
/// between ticks, so swapping the clock changes pacing without touching
/// the maneuver math.
pub trait Clock {
    /// Seconds since an arbitrary, fixed origin.
    fn now(&self) -> f64;

    /// Suspend for roughly `seconds`.
    fn sleep(&mut self, seconds: f64);
}

// ---------------------------------------------------------------------------
// Real time
// ---------------------------------------------------------------------------

/// Monotonic wall clock; `sleep` blocks the thread.
#[derive(Debug, Clone)]
pub struct WallClock {
    origin: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    fn sleep(&mut self, seconds: f64) {
        if seconds > 0.0 && seconds.is_finite() {
            std::thread::sleep(Duration::from_secs_f64(seconds));
        }
    }
}

// ---------------------------------------------------------------------------
// Simulated time
// ---------------------------------------------------------------------------

/// Deterministic clock: time only moves when the loop sleeps.
///
/// `stall` scales every sleep, so a stall of 3.0 behaves like a loop whose
/// ticks take three times longer than requested.
#[derive(Debug, Clone)]
pub struct ManualClock {
    t: f64,
    stall: f64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self { t: 0.0, stall: 1.0 }
    }

    pub fn with_stall(stall: f64) -> Self {
        Self { t: 0.0, stall }
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.t
    }

    fn sleep(&mut self, seconds: f64) {
        self.t += seconds * self.stall;
    }
}
