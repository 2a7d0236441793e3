//! Human-like pacing between scroll passes.
//!
//! The orchestrator sleeps for [`Pacing::next_delay`] after every scroll so
//! that pass cadence does not look machine-regular. Tests swap in
//! [`NoPacing`] to run the loop without waiting.

use std::time::Duration;

use rand::Rng;

/// Source of the pause inserted after each scroll advance.
pub trait Pacing {
    fn next_delay(&mut self) -> Duration;
}

/// Uniformly random pause within `[min_ms, max_ms]`.
///
/// | Bound | Default |
/// |-------|---------|
/// | min   | 2 500 ms |
/// | max   | 3 800 ms |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JitterPacing {
    min_ms: u64,
    max_ms: u64,
}

impl Default for JitterPacing {
    fn default() -> Self {
        Self {
            min_ms: 2_500,
            max_ms: 3_800,
        }
    }
}

impl JitterPacing {
    /// Creates a pacing policy over `[min_ms, max_ms]`. Swapped bounds are reordered.
    #[must_use]
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms: max_ms.max(min_ms),
        }
    }

    #[must_use]
    pub fn bounds_ms(&self) -> (u64, u64) {
        (self.min_ms, self.max_ms)
    }
}

impl Pacing for JitterPacing {
    fn next_delay(&mut self) -> Duration {
        let delay_ms = rand::rng().random_range(self.min_ms..=self.max_ms);
        Duration::from_millis(delay_ms)
    }
}

/// Zero-delay pacing for tests and replayed feeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoPacing;

impl Pacing for NoPacing {
    fn next_delay(&mut self) -> Duration {
        Duration::ZERO
    }
}

impl<F> Pacing for F
where
    F: FnMut() -> Duration,
{
    fn next_delay(&mut self) -> Duration {
        self()
    }
}
