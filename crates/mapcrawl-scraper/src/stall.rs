//! Plateau detection for a lazily loading feed.

use mapcrawl_core::DEFAULT_STALL_PASSES;

/// Signals feed exhaustion once the same visible-item count has been
/// observed on `max_stall_passes` consecutive passes.
///
/// The pass on which a count first appears is the first pass of its run, so
/// with a threshold of 6 the sequence `3, 5, 5, 5, 5, 5, 5` stops on the
/// seventh observation. A slow feed can legitimately report the same count
/// for a few passes before loading more; the threshold absorbs that.
#[derive(Debug, Clone)]
pub struct StallDetector {
    max_stall_passes: u32,
    last_visible_count: usize,
    consecutive_stall_passes: u32,
}

impl Default for StallDetector {
    fn default() -> Self {
        Self::new(DEFAULT_STALL_PASSES)
    }
}

impl StallDetector {
    /// Creates a detector that stops after `max_stall_passes` identical
    /// observations. A threshold of zero is treated as one.
    #[must_use]
    pub fn new(max_stall_passes: u32) -> Self {
        Self {
            max_stall_passes: max_stall_passes.max(1),
            last_visible_count: 0,
            consecutive_stall_passes: 0,
        }
    }

    /// Records the visible-item count of the latest pass and returns `true`
    /// when the crawl should stop.
    pub fn observe(&mut self, current_visible_count: usize) -> bool {
        if current_visible_count == self.last_visible_count {
            self.consecutive_stall_passes += 1;
        } else {
            self.consecutive_stall_passes = 1;
        }
        self.last_visible_count = current_visible_count;
        self.consecutive_stall_passes >= self.max_stall_passes
    }

    #[must_use]
    pub fn consecutive_stall_passes(&self) -> u32 {
        self.consecutive_stall_passes
    }

    #[must_use]
    pub fn last_visible_count(&self) -> usize {
        self.last_visible_count
    }
}
