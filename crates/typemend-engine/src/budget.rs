//! Soft per-wave budget bounding wave size.
//!
//! The budget keeps downstream edit application responsive: a wave stops
//! growing once it carries more than [`WaveBudget::max_edits`] edits, or once
//! it carries any edits and the scan has run longer than
//! [`WaveBudget::max_elapsed`]. The budget is checked after each unit is
//! processed, never preemptively, so a single unit's mutators always run to
//! completion even when the previous unit already blew the budget.

use std::time::{Duration, Instant};

/// Soft limits on one wave's size and scan time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveBudget {
    /// Edit count above which the wave stops accepting further units.
    pub max_edits: usize,
    /// Scan duration after which a non-empty wave stops accepting units.
    pub max_elapsed: Duration,
}

impl WaveBudget {
    /// Default edit ceiling per wave.
    pub const DEFAULT_MAX_EDITS: usize = 100;
    /// Default scan-time ceiling per wave.
    pub const DEFAULT_MAX_ELAPSED: Duration = Duration::from_millis(10_000);

    /// Creates a budget with explicit limits.
    #[must_use]
    pub const fn new(max_edits: usize, max_elapsed: Duration) -> Self {
        Self {
            max_edits,
            max_elapsed,
        }
    }

    /// Returns `true` when the wave should stop before the next unit.
    ///
    /// An empty wave never stops on elapsed time alone; a wave with edits
    /// stops once the scan outlives `max_elapsed`, and any wave stops once
    /// its edit count strictly exceeds `max_edits`.
    #[must_use]
    pub fn reached(&self, added: usize, started: Instant) -> bool {
        added > self.max_edits || (added > 0 && started.elapsed() > self.max_elapsed)
    }
}

impl Default for WaveBudget {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_EDITS, Self::DEFAULT_MAX_ELAPSED)
    }
}
