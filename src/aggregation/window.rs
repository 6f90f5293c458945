// Fixed-width window aggregation for peaks.
// Windows are half-open [k·W, (k+1)·W) derived by floor division; only
// windows holding at least one sample are ever materialized.

use std::collections::BTreeMap;
use std::num::NonZeroU32;

/// Window width in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window(NonZeroU32);

impl Window {
    pub const SECOND: Window = Window(NonZeroU32::MIN);
    pub const HALF_MINUTE: Window = Window(NonZeroU32::new(30).unwrap());
    pub const MINUTE: Window = Window(NonZeroU32::new(60).unwrap());

    /// `None` for a zero width.
    pub fn from_secs(secs: u32) -> Option<Self> {
        NonZeroU32::new(secs).map(Window)
    }

    pub fn secs(&self) -> i64 {
        i64::from(self.0.get())
    }

    /// Index of the window containing `timestamp`; negative timestamps floor
    /// toward -∞ like positive ones floor toward 0.
    pub fn index(&self, timestamp: i64) -> i64 {
        timestamp.div_euclid(self.secs())
    }

    /// Start of the window containing `timestamp`.
    pub fn start(&self, timestamp: i64) -> i64 {
        self.index(timestamp).saturating_mul(self.secs())
    }
}

/// Rate-style result: raw values summed per window first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateStats {
    pub total: u64,
    /// Windows with at least one sample.
    pub active_windows: usize,
    /// Largest single-window sum.
    pub peak: u64,
    /// `total / active_windows`; `None` with no samples.
    pub average: Option<f64>,
}

/// Per-window sums keyed by window start; a sum saturates at `u64::MAX`.
pub fn window_sums(
    samples: impl IntoIterator<Item = (i64, u64)>,
    window: Window,
) -> BTreeMap<i64, u64> {
    let mut sums: BTreeMap<i64, u64> = BTreeMap::new();
    for (timestamp, value) in samples {
        let sum = sums.entry(window.start(timestamp)).or_default();
        *sum = sum.saturating_add(value);
    }
    sums
}

pub fn rate_stats(samples: impl IntoIterator<Item = (i64, u64)>, window: Window) -> RateStats {
    let sums = window_sums(samples, window);
    let total = sums.values().fold(0u64, |acc, v| acc.saturating_add(*v));
    let peak = sums.values().copied().max().unwrap_or(0);
    let active_windows = sums.len();
    let average = (active_windows > 0).then(|| total as f64 / active_windows as f64);
    RateStats {
        total,
        active_windows,
        peak,
        average,
    }
}

/// Count-style result: occurrences counted per window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountStats {
    pub total: usize,
    /// Largest single-window count.
    pub peak: usize,
    /// Seconds between the first and last occurrence.
    pub span: i64,
    /// Denominator of `average`: `span / W`, floored to one window.
    pub windows: f64,
    pub average: f64,
}

impl CountStats {
    pub fn empty() -> Self {
        Self {
            total: 0,
            peak: 0,
            span: 0,
            windows: 0.0,
            average: 0.0,
        }
    }
}

pub fn count_stats(timestamps: impl IntoIterator<Item = i64>, window: Window) -> CountStats {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    let mut first = i64::MAX;
    let mut last = i64::MIN;
    let mut total = 0usize;
    for t in timestamps {
        *counts.entry(window.index(t)).or_default() += 1;
        first = first.min(t);
        last = last.max(t);
        total += 1;
    }
    if total == 0 {
        return CountStats::empty();
    }

    let span = last.saturating_sub(first);
    let windows = (span as f64 / window.secs() as f64).max(1.0);
    CountStats {
        total,
        peak: counts.values().copied().max().unwrap_or(0),
        span,
        windows,
        average: total as f64 / windows,
    }
}
