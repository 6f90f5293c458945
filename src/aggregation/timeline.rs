// Timeline builder: per-entity chronological groups plus the global clock
// of distinct timestamps shared by every entity in a run.

use std::collections::BTreeMap;

use super::grouping::group_by_key;

/// One observation: entity key, Unix seconds, and the measured value.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample<K, V> {
    pub key: K,
    pub timestamp: i64,
    pub value: V,
}

impl<K, V> Sample<K, V> {
    pub fn new(key: K, timestamp: i64, value: V) -> Self {
        Self {
            key,
            timestamp,
            value,
        }
    }
}

/// Why a run cannot produce a time-weighted average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degenerate {
    /// Fewer than two distinct timestamps across the whole run.
    TooFewTimestamps,
    /// Last timestamp is not after the first.
    ZeroSpan,
}

impl Degenerate {
    pub fn describe(&self) -> &'static str {
        match self {
            Degenerate::TooFewTimestamps => {
                "need at least two distinct timestamps for a time-weighted average"
            }
            Degenerate::ZeroSpan => "total observation span is zero",
        }
    }
}

/// Distinct timestamps across every entity, ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalClock {
    ticks: Vec<i64>,
}

impl GlobalClock {
    pub fn from_timestamps(timestamps: impl IntoIterator<Item = i64>) -> Self {
        let mut ticks: Vec<i64> = timestamps.into_iter().collect();
        ticks.sort_unstable();
        ticks.dedup();
        Self { ticks }
    }

    pub fn ticks(&self) -> &[i64] {
        &self.ticks
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    pub fn first(&self) -> Option<i64> {
        self.ticks.first().copied()
    }

    pub fn last(&self) -> Option<i64> {
        self.ticks.last().copied()
    }

    /// `max - min` over all distinct timestamps; 0 when empty.
    pub fn span(&self) -> i64 {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => last.saturating_sub(first),
            _ => 0,
        }
    }

    /// Next distinct timestamp strictly after `t`, or `None` at (or past) the end.
    pub fn next_after(&self, t: i64) -> Option<i64> {
        let idx = self.ticks.partition_point(|&tick| tick <= t);
        self.ticks.get(idx).copied()
    }

    pub fn degeneracy(&self) -> Option<Degenerate> {
        if self.ticks.len() < 2 {
            Some(Degenerate::TooFewTimestamps)
        } else if self.span() <= 0 {
            Some(Degenerate::ZeroSpan)
        } else {
            None
        }
    }
}

/// Samples partitioned by entity, each group sorted by timestamp (stable, so
/// equal timestamps keep input order), plus the run's global clock.
#[derive(Debug, Clone)]
pub struct Timeline<K, V> {
    groups: BTreeMap<K, Vec<Sample<K, V>>>,
    clock: GlobalClock,
}

impl<K: Ord + Clone, V> Timeline<K, V> {
    pub fn build(samples: impl IntoIterator<Item = Sample<K, V>>) -> Self {
        let samples: Vec<Sample<K, V>> = samples.into_iter().collect();
        let clock = GlobalClock::from_timestamps(samples.iter().map(|s| s.timestamp));
        let mut groups = group_by_key(samples, |s| s.key.clone());
        for group in groups.values_mut() {
            group.sort_by_key(|s| s.timestamp);
        }
        Self { groups, clock }
    }
}

impl<K, V> Timeline<K, V> {
    pub fn clock(&self) -> &GlobalClock {
        &self.clock
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups in key order.
    pub fn groups(&self) -> impl Iterator<Item = (&K, &[Sample<K, V>])> {
        self.groups.iter().map(|(k, g)| (k, g.as_slice()))
    }

    pub fn group(&self, key: &K) -> Option<&[Sample<K, V>]>
    where
        K: Ord,
    {
        self.groups.get(key).map(Vec::as_slice)
    }
}
