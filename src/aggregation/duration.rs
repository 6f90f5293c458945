// Duration assigner: how long each sample's value stayed in effect.

use super::timeline::{GlobalClock, Sample};

/// Where a sample's validity ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationPolicy {
    /// Until the next sample of the same entity; the entity's last sample
    /// gets 0.
    NextSample,
    /// Until the next distinct timestamp of any entity; samples at the run's
    /// last timestamp get 0.
    NextGlobalTimestamp,
}

/// A sample and the seconds its value was in effect (always >= 0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Annotated<'a, K, V> {
    pub sample: &'a Sample<K, V>,
    pub duration: i64,
}

/// Durations for a group already sorted by timestamp (see `Timeline`).
/// Equal or out-of-order neighbours yield 0, never a negative duration;
/// gaps wider than `i64::MAX` saturate.
pub fn assign_durations<K, V>(
    group: &[Sample<K, V>],
    policy: DurationPolicy,
    clock: &GlobalClock,
) -> Vec<i64> {
    match policy {
        DurationPolicy::NextSample => {
            let mut durations: Vec<i64> = group
                .windows(2)
                .map(|pair| pair[1].timestamp.saturating_sub(pair[0].timestamp).max(0))
                .collect();
            if !group.is_empty() {
                durations.push(0);
            }
            durations
        }
        DurationPolicy::NextGlobalTimestamp => group
            .iter()
            .map(|s| {
                clock
                    .next_after(s.timestamp)
                    .map_or(0, |next| next.saturating_sub(s.timestamp).max(0))
            })
            .collect(),
    }
}

pub fn annotate<'a, K, V>(
    group: &'a [Sample<K, V>],
    policy: DurationPolicy,
    clock: &GlobalClock,
) -> Vec<Annotated<'a, K, V>> {
    group
        .iter()
        .zip(assign_durations(group, policy, clock))
        .map(|(sample, duration)| Annotated { sample, duration })
        .collect()
}
