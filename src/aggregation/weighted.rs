// Time-weighted aggregation: Σ(value·duration) / Σ(duration) per group.

use super::duration::Annotated;

/// Reduction of one entity's duration-annotated samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedStats {
    pub samples: usize,
    pub min: f64,
    pub max: f64,
    /// Seconds covered by the samples (sum of durations).
    pub total_duration: i64,
    /// Σ(value·duration), in value-seconds.
    pub weighted_sum: f64,
    /// `None` when `total_duration` is 0: no time was covered, which is not
    /// the same as a measured zero.
    pub average: Option<f64>,
}

/// Returns `None` for an empty group.
pub fn time_weighted<K, V>(
    annotated: &[Annotated<'_, K, V>],
    value: impl Fn(&V) -> f64,
) -> Option<WeightedStats> {
    if annotated.is_empty() {
        return None;
    }

    let values: Vec<f64> = annotated.iter().map(|a| value(&a.sample.value)).collect();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let total_duration = annotated
        .iter()
        .fold(0i64, |acc, a| acc.saturating_add(a.duration));
    let weighted_sum: f64 = values
        .iter()
        .zip(annotated)
        .map(|(v, a)| v * a.duration as f64)
        .sum();

    // Float rounding can push the quotient a hair outside the observed range.
    let average = (total_duration > 0)
        .then(|| (weighted_sum / total_duration as f64).clamp(min, max));

    Some(WeightedStats {
        samples: annotated.len(),
        min,
        max,
        total_duration,
        weighted_sum,
        average,
    })
}

/// Largest value of a secondary field; `None` for an empty group.
pub fn max_of<K, V>(annotated: &[Annotated<'_, K, V>], value: impl Fn(&V) -> f64) -> Option<f64> {
    annotated
        .iter()
        .map(|a| value(&a.sample.value))
        .reduce(f64::max)
}
