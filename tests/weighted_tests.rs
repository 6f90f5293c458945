// Time-weighted aggregation tests: averages, unavailable results, boundedness

mod common;

use common::sample;
use telemetry_digest::aggregation::{
    DurationPolicy, GlobalClock, Sample, Timeline, annotate, max_of, time_weighted,
};
use telemetry_digest::models::CpuLoadRecord;
use telemetry_digest::reports::cpu_load;

fn stats_for(
    group: &[Sample<String, f64>],
    policy: DurationPolicy,
) -> Option<telemetry_digest::aggregation::WeightedStats> {
    let clock = GlobalClock::from_timestamps(group.iter().map(|s| s.timestamp));
    let annotated = annotate(group, policy, &clock);
    time_weighted(&annotated, |v| *v)
}

#[test]
fn three_readings_weight_by_time_until_next() {
    let group = vec![sample("d", 0, 10.0), sample("d", 10, 20.0), sample("d", 20, 30.0)];
    let stats = stats_for(&group, DurationPolicy::NextSample).unwrap();
    assert_eq!(stats.average, Some(15.0));
    assert_eq!(stats.total_duration, 20);
    assert_eq!(stats.weighted_sum, 300.0);
    assert_eq!(stats.max, 30.0);
    assert_eq!(stats.min, 10.0);
    assert_eq!(stats.samples, 3);
}

#[test]
fn single_reading_average_unavailable() {
    let group = vec![sample("d", 42, 73.5)];
    let stats = stats_for(&group, DurationPolicy::NextSample).unwrap();
    assert_eq!(stats.average, None);
    assert_eq!(stats.max, 73.5);
    assert_eq!(stats.samples, 1);
    assert_eq!(stats.total_duration, 0);
}

#[test]
fn measured_zero_is_not_unavailable() {
    let group = vec![sample("d", 0, 0.0), sample("d", 5, 0.0)];
    let stats = stats_for(&group, DurationPolicy::NextSample).unwrap();
    assert_eq!(stats.average, Some(0.0));
}

#[test]
fn empty_group_has_no_stats() {
    let group: Vec<Sample<String, f64>> = Vec::new();
    assert!(stats_for(&group, DurationPolicy::NextSample).is_none());
}

#[test]
fn uneven_sampling_is_not_biased_toward_dense_periods() {
    // 90 s at 10%, then a burst of three 1 s readings at 100%.
    let group = vec![
        sample("d", 0, 10.0),
        sample("d", 90, 100.0),
        sample("d", 91, 100.0),
        sample("d", 92, 100.0),
        sample("d", 93, 100.0),
    ];
    let stats = stats_for(&group, DurationPolicy::NextSample).unwrap();
    let expected = (10.0 * 90.0 + 100.0 * 3.0) / 93.0;
    common::assert_close(stats.average.unwrap(), expected);
}

#[test]
fn weighted_average_stays_within_observed_range() {
    let groups = vec![
        vec![sample("a", 0, 0.1), sample("a", 3, 0.7), sample("a", 11, 0.3)],
        vec![sample("b", 5, 99.9), sample("b", 6, 99.9), sample("b", 9, 99.9)],
        vec![
            sample("c", -10, 3.0),
            sample("c", 0, -2.5),
            sample("c", 0, 8.0),
            sample("c", 7, 1.25),
        ],
    ];
    for group in &groups {
        for policy in [DurationPolicy::NextSample, DurationPolicy::NextGlobalTimestamp] {
            let stats = stats_for(group, policy).unwrap();
            if let Some(avg) = stats.average {
                assert!(stats.min <= avg && avg <= stats.max, "{avg} outside range");
            }
        }
    }
}

#[test]
fn one_shared_timestamp_leaves_every_average_unavailable() {
    let timeline = Timeline::build(vec![
        sample("a", 100, 5.0),
        sample("b", 100, 7.0),
    ]);
    for (_, group) in timeline.groups() {
        let annotated = annotate(group, DurationPolicy::NextGlobalTimestamp, timeline.clock());
        let stats = time_weighted(&annotated, |v| *v).unwrap();
        assert_eq!(stats.average, None);
    }
}

#[test]
fn max_of_reads_secondary_field() {
    let group = vec![
        Sample::new("p".to_string(), 0, (1.0, 9.0)),
        Sample::new("p".to_string(), 5, (2.0, 4.0)),
    ];
    let clock = GlobalClock::from_timestamps([0, 5]);
    let annotated = annotate(&group, DurationPolicy::NextSample, &clock);
    assert_eq!(max_of(&annotated, |(_, peak)| *peak), Some(9.0));
}

#[test]
fn rerunning_aggregation_is_bit_identical() {
    let records: Vec<CpuLoadRecord> = (0..50)
        .map(|i| CpuLoadRecord {
            dev_id: format!("dev-{}", i % 4),
            timestamp: (i * 7 % 31) as i64,
            load: (i as f64) * 1.37 % 11.0,
        })
        .collect();
    let first = cpu_load::summarize(&records);
    let second = cpu_load::summarize(&records);
    assert_eq!(first, second);
    for (a, b) in first.rows.iter().zip(&second.rows) {
        assert_eq!(
            a.avg_cpu_usage.map(f64::to_bits),
            b.avg_cpu_usage.map(f64::to_bits)
        );
    }
}
