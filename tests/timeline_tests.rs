// Timeline tests: stable per-entity ordering and the global clock

mod common;

use common::sample;
use telemetry_digest::aggregation::{Degenerate, GlobalClock, Timeline};

#[test]
fn build_sorts_each_group_stably() {
    let timeline = Timeline::build(vec![
        sample("a", 10, 1.0),
        sample("a", 5, 2.0),
        sample("b", 7, 9.0),
        sample("a", 10, 3.0),
    ]);

    let a = timeline.group(&"a".to_string()).unwrap();
    let order: Vec<(i64, f64)> = a.iter().map(|s| (s.timestamp, s.value)).collect();
    assert_eq!(order, vec![(5, 2.0), (10, 1.0), (10, 3.0)]);
    assert_eq!(timeline.len(), 2);
}

#[test]
fn groups_iterate_in_key_order() {
    let timeline = Timeline::build(vec![
        sample("zeta", 1, 0.0),
        sample("alpha", 2, 0.0),
        sample("mid", 3, 0.0),
    ]);
    let keys: Vec<&str> = timeline.groups().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
}

#[test]
fn empty_input_has_no_groups() {
    let timeline = Timeline::<String, f64>::build(Vec::new());
    assert!(timeline.is_empty());
    assert!(timeline.clock().is_empty());
}

#[test]
fn clock_deduplicates_across_entities() {
    let timeline = Timeline::build(vec![
        sample("a", 5, 0.0),
        sample("b", 10, 0.0),
        sample("a", 10, 0.0),
        sample("c", 3, 0.0),
    ]);
    let clock = timeline.clock();
    assert_eq!(clock.ticks(), &[3, 5, 10]);
    assert_eq!(clock.span(), 7);
    assert_eq!(clock.first(), Some(3));
    assert_eq!(clock.last(), Some(10));
}

#[test]
fn next_after_returns_next_distinct_tick() {
    let clock = GlobalClock::from_timestamps([0, 10, 10, 25]);
    assert_eq!(clock.next_after(-100), Some(0));
    assert_eq!(clock.next_after(0), Some(10));
    assert_eq!(clock.next_after(4), Some(10));
    assert_eq!(clock.next_after(10), Some(25));
    assert_eq!(clock.next_after(25), None);
    assert_eq!(clock.next_after(99), None);
}

#[test]
fn degeneracy_needs_two_distinct_timestamps() {
    assert_eq!(
        GlobalClock::default().degeneracy(),
        Some(Degenerate::TooFewTimestamps)
    );
    assert_eq!(
        GlobalClock::from_timestamps([7, 7, 7]).degeneracy(),
        Some(Degenerate::TooFewTimestamps)
    );
    assert_eq!(GlobalClock::from_timestamps([7, 8]).degeneracy(), None);
}
