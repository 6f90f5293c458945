// Aggregation engine: grouping, timelines, durations, time-weighted means and
// windowed peaks. Pure and synchronous; report modules configure it.

pub mod duration;
pub mod grouping;
pub mod timeline;
pub mod weighted;
pub mod window;

pub use duration::{Annotated, DurationPolicy, annotate, assign_durations};
pub use grouping::{IpPair, group_by_key};
pub use timeline::{Degenerate, GlobalClock, Sample, Timeline};
pub use weighted::{WeightedStats, max_of, time_weighted};
pub use window::{CountStats, RateStats, Window, count_stats, rate_stats, window_sums};
