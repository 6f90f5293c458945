// Per-pair traffic: totals plus average and peak rates over 1-second windows.

use crate::aggregation::{IpPair, Window, group_by_key, rate_stats};
use crate::models::{Cell, NetworkPacket, SummaryRow};

use super::{Summary, sort_descending};

const BITS_PER_MEGABIT: f64 = 1_000_000.0;

fn bytes_per_sec_to_mbps(bytes: f64) -> f64 {
    bytes * 8.0 / BITS_PER_MEGABIT
}

#[derive(Debug, Clone, PartialEq)]
pub struct PairSummary {
    pub pair: IpPair,
    pub total_packets: usize,
    pub total_bytes: u64,
    /// Seconds in which the pair exchanged at least one packet.
    pub active_seconds: usize,
    /// Total bytes over active seconds, in Mbps.
    pub avg_rate_mbps: Option<f64>,
    /// Busiest single second, in Mbps.
    pub peak_rate_mbps: f64,
}

impl SummaryRow for PairSummary {
    const HEADER: &'static [&'static str] = &[
        "IP_A",
        "IP_B",
        "TotalPackets",
        "TotalBytes",
        "TotalActiveSeconds",
        "AvgRateMbps",
        "PeakRateMbps",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.pair.a().into(),
            self.pair.b().into(),
            self.total_packets.into(),
            self.total_bytes.into(),
            self.active_seconds.into(),
            self.avg_rate_mbps.into(),
            self.peak_rate_mbps.into(),
        ]
    }
}

/// One row per canonical pair, largest `TotalBytes` first.
pub fn summarize(packets: &[NetworkPacket]) -> Summary<PairSummary> {
    let groups = group_by_key(packets, |p| p.pair.clone());
    let mut rows: Vec<PairSummary> = groups
        .into_iter()
        .map(|(pair, group)| {
            let rate = rate_stats(
                group.iter().map(|p| (p.timestamp, p.length)),
                Window::SECOND,
            );
            PairSummary {
                pair,
                total_packets: group.len(),
                total_bytes: rate.total,
                active_seconds: rate.active_windows,
                avg_rate_mbps: rate.average.map(bytes_per_sec_to_mbps),
                peak_rate_mbps: bytes_per_sec_to_mbps(rate.peak as f64),
            }
        })
        .collect();
    sort_descending(&mut rows, |r| Some(r.total_bytes as f64));
    Summary {
        rows,
        degenerate: None,
    }
}
