// Typed telemetry records, one per recognized line shape (after extraction).

use crate::aggregation::IpPair;

/// One captured packet from a `Packets` batch, already keyed by its
/// canonical address pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkPacket {
    pub timestamp: i64,
    pub length: u64,
    pub pair: IpPair,
}

/// Device-wide CPU load (first element of `Load`).
#[derive(Debug, Clone, PartialEq)]
pub struct CpuLoadRecord {
    pub dev_id: String,
    pub timestamp: i64,
    pub load: f64,
}

/// Per-program CPU percentage.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcCpuRecord {
    pub name: String,
    pub timestamp: i64,
    pub cpu_percent: f64,
}

/// Per-program memory figures, in bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcMemRecord {
    pub name: String,
    pub timestamp: i64,
    pub vm_size: u64,
    pub vm_peak: u64,
    pub vm_hwm: u64,
}

/// A creation or change event attributed to a device (new process, file change).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub dev_id: String,
    pub timestamp: i64,
}
