// Domain models: typed telemetry records and the summary table

mod records;
mod table;

pub use records::{CpuLoadRecord, EventRecord, NetworkPacket, ProcCpuRecord, ProcMemRecord};
pub use table::{Cell, SummaryRow, Table};
