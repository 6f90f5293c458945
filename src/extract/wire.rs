// Wire shapes of the agent's JSON lines and their conversion to typed records.

use serde::Deserialize;

use super::{Decoded, JsonLineRecord, LineError};
use crate::aggregation::IpPair;
use crate::models::{CpuLoadRecord, EventRecord, NetworkPacket, ProcCpuRecord, ProcMemRecord};

/// A numeric field as agents emit it: integer, float, or decimal string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Numeric {
    Int(i64),
    Float(f64),
    Text(String),
}

fn int_field(field: &'static str, value: Option<Numeric>) -> Result<i64, LineError> {
    match value.ok_or(LineError::Missing(field))? {
        Numeric::Int(n) => Ok(n),
        Numeric::Float(x) if x.is_finite() => Ok(x.trunc() as i64),
        Numeric::Float(x) => Err(LineError::NotNumeric {
            field,
            value: x.to_string(),
        }),
        Numeric::Text(s) => s.trim().parse().map_err(|_| LineError::NotNumeric { field, value: s }),
    }
}

fn unsigned_field(field: &'static str, value: Option<Numeric>) -> Result<u64, LineError> {
    let n = int_field(field, value)?;
    u64::try_from(n).map_err(|_| LineError::NotNumeric {
        field,
        value: n.to_string(),
    })
}

fn float_field(field: &'static str, value: Option<Numeric>) -> Result<f64, LineError> {
    let x = match value.ok_or(LineError::Missing(field))? {
        Numeric::Int(n) => n as f64,
        Numeric::Float(x) => x,
        Numeric::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| LineError::NotNumeric { field, value: s })?,
    };
    if x.is_finite() {
        Ok(x)
    } else {
        Err(LineError::NotNumeric {
            field,
            value: x.to_string(),
        })
    }
}

/// Identifier fields must be present and non-empty.
fn id_field(field: &'static str, value: Option<String>) -> Result<String, LineError> {
    value
        .filter(|s| !s.is_empty())
        .ok_or(LineError::Missing(field))
}

#[derive(Debug, Deserialize)]
struct PacketBatchLine {
    #[serde(rename = "Packets")]
    packets: Option<Vec<PacketLine>>,
}

#[derive(Debug, Deserialize)]
struct PacketLine {
    #[serde(rename = "TimeStamp")]
    timestamp: Option<Numeric>,
    #[serde(rename = "Length")]
    length: Option<Numeric>,
    #[serde(rename = "IP")]
    ip: Option<IpLine>,
}

#[derive(Debug, Deserialize)]
struct IpLine {
    #[serde(rename = "SRCIP")]
    src: Option<String>,
    #[serde(rename = "DSTIP")]
    dst: Option<String>,
}

impl JsonLineRecord for NetworkPacket {
    /// A packet lacking a timestamp, length, or either address is dropped; a
    /// packet with a non-numeric timestamp or length rejects the whole line.
    fn decode_line(line: &str) -> Result<Decoded<Self>, LineError> {
        let batch: PacketBatchLine = serde_json::from_str(line)?;
        let packets = batch
            .packets
            .filter(|p| !p.is_empty())
            .ok_or(LineError::Missing("Packets"))?;

        let mut decoded = Decoded {
            records: Vec::with_capacity(packets.len()),
            dropped: 0,
        };
        for packet in packets {
            let addrs = packet.ip.and_then(|ip| match (ip.src, ip.dst) {
                (Some(src), Some(dst)) if !src.is_empty() && !dst.is_empty() => Some((src, dst)),
                _ => None,
            });
            let (Some(ts), Some(len), Some((src, dst))) = (packet.timestamp, packet.length, addrs)
            else {
                decoded.dropped += 1;
                continue;
            };
            decoded.records.push(NetworkPacket {
                timestamp: int_field("TimeStamp", Some(ts))?,
                length: unsigned_field("Length", Some(len))?,
                pair: IpPair::new(src, dst),
            });
        }
        Ok(decoded)
    }
}

#[derive(Debug, Deserialize)]
struct CpuLoadLine {
    #[serde(rename = "DevID")]
    dev_id: Option<String>,
    #[serde(rename = "Load")]
    load: Option<Vec<serde_json::Value>>,
    #[serde(rename = "TimeStamp")]
    timestamp: Option<Numeric>,
}

impl JsonLineRecord for CpuLoadRecord {
    fn decode_line(line: &str) -> Result<Decoded<Self>, LineError> {
        let raw: CpuLoadLine = serde_json::from_str(line)?;
        let dev_id = id_field("DevID", raw.dev_id)?;
        let timestamp = int_field("TimeStamp", raw.timestamp)?;
        let first = raw
            .load
            .and_then(|l| l.into_iter().next())
            .ok_or(LineError::Missing("Load"))?;
        let load = first
            .as_f64()
            .ok_or_else(|| LineError::NotNumeric {
                field: "Load",
                value: first.to_string(),
            })?;
        Ok(Decoded::one(CpuLoadRecord {
            dev_id,
            timestamp,
            load,
        }))
    }
}

#[derive(Debug, Deserialize)]
struct ProcCpuLine {
    #[serde(rename = "TimeStamp")]
    timestamp: Option<Numeric>,
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "Cpu")]
    cpu: Option<Numeric>,
}

impl JsonLineRecord for ProcCpuRecord {
    fn decode_line(line: &str) -> Result<Decoded<Self>, LineError> {
        let raw: ProcCpuLine = serde_json::from_str(line)?;
        Ok(Decoded::one(ProcCpuRecord {
            name: id_field("Name", raw.name)?,
            timestamp: int_field("TimeStamp", raw.timestamp)?,
            cpu_percent: float_field("Cpu", raw.cpu)?,
        }))
    }
}

#[derive(Debug, Deserialize)]
struct ProcMemLine {
    #[serde(rename = "TimeStamp")]
    timestamp: Option<Numeric>,
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "VmSize")]
    vm_size: Option<Numeric>,
    #[serde(rename = "VmPeak")]
    vm_peak: Option<Numeric>,
    #[serde(rename = "VmHWM")]
    vm_hwm: Option<Numeric>,
}

impl JsonLineRecord for ProcMemRecord {
    fn decode_line(line: &str) -> Result<Decoded<Self>, LineError> {
        let raw: ProcMemLine = serde_json::from_str(line)?;
        // Presence is checked for every field before any value is converted.
        let name = id_field("Name", raw.name)?;
        let (Some(ts), Some(size), Some(peak), Some(hwm)) =
            (raw.timestamp, raw.vm_size, raw.vm_peak, raw.vm_hwm)
        else {
            return Err(LineError::Missing("TimeStamp/VmSize/VmPeak/VmHWM"));
        };
        Ok(Decoded::one(ProcMemRecord {
            name,
            timestamp: int_field("TimeStamp", Some(ts))?,
            vm_size: unsigned_field("VmSize", Some(size))?,
            vm_peak: unsigned_field("VmPeak", Some(peak))?,
            vm_hwm: unsigned_field("VmHWM", Some(hwm))?,
        }))
    }
}

#[derive(Debug, Deserialize)]
struct EventLine {
    #[serde(rename = "DevID")]
    dev_id: Option<String>,
    #[serde(rename = "TimeStamp")]
    timestamp: Option<Numeric>,
}

impl JsonLineRecord for EventRecord {
    fn decode_line(line: &str) -> Result<Decoded<Self>, LineError> {
        let raw: EventLine = serde_json::from_str(line)?;
        Ok(Decoded::one(EventRecord {
            dev_id: id_field("DevID", raw.dev_id)?,
            timestamp: int_field("TimeStamp", raw.timestamp)?,
        }))
    }
}
