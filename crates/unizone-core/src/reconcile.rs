// ── A-record reconciliation ──
//
// Pure: no I/O, no logging. The directory is authoritative for every A
// record whose name it knows.

use crate::directory::DeviceDirectory;
use crate::zone::{Zone, ZoneRecord};

/// The only record type that is ever rewritten.
pub const ADDRESS_RECORD: &str = "A";

/// A record whose values were replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordChange {
    pub name: String,
    pub previous: Vec<String>,
    pub current: Vec<String>,
}

/// Output of [`reconcile_with_report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub zone: Zone,
    /// One entry per rewritten record, ordered by name.
    pub changes: Vec<RecordChange>,
}

/// Correct the zone's A records against the directory.
///
/// For each A record whose name is in the directory, if **any** value
/// differs from the directory IP, the whole value list becomes that single
/// IP. Records already matching, records of other types, and names the
/// directory doesn't know are returned untouched. An A record with no
/// values never mismatches and stays empty.
pub fn reconcile(directory: &DeviceDirectory, zone: &Zone) -> Zone {
    reconcile_with_report(directory, zone).zone
}

/// [`reconcile`], also reporting which records changed.
pub fn reconcile_with_report(directory: &DeviceDirectory, zone: &Zone) -> Reconciliation {
    let mut changes = Vec::new();

    let zone: Zone = zone
        .iter()
        .map(|(name, record)| {
            let Some(ip) = mismatched_ip(directory, name, record) else {
                return (name.clone(), record.clone());
            };
            let current = vec![ip.to_owned()];
            changes.push(RecordChange {
                name: name.clone(),
                previous: record.values.clone(),
                current: current.clone(),
            });
            let record = ZoneRecord {
                values: current,
                ..record.clone()
            };
            (name.clone(), record)
        })
        .collect();

    Reconciliation { zone, changes }
}

/// The directory IP, if this record is an A record that disagrees with it.
fn mismatched_ip<'d>(
    directory: &'d DeviceDirectory,
    name: &str,
    record: &ZoneRecord,
) -> Option<&'d str> {
    if record.record_type != ADDRESS_RECORD {
        return None;
    }
    let ip = directory.get(name)?;
    record.values.iter().any(|v| v != ip).then_some(ip)
}
