// ── Zone file model ──
//
// A zone is a JSON object keyed by record name:
//
//   { "host1": { "name": "host1", "type": "A", "ttl": 300, "values": ["10.0.0.1"] } }
//
// Backed by a BTreeMap so emission order is stable across runs.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;
use std::path::Path;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CoreError;

/// One DNS resource record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    /// Seconds. Never validated or interpreted.
    pub ttl: i64,
    pub values: Vec<String>,
}

impl ZoneRecord {
    pub fn new(
        name: impl Into<String>,
        record_type: impl Into<String>,
        ttl: i64,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            record_type: record_type.into(),
            ttl,
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Record name → record. At most one record per name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Zone(BTreeMap<String, ZoneRecord>);

impl Zone {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a zone from JSON text. Duplicate record names are an error.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize back to the input shape, compact or indented.
    pub fn to_json(&self, pretty: bool) -> Result<String, CoreError> {
        let rendered = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        rendered.map_err(|e| CoreError::Emit {
            message: e.to_string(),
        })
    }

    pub fn get(&self, name: &str) -> Option<&ZoneRecord> {
        self.0.get(name)
    }

    /// Insert a record under `name`, returning any record it replaced.
    pub fn insert(&mut self, name: impl Into<String>, record: ZoneRecord) -> Option<ZoneRecord> {
        self.0.insert(name.into(), record)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, ZoneRecord> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl FromIterator<(String, ZoneRecord)> for Zone {
    fn from_iter<I: IntoIterator<Item = (String, ZoneRecord)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Keys each record by its own `name`.
impl FromIterator<ZoneRecord> for Zone {
    fn from_iter<I: IntoIterator<Item = ZoneRecord>>(iter: I) -> Self {
        iter.into_iter().map(|r| (r.name.clone(), r)).collect()
    }
}

impl<'a> IntoIterator for &'a Zone {
    type Item = (&'a String, &'a ZoneRecord);
    type IntoIter = btree_map::Iter<'a, String, ZoneRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'de> Deserialize<'de> for Zone {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ZoneVisitor;

        impl<'de> Visitor<'de> for ZoneVisitor {
            type Value = Zone;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object of zone records keyed by name")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Zone, A::Error> {
                let mut records = BTreeMap::new();
                while let Some((name, record)) = map.next_entry::<String, ZoneRecord>()? {
                    if records.contains_key(&name) {
                        return Err(de::Error::custom(format_args!(
                            "duplicate record name `{name}`"
                        )));
                    }
                    records.insert(name, record);
                }
                Ok(Zone(records))
            }
        }

        deserializer.deserialize_map(ZoneVisitor)
    }
}

/// Read and parse the zone file at `path`.
pub fn read_zone(path: &Path) -> Result<Zone, CoreError> {
    debug!(path = %path.display(), "reading zone");

    let text = std::fs::read_to_string(path).map_err(|e| CoreError::ZoneReadFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let zone = Zone::from_json_str(&text).map_err(|e| CoreError::ZoneReadFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    for (key, record) in &zone {
        if *key != record.name {
            warn!(key = %key, name = %record.name, "zone key differs from record name; matching on key");
        }
    }

    debug!(records = zone.len(), "zone loaded");
    Ok(zone)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    const SAMPLE: &str = r#"{
        "host1": {"name":"host1","type":"A","ttl":300,"values":["192.168.1.99"]},
        "host2": {"name":"host2","type":"CNAME","ttl":300,"values":["host1"]}
    }"#;

    #[test]
    fn parses_records() {
        let zone = Zone::from_json_str(SAMPLE).expect("valid zone");
        assert_eq!(zone.len(), 2);
        assert_eq!(
            zone.get("host1"),
            Some(&ZoneRecord::new("host1", "A", 300, ["192.168.1.99"]))
        );
        assert_eq!(zone.get("host2").map(|r| r.record_type.as_str()), Some("CNAME"));
    }

    #[test]
    fn emits_input_shape() {
        let zone = Zone::from_json_str(SAMPLE).expect("valid zone");
        let json = zone.to_json(false).expect("serializes");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(
            value,
            serde_json::json!({
                "host1": {"name":"host1","type":"A","ttl":300,"values":["192.168.1.99"]},
                "host2": {"name":"host2","type":"CNAME","ttl":300,"values":["host1"]}
            })
        );
        assert!(!json.contains('\n'));
        assert!(zone.to_json(true).expect("serializes").contains('\n'));
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = Zone::from_json_str(
            r#"{"a":{"name":"a","type":"A","ttl":1,"values":[]},
                "a":{"name":"a","type":"A","ttl":2,"values":[]}}"#,
        )
        .expect_err("duplicate must fail");
        assert!(err.to_string().contains("duplicate record name `a`"), "{err}");
    }

    #[test]
    fn rejects_wrong_shape() {
        assert!(Zone::from_json_str("[]").is_err());
        assert!(Zone::from_json_str(r#"{"a":{"name":"a","type":"A","ttl":"300","values":[]}}"#).is_err());
        assert!(Zone::from_json_str(r#"{"a":{"name":"a","type":"A","values":[]}}"#).is_err());
    }

    #[test]
    fn empty_object_is_an_empty_zone() {
        assert!(Zone::from_json_str("{}").expect("valid").is_empty());
    }

    #[test]
    fn read_zone_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(SAMPLE.as_bytes()).expect("write");
        let zone = read_zone(file.path()).expect("readable zone");
        assert_eq!(zone.names().collect::<Vec<_>>(), ["host1", "host2"]);
    }

    #[test]
    fn read_zone_missing_file() {
        let err = read_zone(Path::new("/nonexistent/zone.json")).expect_err("missing");
        assert!(matches!(err, CoreError::ZoneReadFailed { .. }));
    }

    #[test]
    fn read_zone_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"{ not json").expect("write");
        let err = read_zone(file.path()).expect_err("malformed");
        match err {
            CoreError::ZoneReadFailed { path, .. } => assert_eq!(path, file.path()),
            other => panic!("expected ZoneReadFailed, got {other:?}"),
        }
    }
}
