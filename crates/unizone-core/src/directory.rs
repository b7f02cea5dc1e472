// ── Device directory ──
//
// Device name → IP, rebuilt from the controller on every run.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::Serialize;
use tracing::debug;

use unizone_api::KnownClient;

/// Name → IP mapping. Never holds an empty name or an empty IP.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DeviceDirectory(BTreeMap<String, String>);

impl DeviceDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Project controller clients into a directory.
    ///
    /// Each client contributes its [preferred IP](KnownClient::preferred_ip)
    /// under its configured name. Clients without a name or an address are
    /// skipped. If names collide, the client listed last wins.
    pub fn from_clients<'a>(clients: impl IntoIterator<Item = &'a KnownClient>) -> Self {
        let mut directory = Self::new();
        for client in clients {
            let (Some(name), Some(ip)) = (client.display_name(), client.preferred_ip()) else {
                debug!(mac = %client.mac, "skipping client without name or address");
                continue;
            };
            if let Some(previous) = directory.0.insert(name.to_owned(), ip.to_owned()) {
                debug!(name, previous = %previous, ip, "duplicate client name; later entry wins");
            }
        }
        directory
    }

    /// Add an entry. Returns `false` (and stores nothing) if either side is empty.
    pub fn insert(&mut self, name: impl Into<String>, ip: impl Into<String>) -> bool {
        let (name, ip) = (name.into(), ip.into());
        if name.is_empty() || ip.is_empty() {
            return false;
        }
        self.0.insert(name, ip);
        true
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a DeviceDirectory {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Collects `(name, ip)` pairs, dropping any with an empty side.
impl<N: Into<String>, I: Into<String>> FromIterator<(N, I)> for DeviceDirectory {
    fn from_iter<T: IntoIterator<Item = (N, I)>>(iter: T) -> Self {
        let mut directory = Self::new();
        for (name, ip) in iter {
            directory.insert(name, ip);
        }
        directory
    }
}
