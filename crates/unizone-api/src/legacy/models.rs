// Legacy API response types
//
// All responses are wrapped in the `LegacyResponse<T>` envelope. Fields use
// `#[serde(default)]` liberally because the API is inconsistent about field
// presence across firmware versions.

use serde::Deserialize;

// ── Response Envelope ────────────────────────────────────────────────

/// Standard UniFi legacy API response envelope.
///
/// ```json
/// { "meta": { "rc": "ok", "msg": "optional" }, "data": [...] }
/// ```
#[derive(Debug, Deserialize)]
pub struct LegacyResponse<T> {
    pub meta: Meta,
    pub data: Vec<T>,
}

/// Metadata from the legacy envelope. `rc` == `"ok"` means success.
#[derive(Debug, Deserialize)]
pub struct Meta {
    pub rc: String,
    #[serde(default)]
    pub msg: Option<String>,
}

// ── Known client ─────────────────────────────────────────────────────

/// Client record from `rest/user`.
///
/// `ip` is the last leased address; `fixed_ip` is the DHCP reservation,
/// which only applies while `use_fixedip` is set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KnownClient {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub mac: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub use_fixedip: bool,
    #[serde(default)]
    pub fixed_ip: Option<String>,
    #[serde(default)]
    pub network_id: Option<String>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl KnownClient {
    /// The address this client should resolve to.
    ///
    /// A non-empty fixed IP wins while the reservation is enabled;
    /// otherwise the leased address. Empty strings count as absent.
    pub fn preferred_ip(&self) -> Option<&str> {
        let fixed = self
            .fixed_ip
            .as_deref()
            .filter(|ip| self.use_fixedip && !ip.is_empty());
        fixed.or_else(|| self.ip.as_deref().filter(|ip| !ip.is_empty()))
    }

    /// The configured name, if it is non-empty.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}
