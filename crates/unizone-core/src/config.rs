// ── Runtime configuration ──
//
// These types describe *how* to reach the controller and where the zone
// lives. They never touch disk; `unizone-config` builds them from the
// config file, environment, and flags.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use unizone_api::{ControllerPlatform, TlsMode};

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed certs).
    DangerAcceptInvalid,
}

impl TlsVerification {
    pub(crate) fn to_tls_mode(&self) -> TlsMode {
        match self {
            Self::SystemDefaults => TlsMode::System,
            Self::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            Self::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        }
    }
}

/// Connection settings for one controller site.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Controller URL (e.g., `https://192.168.1.1`).
    pub url: Url,
    /// Site whose clients form the directory.
    pub site: String,
    pub username: String,
    pub password: SecretString,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// `None` probes the controller to find out.
    pub platform: Option<ControllerPlatform>,
}

/// Everything one `sync` run needs.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub controller: ControllerConfig,
    pub zone_file: PathBuf,
}
