//! Domain layer between `unizone-api` and the `unizone` binary.
//!
//! - **[`Zone`]** / **[`ZoneRecord`]**: the JSON zone file, keyed by
//!   record name. [`read_zone`] loads one from disk; [`Zone::to_json`]
//!   emits it back in the same shape.
//!
//! - **[`DeviceDirectory`]**: device name → IP, projected from the
//!   controller's known-client list by [`fetch_directory`].
//!
//! - **[`reconcile`]**: the pure A-record correction pass. Takes the
//!   directory and a zone, returns the corrected zone. No I/O.
//!
//! - **[`sync::run`]**: the whole sequential pipeline: fetch, read,
//!   reconcile.

pub mod config;
pub mod controller;
pub mod directory;
pub mod error;
pub mod reconcile;
pub mod sync;
pub mod zone;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ControllerConfig, SyncConfig, TlsVerification};
pub use controller::fetch_directory;
pub use directory::DeviceDirectory;
pub use error::CoreError;
pub use reconcile::{ADDRESS_RECORD, Reconciliation, RecordChange, reconcile, reconcile_with_report};
pub use zone::{Zone, ZoneRecord, read_zone};

pub use unizone_api::ControllerPlatform;
