// ── Core error types ──
//
// One variant per pipeline step that can fail. Transport details are
// flattened into `message` so consumers never match on HTTP errors.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate. Every variant is fatal for a run.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Controller rejected the login, or could not be reached to try.
    #[error("Authentication with controller at {url} failed: {message}")]
    AuthenticationFailed { url: String, message: String },

    /// Logged in, but the client listing failed.
    #[error("Listing clients for site '{site}' failed: {message}")]
    DirectoryFetchFailed { site: String, message: String },

    /// Zone file missing, unreadable, or not the expected shape.
    #[error("Cannot read zone file {}: {reason}", path.display())]
    ZoneReadFailed { path: PathBuf, reason: String },

    /// Emitting the reconciled zone failed.
    #[error("Cannot emit zone: {message}")]
    Emit { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}
