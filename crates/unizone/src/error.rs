//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a distinct exit code per failing step.

use miette::Diagnostic;
use thiserror::Error;

use unizone_config::ConfigError;
use unizone_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const ZONE: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Controller ───────────────────────────────────────────────────
    #[error("Authentication with {url} failed")]
    #[diagnostic(
        code(unizone::auth_failed),
        help(
            "{message}\n\
             Check the controller URL, username and password.\n\
             Self-signed controller? Try --insecure (-k) or set ca_cert."
        )
    )]
    AuthFailed { url: String, message: String },

    #[error("Could not list clients for site '{site}'")]
    #[diagnostic(
        code(unizone::directory_fetch_failed),
        help(
            "{message}\n\
             Check the site name (--site) and that the user can read clients."
        )
    )]
    DirectoryFetchFailed { site: String, message: String },

    #[error("No password for controller user '{username}'")]
    #[diagnostic(
        code(unizone::no_credentials),
        help(
            "Set UNIZONE_PASSWORD, name a variable with password_env,\n\
             or store it in the system keyring under service 'unizone'."
        )
    )]
    NoCredentials { username: String },

    #[error("Cannot set up the controller connection: {message}")]
    #[diagnostic(
        code(unizone::client_setup),
        help("If ca_cert is set, check that it names a readable PEM certificate.")
    )]
    ClientSetup { message: String },

    // ── Zone ─────────────────────────────────────────────────────────
    #[error("Cannot read zone file {path}")]
    #[diagnostic(
        code(unizone::zone_read_failed),
        help(
            "{reason}\n\
             The zone must be a JSON object of {{name, type, ttl, values}} records keyed by name."
        )
    )]
    ZoneReadFailed { path: String, reason: String },

    #[error("Cannot emit zone: {message}")]
    #[diagnostic(code(unizone::emit))]
    Emit { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Missing required setting '{field}'")]
    #[diagnostic(
        code(unizone::missing_setting),
        help("Set it in {path}, via UNIZONE_{env}, or with the matching flag.")
    )]
    MissingSetting {
        field: String,
        env: String,
        path: String,
    },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(unizone::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(code(unizone::config))]
    Config(Box<figment::Error>),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(unizone::io))]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    #[diagnostic(code(unizone::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::DirectoryFetchFailed { .. } => exit_code::CONNECTION,
            Self::ZoneReadFailed { .. } => exit_code::ZONE,
            Self::MissingSetting { .. }
            | Self::Validation { .. }
            | Self::Config(_)
            | Self::ClientSetup { .. } => exit_code::USAGE,
            Self::Emit { .. } | Self::Io(_) | Self::Json(_) => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AuthenticationFailed { url, message } => Self::AuthFailed { url, message },
            CoreError::DirectoryFetchFailed { site, message } => {
                Self::DirectoryFetchFailed { site, message }
            }
            CoreError::ZoneReadFailed { path, reason } => Self::ZoneReadFailed {
                path: path.display().to_string(),
                reason,
            },
            CoreError::Emit { message } => Self::Emit { message },
            CoreError::Config { message } => Self::ClientSetup { message },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::Missing { field } => Self::MissingSetting {
                env: field.to_uppercase(),
                path: unizone_config::config_path().display().to_string(),
                field,
            },
            ConfigError::NoCredentials { username } => Self::NoCredentials { username },
            ConfigError::Figment(err) => Self::Config(err),
        }
    }
}
