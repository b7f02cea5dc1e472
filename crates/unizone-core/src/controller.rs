// ── Device directory source ──
//
// One short-lived session per run: build transport, resolve platform,
// login, list known clients, logout, project.

use tracing::{debug, warn};

use unizone_api::{LegacyClient, TransportConfig};

use crate::config::ControllerConfig;
use crate::directory::DeviceDirectory;
use crate::error::CoreError;

/// Fetch the device directory for the configured site.
///
/// Login failures and an unreachable controller both surface as
/// [`CoreError::AuthenticationFailed`]; a failed listing after a good
/// login is [`CoreError::DirectoryFetchFailed`]. Logout is best-effort.
pub async fn fetch_directory(config: &ControllerConfig) -> Result<DeviceDirectory, CoreError> {
    let transport = TransportConfig {
        tls: config.tls.to_tls_mode(),
        timeout: config.timeout,
        ..TransportConfig::default()
    }
    .with_cookie_jar();

    let http = transport.build_client().map_err(|e| CoreError::Config {
        message: e.to_string(),
    })?;

    let auth_failed = |e: unizone_api::Error| {
        if e.is_unreachable() {
            debug!(url = %config.url, "controller unreachable");
        }
        CoreError::AuthenticationFailed {
            url: config.url.to_string(),
            message: e.to_string(),
        }
    };

    let platform = match config.platform {
        Some(platform) => platform,
        None => LegacyClient::detect_platform(&http, &config.url)
            .await
            .map_err(auth_failed)?,
    };
    debug!(%platform, url = %config.url, "using controller platform");

    let client = LegacyClient::with_client(http, config.url.clone(), config.site.clone(), platform);

    client
        .login(&config.username, &config.password)
        .await
        .map_err(auth_failed)?;

    // Logout runs whether or not the listing succeeded.
    let listed = client.list_known_clients().await;

    if let Err(e) = client.logout().await {
        warn!(error = %e, "logout failed; session left to expire");
    }

    let clients = listed.map_err(|e| CoreError::DirectoryFetchFailed {
        site: config.site.clone(),
        message: e.to_string(),
    })?;
    debug!(count = clients.len(), "known clients listed");

    let directory = DeviceDirectory::from_clients(&clients);
    debug!(entries = directory.len(), "device directory built");
    Ok(directory)
}
