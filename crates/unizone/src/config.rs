//! CLI configuration -- thin wrapper around `unizone_config`.
//!
//! Turns `GlobalOpts` (and the sync-only `--zone-file`) into the
//! highest-precedence figment layer.

use std::path::PathBuf;

use unizone_config::{Config, Overrides};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Flags that were actually passed; absent ones defer to file and env.
pub fn overrides(global: &GlobalOpts, zone_file: Option<PathBuf>) -> Overrides {
    Overrides {
        controller: global.controller.clone(),
        site: global.site.clone(),
        username: global.username.clone(),
        insecure: global.insecure.then_some(true),
        timeout: global.timeout,
        platform: global.platform.map(|p| p.as_str().to_owned()),
        zone_file,
    }
}

/// Load the merged configuration for this invocation.
pub fn load(global: &GlobalOpts, zone_file: Option<PathBuf>) -> Result<Config, CliError> {
    let overrides = overrides(global, zone_file);
    let config = unizone_config::load(global.config.as_deref(), &overrides)?;
    tracing::debug!(
        controller = config.controller.as_deref().unwrap_or("-"),
        site = %config.site,
        platform = %config.platform,
        "configuration loaded"
    );
    Ok(config)
}
