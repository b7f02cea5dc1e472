// ── Sync pipeline ──
//
// Directory fetch, then zone read, then reconciliation. Strictly in that
// order; nothing is emitted here, so a failure never yields partial output.

use tracing::info;

use crate::config::SyncConfig;
use crate::controller::fetch_directory;
use crate::error::CoreError;
use crate::reconcile::{Reconciliation, reconcile_with_report};
use crate::zone::read_zone;

/// Run one reconciliation against the live controller.
pub async fn run(config: &SyncConfig) -> Result<Reconciliation, CoreError> {
    let directory = fetch_directory(&config.controller).await?;
    let zone = read_zone(&config.zone_file)?;

    let outcome = reconcile_with_report(&directory, &zone);

    for change in &outcome.changes {
        info!(
            name = %change.name,
            previous = ?change.previous,
            current = ?change.current,
            "address record updated"
        );
    }
    info!(
        devices = directory.len(),
        records = outcome.zone.len(),
        updated = outcome.changes.len(),
        "zone reconciled"
    );

    Ok(outcome)
}
