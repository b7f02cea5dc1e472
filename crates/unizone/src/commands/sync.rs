//! `unizone sync` -- fetch, reconcile, emit.

use crate::cli::{GlobalOpts, SyncArgs};
use crate::error::CliError;
use crate::{config, output};

pub async fn handle(args: SyncArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load(global, args.zone_file)?;
    let sync_config = unizone_config::sync_config(&cfg)?;

    let outcome = unizone_core::sync::run(&sync_config).await?;
    let json = outcome.zone.to_json(args.pretty)?;

    output::emit(&json, args.output.as_deref())?;
    Ok(())
}
