//! `unizone directory` -- print the name -> IP projection.

use unizone_core::fetch_directory;

use crate::cli::{DirectoryArgs, GlobalOpts};
use crate::error::CliError;
use crate::{config, output};

pub async fn handle(args: &DirectoryArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load(global, None)?;
    let controller = unizone_config::controller_config(&cfg)?;

    let directory = fetch_directory(&controller).await?;
    tracing::info!(devices = directory.len(), "directory fetched");

    let json = if args.pretty {
        serde_json::to_string_pretty(&directory)?
    } else {
        serde_json::to_string(&directory)?
    };
    output::emit(&json, None)?;
    Ok(())
}
