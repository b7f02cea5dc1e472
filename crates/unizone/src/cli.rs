//! Clap derive structures for the `unizone` CLI.
//!
//! Only depends on clap and clap_complete so `build.rs` can include it.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// unizone -- keep a DNS zone's A records in line with UniFi clients
#[derive(Debug, Parser)]
#[command(
    name = "unizone",
    version,
    about = "Reconcile a DNS zone file against UniFi client addresses",
    long_about = "Logs in to a UniFi Network controller, lists every known client,\n\
        and rewrites the A records of a JSON zone file whose names match a\n\
        client so they carry that client's fixed or leased address.\n\n\
        The reconciled zone is printed to stdout.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config dir)
    #[arg(long, env = "UNIZONE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Controller URL
    #[arg(long, short = 'c', global = true)]
    pub controller: Option<String>,

    /// Site name
    #[arg(long, short = 's', global = true)]
    pub site: Option<String>,

    /// Controller username
    #[arg(long, short = 'u', global = true)]
    pub username: Option<String>,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Controller platform
    #[arg(long, global = true)]
    pub platform: Option<PlatformArg>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PlatformArg {
    /// Probe the controller
    Auto,
    /// UniFi OS console (UDM, UCG, Cloud Key Gen2+)
    UnifiOs,
    /// Standalone Network Application
    Classic,
}

impl PlatformArg {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::UnifiOs => "unifi-os",
            Self::Classic => "classic",
        }
    }
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Reconcile the zone file and print the result
    Sync(SyncArgs),

    /// Print the device directory (name -> IP) fetched from the controller
    #[command(alias = "dir")]
    Directory(DirectoryArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Zone file to reconcile (overrides `zone_file` in config)
    #[arg(long, short = 'z')]
    pub zone_file: Option<PathBuf>,

    /// Indent the emitted JSON
    #[arg(long)]
    pub pretty: bool,

    /// Write the zone here instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct DirectoryArgs {
    /// Indent the emitted JSON
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
