//! Subcommand handlers.

pub mod directory;
pub mod sync;
