//! CLI subcommand implementations.

pub mod content;
pub mod migrate;
pub mod secret;
