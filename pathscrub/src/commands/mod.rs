// pathscrub/src/commands/mod.rs
//! Subcommand implementations.

pub mod filter;
pub mod rules;
