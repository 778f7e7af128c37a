// pathscrub/src/lib.rs
//! # pathscrub CLI
//!
//! Command-line front end for `pathscrub-core`: scrubs sensitive segments out
//! of lists of request paths and inspects rule sets.

pub mod cli;
pub mod commands;
pub mod logger;
