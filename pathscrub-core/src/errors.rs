//! errors.rs - Custom error types for the pathscrub-core library.
//!
//! Pattern compilation and matching are infallible. The errors below come from
//! the layers around them: rule validation, rule lookup and compilation of a
//! whole rule set.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// All error types surfaced by the `pathscrub-core` library.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PathScrubError {
    #[error("Invalid path rule '{0}': {1}")]
    InvalidRule(String, String),

    #[error("Rule '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Path rule '{0}' not found.")]
    RuleNotFound(String),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}
