// pathscrub-core/src/headless.rs
//! `headless.rs`
//! Convenience wrappers for one-shot path filtering without managing an engine.

use anyhow::Result;

use crate::config::PathFilterConfig;
use crate::engine::PathFilter;
use crate::engines::rule_engine::RuleEngine;

/// Filters a single path through every rule of `config`.
pub fn headless_filter_path(config: PathFilterConfig, path: &str) -> Result<String> {
    let engine = RuleEngine::new(config)?;
    Ok(engine.filter(path).into_owned())
}

/// Filters a batch of paths, compiling the rules once.
pub fn headless_filter_paths<S: AsRef<str>>(config: PathFilterConfig, paths: &[S]) -> Result<Vec<String>> {
    let engine = RuleEngine::new(config)?;
    Ok(paths
        .iter()
        .map(|path| engine.filter(path.as_ref()).into_owned())
        .collect())
}
