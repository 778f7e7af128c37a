//! compiler.rs - Manages the compilation and caching of path rules.
//!
//! Converts a `PathFilterConfig` into `CompiledRules`. A global cache keyed by
//! a hash of the rule list avoids recompiling the same rule set for every
//! engine instance.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;
use lazy_static::lazy_static;
use log::{debug, warn};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

use crate::config::{PathFilterConfig, PathRule, MAX_PATTERN_LENGTH};
use crate::errors::PathScrubError;
use crate::pattern::PathPattern;

/// A single compiled path rule.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    /// The unique name of the rule.
    pub name: String,
    /// The compiled pattern, carrying its own replacement text.
    pub pattern: PathPattern,
}

/// All compiled rules of a configuration, in application order.
#[derive(Debug, Default)]
pub struct CompiledRules {
    pub rules: Vec<CompiledRule>,
}

impl CompiledRules {
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// A cached rule set together with the rules it was compiled from.
#[derive(Debug)]
struct CacheEntry {
    rules: Vec<PathRule>,
    compiled: Arc<CompiledRules>,
}

lazy_static! {
    /// Global cache of compiled rule sets, keyed by `hash_config`.
    static ref COMPILED_RULES_CACHE: RwLock<HashMap<u64, CacheEntry>> = RwLock::new(HashMap::new());
}

/// Returns the cached rule set only if it was compiled from exactly `rules`;
/// a bare key match may be a hash collision.
fn cache_hit(entry: Option<&CacheEntry>, rules: &[PathRule]) -> Option<Arc<CompiledRules>> {
    entry
        .filter(|entry| entry.rules.as_slice() == rules)
        .map(|entry| Arc::clone(&entry.compiled))
}

/// Hashes the rule list in order; two configs that differ only in rule order
/// produce different output and therefore different keys.
fn hash_config(config: &PathFilterConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    config.rules.hash(&mut hasher);
    hasher.finish()
}

/// Compiles a list of `PathRule`s into `CompiledRules`.
///
/// Disabled rules and rules without a pattern are skipped. Over-long patterns
/// are collected and reported together.
pub fn compile_rules(rules_to_compile: Vec<PathRule>) -> Result<CompiledRules, PathScrubError> {
    debug!("Starting compilation of {} rules.", rules_to_compile.len());

    let mut compiled_rules = Vec::with_capacity(rules_to_compile.len());
    let mut compilation_errors = Vec::new();

    for rule in rules_to_compile {
        if !rule.is_enabled() {
            debug!("Skipping disabled rule '{}'.", rule.name);
            continue;
        }

        let Some(expression) = rule.pattern else {
            warn!("Skipping rule '{}' because its pattern is missing.", rule.name);
            continue;
        };

        if expression.len() > MAX_PATTERN_LENGTH {
            compilation_errors.push(PathScrubError::PatternLengthExceeded(
                rule.name,
                expression.len(),
                MAX_PATTERN_LENGTH,
            ));
            continue;
        }

        let pattern = PathPattern::compile(rule.replace_with, expression);
        log::debug!(
            target: "pathscrub_core::sanitizer",
            "Rule '{}' compiled into {} tokens.",
            rule.name,
            pattern.tokens().len()
        );
        compiled_rules.push(CompiledRule {
            name: rule.name,
            pattern,
        });
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        return Err(PathScrubError::Fatal(format!(
            "Failed to compile {} rule(s):\n{}",
            compilation_errors.len(),
            error_message
        )));
    }

    debug!("Finished compiling rules. Total compiled: {}.", compiled_rules.len());
    Ok(CompiledRules { rules: compiled_rules })
}

/// Gets a `CompiledRules` instance from the cache or compiles it.
pub fn get_or_compile_rules(config: &PathFilterConfig) -> Result<Arc<CompiledRules>> {
    let cache_key = hash_config(config);

    {
        let cache = COMPILED_RULES_CACHE
            .read()
            .map_err(|_| PathScrubError::Fatal("compiled rule cache lock poisoned".to_string()))?;
        let entry = cache.get(&cache_key);
        if let Some(compiled) = cache_hit(entry, &config.rules) {
            debug!("Serving compiled rules from cache for key: {}", cache_key);
            return Ok(compiled);
        }
        if entry.is_some() {
            warn!("Compiled rule cache key {} collides with a different rule set; recompiling.", cache_key);
        }
    }

    debug!("Compiled rules not found in cache. Compiling now.");
    let compiled = Arc::new(compile_rules(config.rules.clone())?);

    COMPILED_RULES_CACHE
        .write()
        .map_err(|_| PathScrubError::Fatal("compiled rule cache lock poisoned".to_string()))?
        .insert(
            cache_key,
            CacheEntry {
                rules: config.rules.clone(),
                compiled: Arc::clone(&compiled),
            },
        );

    debug!("Successfully compiled and cached rules for key: {}", cache_key);
    Ok(compiled)
}
