//! Configuration management for `pathscrub-core`.
//!
//! This module defines the data structures for path redaction rules. It handles
//! deserialization of YAML rule files and provides utilities for loading,
//! merging, filtering and validating rule sets.
//!
//! Rule order matters: rules are applied one after another, each seeing the
//! output of the previous one.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use crate::errors::PathScrubError;
use crate::pattern::SEGMENT_SEPARATOR;

/// Maximum allowed length for a path pattern string.
pub const MAX_PATTERN_LENGTH: usize = 1024;

/// Replacement used when a rule does not specify one.
pub const DEFAULT_REPLACEMENT: &str = "XXX";

/// File name looked up in the user configuration directories.
pub const RULES_FILE_NAME: &str = "rules.yaml";

/// A single path redaction rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PathRule {
    /// Unique identifier for the rule (e.g., "order_secret").
    pub name: String,
    /// Human-readable description of what the rule targets.
    pub description: Option<String>,
    /// The path pattern, e.g. `/orders/{secret}/order`.
    pub pattern: Option<String>,
    /// Text inserted in place of every placeholder segment.
    pub replace_with: String,
    /// Explicit override for enabling/disabling the rule.
    pub enabled: Option<bool>,
    /// If true, the rule is inactive unless explicitly enabled.
    pub opt_in: bool,
    /// Metadata tags for categorization.
    pub tags: Option<Vec<String>>,
}

// Only the fields that change compiled output take part in the cache key.
impl Hash for PathRule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.pattern.hash(state);
        self.replace_with.hash(state);
        self.enabled.hash(state);
    }
}

impl Default for PathRule {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            pattern: None,
            replace_with: DEFAULT_REPLACEMENT.to_string(),
            enabled: None,
            opt_in: false,
            tags: None,
        }
    }
}

impl PathRule {
    /// Convenience constructor for ad-hoc rules.
    pub fn new(name: impl Into<String>, pattern: impl Into<String>, replace_with: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: Some(pattern.into()),
            replace_with: replace_with.into(),
            ..Default::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled != Some(false)
    }
}

/// The top-level rule file structure.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct PathFilterConfig {
    #[serde(default)]
    pub rules: Vec<PathRule>,
}

impl PathFilterConfig {
    /// Loads path rules from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading path rules from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: PathFilterConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        validate_rules(&config.rules)?;
        info!("Loaded {} rules from file {}.", config.rules.len(), path.display());

        Ok(config)
    }

    /// Loads the default path rules embedded in the library.
    pub fn load_default_rules() -> Result<Self> {
        debug!("Loading default rules from embedded string...");
        let default_yaml = include_str!("../config/default_rules.yaml");
        let config: PathFilterConfig = serde_yml::from_str(default_yaml)
            .context("Failed to parse default rules")?;

        debug!("Loaded {} default rules.", config.rules.len());
        Ok(config)
    }

    /// Loads the first user rule file found in [`config_candidate_paths`].
    pub fn load_user_rules() -> Result<Option<Self>> {
        for candidate in config_candidate_paths() {
            if candidate.is_file() {
                return Self::load_from_file(&candidate).map(Some);
            }
            debug!("No user rules at {}", candidate.display());
        }
        Ok(None)
    }

    /// Drops disabled rules and opt-in rules that were not explicitly enabled.
    pub fn set_active_rules(&mut self, enable_rules: &[String], disable_rules: &[String]) {
        let enable_set: HashSet<&str> = enable_rules.iter().map(String::as_str).collect();
        let disable_set: HashSet<&str> = disable_rules.iter().map(String::as_str).collect();

        debug!("Initial rules count before filtering: {}", self.rules.len());

        let all_rule_names: HashSet<&str> = self.rules.iter().map(|r| r.name.as_str()).collect();

        for rule_name in enable_set.difference(&all_rule_names) {
            warn!("Rule '{}' in `enable_rules` list does not exist.", rule_name);
        }

        for rule_name in disable_set.difference(&all_rule_names) {
            warn!("Rule '{}' in `disable_rules` list does not exist.", rule_name);
        }

        self.rules.retain(|rule| {
            let name = rule.name.as_str();
            !disable_set.contains(name) && (!rule.opt_in || enable_set.contains(name))
        });

        debug!("Final active rules count after filtering: {}", self.rules.len());
    }

    pub fn find_rule(&self, name: &str) -> Result<&PathRule, PathScrubError> {
        self.rules
            .iter()
            .find(|rule| rule.name == name)
            .ok_or_else(|| PathScrubError::RuleNotFound(name.to_string()))
    }
}

/// User rule file locations, most specific first.
pub fn config_candidate_paths() -> Vec<PathBuf> {
    [
        dirs::home_dir().map(|p| p.join(".pathscrub").join(RULES_FILE_NAME)),
        dirs::config_dir().map(|p| p.join("pathscrub").join(RULES_FILE_NAME)),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Merges user-defined rules into the defaults.
///
/// A user rule replaces the default of the same name in place; new user rules
/// are appended in file order.
pub fn merge_rules(default_config: PathFilterConfig, user_config: Option<PathFilterConfig>) -> PathFilterConfig {
    debug!("merge_rules called. Initial default rules count: {}", default_config.rules.len());

    let mut final_rules = default_config.rules;

    if let Some(user_cfg) = user_config {
        debug!("User config provided. Merging {} user rules.", user_cfg.rules.len());
        let positions: HashMap<String, usize> = final_rules
            .iter()
            .enumerate()
            .map(|(i, rule)| (rule.name.clone(), i))
            .collect();

        for user_rule in user_cfg.rules {
            match positions.get(&user_rule.name) {
                Some(&i) => {
                    debug!("Overriding default rule '{}'.", user_rule.name);
                    final_rules[i] = user_rule;
                }
                None => final_rules.push(user_rule),
            }
        }
    }

    debug!("Final total rules after merge: {}", final_rules.len());
    PathFilterConfig { rules: final_rules }
}

/// Validates rule integrity.
///
/// Names must be present and unique and patterns bounded in length. Pattern
/// shape is only reported: a pattern without placeholders or with unbalanced
/// braces still compiles and is applied as literal text.
pub fn validate_rules(rules: &[PathRule]) -> Result<()> {
    let mut rule_names = HashSet::new();
    let mut errors = Vec::new();

    for rule in rules {
        if rule.name.is_empty() {
            errors.push(PathScrubError::InvalidRule(String::new(), "empty `name` field".to_string()).to_string());
        } else if !rule_names.insert(rule.name.as_str()) {
            errors.push(PathScrubError::InvalidRule(rule.name.clone(), "duplicate rule name".to_string()).to_string());
        }

        let pattern = match rule.pattern.as_deref() {
            Some(p) if !p.is_empty() => p,
            _ => {
                warn!("Rule '{}' has no pattern and will never redact anything.", rule.name);
                continue;
            }
        };

        if pattern.len() > MAX_PATTERN_LENGTH {
            errors.push(
                PathScrubError::PatternLengthExceeded(rule.name.clone(), pattern.len(), MAX_PATTERN_LENGTH).to_string(),
            );
            continue;
        }

        let mut placeholders = 0usize;
        for segment in pattern.split(SEGMENT_SEPARATOR) {
            if segment.starts_with('{') && segment.ends_with('}') {
                placeholders += 1;
            } else if segment.contains(['{', '}']) {
                warn!(
                    "Rule '{}': segment '{}' is not a placeholder and will be matched literally.",
                    rule.name, segment
                );
            }
        }
        if placeholders == 0 {
            warn!("Rule '{}' has no placeholders; it can only ever pass paths through.", rule.name);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(anyhow!("Rule validation failed:\n{}", errors.join("\n")))
    }
}
