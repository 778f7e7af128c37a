// pathscrub-core/src/redaction_match.rs
//! Data structures and helpers for reporting path redactions without leaking
//! the paths that were redacted.

use std::collections::BTreeMap;

use chrono::Utc;
use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Whether original paths may appear in debug logs.
static PII_DEBUG_ALLOWED: Lazy<bool> = Lazy::new(|| {
    std::env::var("PATHSCRUB_ALLOW_DEBUG_PII")
        .map(|s| s.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
});

/// How a rule matched a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedactionOutcome {
    /// The rule accounted for the whole path.
    Full,
    /// The rule matched a prefix; the rest was carried over verbatim.
    Partial,
}

/// A single rule rewriting a single path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRedaction {
    pub rule_name: String,
    pub outcome: RedactionOutcome,
    pub sanitized_path: String,
    /// SHA-256 over the rule name and the path as the rule saw it.
    pub path_hash: String,
    #[serde(default)]
    pub source_id: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl PathRedaction {
    pub fn new(rule_name: &str, outcome: RedactionOutcome, original_path: &str, sanitized_path: &str, source_id: &str) -> Self {
        Self {
            rule_name: rule_name.to_string(),
            outcome,
            sanitized_path: sanitized_path.to_string(),
            path_hash: canonical_path_hash(rule_name, original_path),
            source_id: source_id.to_string(),
            timestamp: Some(Utc::now().to_rfc3339()),
        }
    }
}

/// Per-rule totals over a batch of paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionSummaryItem {
    pub rule_name: String,
    pub occurrences: usize,
    pub full_matches: usize,
    pub partial_matches: usize,
    /// Distinct sanitized outputs, in first-seen order.
    pub sanitized_samples: Vec<String>,
}

impl RedactionSummaryItem {
    pub fn record(&mut self, redaction: &PathRedaction, max_samples: usize) {
        self.occurrences += 1;
        match redaction.outcome {
            RedactionOutcome::Full => self.full_matches += 1,
            RedactionOutcome::Partial => self.partial_matches += 1,
        }
        if self.sanitized_samples.len() < max_samples && !self.sanitized_samples.contains(&redaction.sanitized_path) {
            self.sanitized_samples.push(redaction.sanitized_path.clone());
        }
    }
}

/// Distinct sanitized outputs kept per rule in a summary.
pub const DEFAULT_MAX_SAMPLES: usize = 5;

/// Folds a stream of redactions into per-rule totals, ordered by rule name.
#[derive(Debug)]
pub struct SummaryCollector {
    items: BTreeMap<String, RedactionSummaryItem>,
    max_samples: usize,
}

impl Default for SummaryCollector {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SAMPLES)
    }
}

impl SummaryCollector {
    pub fn new(max_samples: usize) -> Self {
        Self {
            items: BTreeMap::new(),
            max_samples,
        }
    }

    pub fn record(&mut self, redaction: &PathRedaction) {
        self.items
            .entry(redaction.rule_name.clone())
            .or_insert_with(|| RedactionSummaryItem {
                rule_name: redaction.rule_name.clone(),
                ..Default::default()
            })
            .record(redaction, self.max_samples);
    }

    pub fn record_all(&mut self, redactions: &[PathRedaction]) {
        for redaction in redactions {
            self.record(redaction);
        }
    }

    pub fn into_items(self) -> Vec<RedactionSummaryItem> {
        self.items.into_values().collect()
    }
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    let chars = s.chars().count();
    if chars <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", chars)
    }
}

fn get_loggable_content(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

pub fn log_path_redaction_debug(module_path: &str, rule_name: &str, original_path: &str, sanitized_path: &str) {
    debug!(
        "{} Path redaction: Rule='{}', Original='{}', Sanitized='{}'",
        module_path,
        rule_name,
        get_loggable_content(original_path),
        sanitized_path
    );
}

pub fn canonical_path_hash(rule_id: &str, path: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(rule_id.as_bytes());
    hasher.update(b":");
    hasher.update(path.as_bytes());
    hex::encode(hasher.finalize())
}
