// pathscrub-core/src/engines/rule_engine.rs
//! A `PathFilter` that applies every compiled rule of a configuration in
//! sequence and reports which rules rewrote the path.
//! License: MIT OR APACHE 2.0

use std::borrow::Cow;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::debug;

use crate::config::PathFilterConfig;
use crate::engine::PathFilter;
use crate::pattern::PathMatch;
use crate::redaction_match::{
    log_path_redaction_debug, PathRedaction, RedactionOutcome, RedactionSummaryItem, SummaryCollector,
};
use crate::sanitizers::compiler::{get_or_compile_rules, CompiledRule, CompiledRules};

#[derive(Debug, Clone)]
pub struct RuleEngine {
    compiled_rules: Arc<CompiledRules>,
    config: PathFilterConfig,
}

impl RuleEngine {
    pub fn new(config: PathFilterConfig) -> Result<Self> {
        let compiled_rules = get_or_compile_rules(&config)
            .context("Failed to compile path rules for RuleEngine")?;
        debug!("RuleEngine initialised with {} compiled rules.", compiled_rules.len());

        Ok(Self { compiled_rules, config })
    }

    pub fn compiled_rules(&self) -> &CompiledRules {
        &self.compiled_rules
    }

    pub fn get_rules(&self) -> &PathFilterConfig {
        &self.config
    }

    /// Runs each rule over the output of the previous one. `on_rewrite` sees
    /// every rule whose output differs from its input.
    fn apply<'a, F>(&'a self, path: &'a str, mut on_rewrite: F) -> Cow<'a, str>
    where
        F: FnMut(&CompiledRule, RedactionOutcome, &str, &str),
    {
        let mut current: Cow<'a, str> = Cow::Borrowed(path);

        for rule in &self.compiled_rules.rules {
            let matched = rule.pattern.match_path(&current);
            let outcome = match matched {
                PathMatch::NoMatch => continue,
                PathMatch::Full => RedactionOutcome::Full,
                PathMatch::Partial { .. } => RedactionOutcome::Partial,
            };

            let next: Cow<'a, str> = match current {
                Cow::Borrowed(p) => rule.pattern.render(p, matched),
                Cow::Owned(ref p) => Cow::Owned(rule.pattern.render(p, matched).into_owned()),
            };

            // Literal-only rules and replacements equal to the secret match
            // without changing anything.
            if next != current {
                on_rewrite(rule, outcome, &*current, &*next);
                current = next;
            }
        }
        current
    }

    /// Filters `path` and records one `PathRedaction` per rule that rewrote it.
    pub fn sanitize<'a>(&'a self, path: &'a str, source_id: &str) -> (Cow<'a, str>, Vec<PathRedaction>) {
        let mut redactions = Vec::new();
        let sanitized = self.apply(path, |rule, outcome, before, after| {
            log_path_redaction_debug(module_path!(), &rule.name, before, after);
            redactions.push(PathRedaction::new(&rule.name, outcome, before, after, source_id));
        });
        (sanitized, redactions)
    }

    /// Per-rule totals over a batch of paths, ordered by rule name.
    pub fn analyze_for_stats<'p, I>(&self, paths: I) -> Vec<RedactionSummaryItem>
    where
        I: IntoIterator<Item = &'p str>,
    {
        let mut collector = SummaryCollector::default();
        for path in paths {
            let (_, redactions) = self.sanitize(path, "");
            collector.record_all(&redactions);
        }
        collector.into_items()
    }
}

impl PathFilter for RuleEngine {
    fn filter<'a>(&'a self, path: &'a str) -> Cow<'a, str> {
        self.apply(path, |_, _, _, _| {})
    }
}
