// pathscrub-core/src/lib.rs
//! # pathscrub Core Library
//!
//! `pathscrub-core` scrubs sensitive segments (IDs, tokens) out of request
//! paths before they reach a log. A pattern such as `/orders/{secret}/order`
//! is compiled once and then applied to any number of paths, replacing every
//! `{placeholder}` position with a fixed replacement string.
//!
//! Matching is a single linear scan. It only allocates when the path carries
//! a suffix beyond what the pattern accounts for; unmatched paths and exact
//! matches are returned as borrowed strings.
//!
//! ## Modules
//!
//! * `pattern`: Compiles pattern expressions and matches paths against them.
//! * `engine`: Defines the `PathFilter` trait consumed by logging pipelines.
//! * `engines`: Contains the `RuleEngine`, which applies a whole rule set.
//! * `config`: Defines `PathRule`s and `PathFilterConfig`, YAML loading and merging.
//! * `sanitizers`: Compiles rule sets and caches the result.
//! * `redaction_match`: Reporting types that never retain original paths.
//! * `headless`: One-shot helpers.
//! * `errors`: The library error type.
//!
//! ## Usage Example
//!
//! ```rust
//! use pathscrub_core::{PathFilter, PathPattern};
//!
//! let pattern = PathPattern::compile("XXX", "/orders/{secret}/order");
//! assert_eq!(pattern.filter("/orders/42/order"), "/orders/XXX/order");
//! assert_eq!(pattern.filter("/orders/42/order/items"), "/orders/XXX/order/items");
//! assert_eq!(pattern.filter("/customers/42"), "/customers/42");
//!
//! // A compiled pattern is a `PathFilter` and can be chained with others.
//! let chain = pattern.then(PathPattern::compile("XXX", "/users/{id}"));
//! assert_eq!(chain.filter("/users/7"), "/users/XXX");
//! ```
//!
//! ## Error Handling
//!
//! Compiling a pattern and filtering a path never fail. Rule files and rule
//! sets report problems through `anyhow::Error` and [`PathScrubError`].
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod pattern;
pub mod redaction_match;
pub mod sanitizers;

/// Re-exports the pattern compiler and matcher.
pub use pattern::{PathMatch, PathPattern, PathToken};

/// Re-exports the consumer-facing filter trait.
pub use engine::{Chain, PathFilter};

/// Re-exports the rule-set engine.
pub use engines::rule_engine::RuleEngine;

/// Re-exports configuration types and functions.
pub use config::{
    config_candidate_paths,
    merge_rules,
    validate_rules,
    PathFilterConfig,
    PathRule,
    DEFAULT_REPLACEMENT,
    MAX_PATTERN_LENGTH,
};

pub use errors::PathScrubError;

/// Re-exports reporting types.
pub use redaction_match::{
    redact_sensitive, PathRedaction, RedactionOutcome, RedactionSummaryItem, SummaryCollector, DEFAULT_MAX_SAMPLES,
};

pub use headless::{headless_filter_path, headless_filter_paths};

pub use sanitizers::compiler::{compile_rules, get_or_compile_rules, CompiledRule, CompiledRules};
