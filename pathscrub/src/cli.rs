// pathscrub/src/cli.rs
//! Command-line interface definition for the pathscrub application.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use pathscrub_core::DEFAULT_REPLACEMENT;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "pathscrub",
    version = env!("CARGO_PKG_VERSION"),
    about = "Scrub sensitive segments out of request paths",
    long_about = "pathscrub replaces placeholder segments of request paths (IDs, tokens, keys) with a fixed replacement, so path lists and access-log extracts can be stored or shared without the secrets they carry. Patterns look like `/orders/{secret}/order`.",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Suppress all log output.
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG).
    #[arg(long, short = 'd', global = true, conflicts_with = "quiet", help = "Enable debug logging.")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filters paths read one per line from a file or stdin.
    #[command(about = "Filter paths read one per line from a file or stdin.")]
    Filter(FilterCommand),

    /// Inspects rule sets and tries patterns.
    #[command(subcommand, about = "Inspect rule sets and try out patterns.")]
    Rules(RulesCommand),
}

/// Where the rules come from. Shared by `filter` and `rules list`.
#[derive(Args, Debug, Clone, Default)]
pub struct RuleSourceArgs {
    /// Path to a YAML rule file merged over the defaults.
    #[arg(long = "config", value_name = "FILE", env = "PATHSCRUB_CONFIG", help = "Path to a YAML rule file merged over the defaults.")]
    pub config: Option<PathBuf>,

    /// Do not load the built-in default rules.
    #[arg(long = "no-defaults", help = "Do not load the built-in default rules.")]
    pub no_defaults: bool,

    /// Ad-hoc patterns appended after the configured rules.
    #[arg(long = "pattern", short = 'p', value_name = "PATTERN", help = "Add an ad-hoc pattern such as /orders/{id} (repeatable).")]
    pub patterns: Vec<String>,

    /// Replacement used by ad-hoc patterns.
    #[arg(long = "replacement", short = 'r', value_name = "TEXT", default_value = DEFAULT_REPLACEMENT, help = "Replacement used by --pattern rules.")]
    pub replacement: String,

    /// Explicitly enable these rule names (comma-separated), including opt-in rules.
    #[arg(long, short = 'e', value_delimiter = ',', help = "Enable these rule names, including opt-in rules (comma-separated).")]
    pub enable: Vec<String>,

    /// Explicitly disable these rule names (comma-separated).
    #[arg(long, short = 'x', value_delimiter = ',', help = "Disable these rule names (comma-separated).")]
    pub disable: Vec<String>,
}

/// Arguments for the `filter` command.
#[derive(Args, Debug)]
pub struct FilterCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read paths from a file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Write filtered paths to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a file instead of stdout.")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub rules: RuleSourceArgs,

    /// Suppress the redaction summary on stderr.
    #[arg(long = "no-summary", help = "Suppress the redaction summary.")]
    pub no_summary: bool,

    /// Export the redaction summary as JSON.
    #[arg(long = "json-file", value_name = "FILE", help = "Export the redaction summary to a JSON file.")]
    pub json_file: Option<PathBuf>,
}

/// Subcommands for the `rules` command.
#[derive(Subcommand, Debug)]
pub enum RulesCommand {
    #[command(about = "List the active rules.")]
    List(RuleSourceArgs),

    #[command(about = "Show how a single pattern treats the given paths.")]
    Check {
        /// The pattern to compile.
        #[arg(long = "pattern", short = 'p', value_name = "PATTERN")]
        pattern: String,

        /// Text inserted for each placeholder.
        #[arg(long = "replacement", short = 'r', value_name = "TEXT", default_value = DEFAULT_REPLACEMENT)]
        replacement: String,

        /// Paths to test.
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<String>,
    },
}
