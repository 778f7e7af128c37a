// pathscrub/src/commands/filter.rs
//! The `filter` command: streams paths through a `RuleEngine`.

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, Table};
use log::{debug, info, warn};
use serde::Serialize;
use std::borrow::Cow;
use std::fs;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use pathscrub_core::{
    merge_rules, PathFilterConfig, PathRule, RedactionSummaryItem, RuleEngine, SummaryCollector,
};

use crate::cli::{FilterCommand, RuleSourceArgs};

/// Totals for one `filter` run, as written by `--json-file`.
#[derive(Debug, Default, Serialize)]
pub struct FilterReport {
    pub total_paths: usize,
    pub redacted_paths: usize,
    pub rules: Vec<RedactionSummaryItem>,
}

/// Resolves defaults, user rule file and ad-hoc patterns into one configuration.
pub fn build_config(args: &RuleSourceArgs) -> Result<PathFilterConfig> {
    let defaults = if args.no_defaults {
        debug!("Default rules disabled.");
        PathFilterConfig::default()
    } else {
        PathFilterConfig::load_default_rules()?
    };

    let user = match &args.config {
        Some(path) => Some(PathFilterConfig::load_from_file(path)?),
        None => PathFilterConfig::load_user_rules()?,
    };

    let mut config = merge_rules(defaults, user);
    for (i, pattern) in args.patterns.iter().enumerate() {
        config
            .rules
            .push(PathRule::new(format!("cli_pattern_{}", i + 1), pattern.as_str(), args.replacement.as_str()));
    }
    config.set_active_rules(&args.enable, &args.disable);
    Ok(config)
}

/// Filters every line of `reader` into `writer`.
///
/// Lines are read as raw bytes. A line that is not valid UTF-8 is filtered
/// with the offending bytes replaced by U+FFFD, and the stream carries on.
pub fn filter_stream<R: BufRead, W: Write>(engine: &RuleEngine, mut reader: R, mut writer: W, source_id: &str) -> Result<FilterReport> {
    let mut collector = SummaryCollector::default();
    let mut report = FilterReport::default();
    let mut buf = Vec::new();
    let mut line_number = 0usize;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .context("Failed to read input line")?;
        if read == 0 {
            break;
        }
        line_number += 1;

        let raw = trim_line_ending(&buf);
        let line = String::from_utf8_lossy(raw);
        if matches!(line, Cow::Owned(_)) {
            warn!("Line {} of {} is not valid UTF-8; invalid bytes replaced.", line_number, source_id);
        }

        let (sanitized, redactions) = engine.sanitize(&line, source_id);
        writeln!(writer, "{}", sanitized)?;

        report.total_paths += 1;
        if !redactions.is_empty() {
            report.redacted_paths += 1;
            collector.record_all(&redactions);
        }
    }
    writer.flush()?;

    report.rules = collector.into_items();
    Ok(report)
}

/// Strips a trailing `\n` or `\r\n`.
fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

pub fn run_filter(cmd: &FilterCommand, quiet: bool) -> Result<()> {
    let config = build_config(&cmd.rules)?;
    let engine = RuleEngine::new(config)?;
    info!("Filtering with {} active rules.", engine.compiled_rules().len());

    let (reader, source_id): (Box<dyn BufRead>, String) = match &cmd.input_file {
        Some(path) => {
            info!("Reading paths from {}", path.display());
            let file = fs::File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            (Box::new(BufReader::new(file)), path.display().to_string())
        }
        None => {
            info!("Reading paths from stdin...");
            (Box::new(io::stdin().lock()), "stdin".to_string())
        }
    };

    let report = match &cmd.output {
        Some(path) => {
            info!("Writing filtered paths to file: {}", path.display());
            let file = fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            filter_stream(&engine, reader, BufWriter::new(file), &source_id)?
        }
        None => filter_stream(&engine, reader, io::stdout().lock(), &source_id)?,
    };

    if let Some(path) = &cmd.json_file {
        write_json_report(&report, path)?;
    }

    if !cmd.no_summary && !quiet {
        print_summary(&report, &mut io::stderr())?;
    }

    info!("Filter operation completed.");
    Ok(())
}

fn write_json_report(report: &FilterReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize redaction summary")?;
    fs::write(path, json).with_context(|| format!("Failed to write JSON summary: {}", path.display()))?;
    info!("Redaction summary written to {}", path.display());
    Ok(())
}

pub fn print_summary<W: Write>(report: &FilterReport, out: &mut W) -> Result<()> {
    writeln!(out, "Redacted {} of {} paths.", report.redacted_paths, report.total_paths)?;
    if report.rules.is_empty() {
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Rule", "Occurrences", "Full", "Partial"]);
    for item in &report.rules {
        table.add_row(vec![
            item.rule_name.clone(),
            item.occurrences.to_string(),
            item.full_matches.to_string(),
            item.partial_matches.to_string(),
        ]);
    }
    writeln!(out, "{table}")?;
    Ok(())
}
