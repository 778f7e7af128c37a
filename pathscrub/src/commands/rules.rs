// pathscrub/src/commands/rules.rs
//! The `rules` subcommands: listing the active rule set and trying a pattern.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};
use std::io::{self, Write};

use pathscrub_core::{PathFilterConfig, PathMatch, PathPattern};

use crate::cli::{RuleSourceArgs, RulesCommand};
use crate::commands::filter::build_config;

pub fn run_rules(cmd: &RulesCommand) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cmd {
        RulesCommand::List(args) => list_rules(args, &mut out),
        RulesCommand::Check { pattern, replacement, paths } => check_pattern(pattern, replacement, paths, &mut out),
    }
}

fn list_rules<W: Write>(args: &RuleSourceArgs, out: &mut W) -> Result<()> {
    let config = build_config(args)?;
    write_rule_table(&config, out)
}

pub fn write_rule_table<W: Write>(config: &PathFilterConfig, out: &mut W) -> Result<()> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Name", "Pattern", "Replacement", "Enabled", "Description"]);
    for rule in &config.rules {
        table.add_row(vec![
            rule.name.clone(),
            rule.pattern.clone().unwrap_or_default(),
            rule.replace_with.clone(),
            if rule.is_enabled() { "yes" } else { "no" }.to_string(),
            rule.description.clone().unwrap_or_default(),
        ]);
    }
    writeln!(out, "{table}")?;
    Ok(())
}

/// Prints `<outcome>\t<filtered path>` for each path.
pub fn check_pattern<W: Write>(pattern: &str, replacement: &str, paths: &[String], out: &mut W) -> Result<()> {
    let compiled = PathPattern::compile(replacement, pattern);
    for path in paths {
        let outcome = compiled.match_path(path);
        let label = match outcome {
            PathMatch::NoMatch => "none",
            PathMatch::Full => "full",
            PathMatch::Partial { .. } => "partial",
        };
        writeln!(out, "{}\t{}", label, compiled.render(path, outcome))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathscrub_core::PathRule;

    #[test]
    fn test_check_pattern_labels_outcomes() -> Result<()> {
        let paths = vec![
            "/orders/42/order".to_string(),
            "/orders/42/order/x".to_string(),
            "/customers/42".to_string(),
        ];
        let mut out = Vec::new();
        check_pattern("/orders/{secret}/order", "XXX", &paths, &mut out)?;
        assert_eq!(
            String::from_utf8(out)?,
            "full\t/orders/XXX/order\npartial\t/orders/XXX/order/x\nnone\t/customers/42\n"
        );
        Ok(())
    }

    #[test]
    fn test_write_rule_table() -> Result<()> {
        let config = PathFilterConfig {
            rules: vec![PathRule::new("orders", "/orders/{id}", "XXX")],
        };
        let mut out = Vec::new();
        write_rule_table(&config, &mut out)?;
        let text = String::from_utf8(out)?;
        assert!(text.contains("orders"));
        assert!(text.contains("/orders/{id}"));
        Ok(())
    }
}
