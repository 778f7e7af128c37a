// pathscrub-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;
use test_log::test;

use pathscrub_core::config::{self, PathFilterConfig, PathRule};
use pathscrub_core::{headless_filter_path, PathFilter, RuleEngine};

fn write_config(yaml: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml.as_bytes())?;
    Ok(file)
}

#[test]
fn test_load_default_rules() {
    let config = PathFilterConfig::load_default_rules().unwrap();
    assert!(config.rules.iter().any(|r| r.name == "password_reset_token"));
    let user_id = config.find_rule("user_id").unwrap();
    assert!(user_id.opt_in);
}

#[test]
fn test_load_from_file() -> Result<()> {
    let file = write_config(
        r#"
rules:
  - name: order_secret
    description: "Order lookup secret"
    pattern: "/orders/{secret}/order"
    replace_with: "***"
    tags: [orders]
"#,
    )?;
    let config = PathFilterConfig::load_from_file(file.path())?;
    assert_eq!(config.rules.len(), 1);
    let rule = &config.rules[0];
    assert_eq!(rule.name, "order_secret");
    assert_eq!(rule.pattern.as_deref(), Some("/orders/{secret}/order"));
    assert_eq!(rule.replace_with, "***");
    assert_eq!(rule.tags, Some(vec!["orders".to_string()]));
    Ok(())
}

#[test]
fn test_load_from_file_defaults_replacement() -> Result<()> {
    let file = write_config(
        r#"
rules:
  - name: token
    pattern: "/tokens/{token}"
"#,
    )?;
    let config = PathFilterConfig::load_from_file(file.path())?;
    assert_eq!(config.rules[0].replace_with, config::DEFAULT_REPLACEMENT);
    assert!(config.rules[0].is_enabled());
    Ok(())
}

#[test]
fn test_load_from_file_rejects_duplicate_names() -> Result<()> {
    let file = write_config(
        r#"
rules:
  - name: dup
    pattern: "/a/{x}"
  - name: dup
    pattern: "/b/{x}"
"#,
    )?;
    let err = PathFilterConfig::load_from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Rule validation failed"));
    Ok(())
}

#[test]
fn test_load_from_file_accepts_malformed_placeholders() -> Result<()> {
    let file = write_config(
        r#"
rules:
  - name: loose
    pattern: "/files/{name/raw"
"#,
    )?;
    let config = PathFilterConfig::load_from_file(file.path())?;
    let engine = RuleEngine::new(config)?;
    assert_eq!(engine.filter("/files/{name/raw"), "/files/{name/raw");
    Ok(())
}

#[test]
fn test_load_from_missing_file() {
    let err = PathFilterConfig::load_from_file("/definitely/not/here.yaml").unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_load_from_unparseable_file() -> Result<()> {
    let file = write_config("rules: [this is: not: valid")?;
    let err = PathFilterConfig::load_from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
    Ok(())
}

#[test]
fn test_merge_rules_no_user_config() {
    let defaults = PathFilterConfig {
        rules: vec![PathRule::new("orders", "/orders/{id}", "XXX")],
    };
    let merged = config::merge_rules(defaults.clone(), None);
    assert_eq!(merged, defaults);
}

#[test]
fn test_merge_rules_override_in_place() {
    let defaults = PathFilterConfig {
        rules: vec![
            PathRule::new("first", "/first/{id}", "XXX"),
            PathRule::new("second", "/second/{id}", "XXX"),
        ],
    };
    let user = PathFilterConfig {
        rules: vec![
            PathRule::new("extra", "/extra/{id}", "E"),
            PathRule::new("first", "/first/{id}", "F"),
        ],
    };
    let merged = config::merge_rules(defaults, Some(user));
    let names: Vec<&str> = merged.rules.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["first", "second", "extra"]);
    assert_eq!(merged.rules[0].replace_with, "F");
}

#[test]
fn test_set_active_rules() {
    let mut opt_in = PathRule::new("opt", "/opt/{id}", "XXX");
    opt_in.opt_in = true;
    let mut config = PathFilterConfig {
        rules: vec![
            PathRule::new("keep", "/keep/{id}", "XXX"),
            PathRule::new("drop", "/drop/{id}", "XXX"),
            opt_in,
        ],
    };

    let mut without_opt_in = config.clone();
    without_opt_in.set_active_rules(&[], &["drop".to_string()]);
    let names: Vec<&str> = without_opt_in.rules.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["keep"]);

    config.set_active_rules(&["opt".to_string(), "missing".to_string()], &[]);
    let names: Vec<&str> = config.rules.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["keep", "drop", "opt"]);
}

#[test]
fn test_disabled_rule_is_not_applied() -> Result<()> {
    let file = write_config(
        r#"
rules:
  - name: off
    pattern: "/off/{id}"
    enabled: false
  - name: on
    pattern: "/on/{id}"
"#,
    )?;
    let config = PathFilterConfig::load_from_file(file.path())?;
    let engine = RuleEngine::new(config)?;
    assert_eq!(engine.compiled_rules().len(), 1);
    assert_eq!(engine.filter("/off/1"), "/off/1");
    assert_eq!(engine.filter("/on/1"), "/on/XXX");
    Ok(())
}

#[test]
fn test_default_rules_end_to_end() -> Result<()> {
    let config = PathFilterConfig::load_default_rules()?;
    assert_eq!(
        headless_filter_path(config.clone(), "/password-reset/abc123")?,
        "/password-reset/XXX"
    );
    assert_eq!(
        headless_filter_path(config, "/invitations/q9z/accept/now")?,
        "/invitations/XXX/accept/now"
    );
    Ok(())
}
