//! Tests for the config module

use super::loader::{apply_env, apply_overrides};
use super::*;
use crate::error::WampaError;
use crate::infrastructure::watcher::WatcherMode;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

fn valid_config() -> Config {
    Config {
        input_files: vec!["spec.md".to_string()],
        output_file: "out.md".to_string(),
        watch: WatchSettings::default(),
    }
}

#[test]
fn test_watch_settings_default() {
    let settings = WatchSettings::default();

    assert_eq!(settings.mode, WatcherMode::Poll);
    assert_eq!(settings.poll_interval_ms, 100);
    assert_eq!(settings.max_remote_size, 100_000_000);
    assert_eq!(settings.channel_capacity, 16);
    assert!(!settings.retain_on_error);
}

#[test]
fn test_config_parse_json() {
    let json = r#"{
  "input_files": ["spec.md", "https://example.com/rules.md"],
  "output_file": "out.md"
}"#;

    let (config, warnings) = parse_with_warnings(json, Path::new("wampa.json")).unwrap();

    assert_eq!(config.input_files.len(), 2);
    assert_eq!(config.output_file, "out.md");
    assert_eq!(config.watch, WatchSettings::default());
    assert!(warnings.is_empty());
}

#[test]
fn test_config_parse_watch_section() {
    let json = r#"{
  "input_files": ["a.md"],
  "output_file": "out.md",
  "watch": { "mode": "native", "poll_interval_ms": 250, "retain_on_error": true }
}"#;

    let (config, _) = parse_with_warnings(json, Path::new("wampa.json")).unwrap();

    assert_eq!(config.watch.mode, WatcherMode::Native);
    assert_eq!(config.watch.poll_interval_ms, 250);
    assert!(config.watch.retain_on_error);
    assert_eq!(config.watch.channel_capacity, 16);
}

#[test]
fn test_config_parse_unknown_keys_warn() {
    let json = r#"{
  "input_files": ["a.md"],
  "output_file": "out.md",
  "watch": {
    "poll_interval": 50
  }
}"#;

    let (_, warnings) = parse_with_warnings(json, Path::new("wampa.json")).unwrap();

    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "poll_interval");
    assert_eq!(warnings[0].line, Some(5));
    assert_eq!(warnings[0].file, Path::new("wampa.json"));
}

#[test]
fn test_config_parse_missing_required_field() {
    let json = r#"{ "input_files": ["a.md"] }"#;
    let err = parse_with_warnings(json, Path::new("wampa.json")).unwrap_err();
    assert!(matches!(err, WampaError::ConfigParse { .. }));
    assert!(err.to_string().contains("output_file"));
}

#[test]
fn test_config_parse_wrong_type() {
    let json = r#"{ "input_files": "a.md", "output_file": "out.md" }"#;
    let err = parse_with_warnings(json, Path::new("wampa.json")).unwrap_err();
    assert!(matches!(err, WampaError::ConfigParse { .. }));
}

#[test]
fn test_config_parse_invalid_json() {
    let err = parse_with_warnings("{ not json", Path::new("wampa.json")).unwrap_err();
    assert!(err.to_string().contains("wampa.json"));
}

#[test]
fn test_config_parse_trailing_garbage() {
    let json = r#"{ "input_files": ["a.md"], "output_file": "out.md" } extra"#;
    assert!(parse_with_warnings(json, Path::new("wampa.json")).is_err());
}

// === Validation ===

#[test]
fn test_validate_accepts_valid_config() {
    assert!(valid_config().validate().is_ok());
}

#[test]
fn test_validate_empty_inputs() {
    let mut config = valid_config();
    config.input_files.clear();
    let err = config.validate().unwrap_err();
    assert_eq!(err.to_string(), "input_files must not be empty");
}

#[test]
fn test_validate_empty_input_entry() {
    let mut config = valid_config();
    config.input_files.push(String::new());
    let err = config.validate().unwrap_err();
    assert_eq!(err.to_string(), "input_files[1] must not be empty");
}

#[test]
fn test_validate_empty_output() {
    let mut config = valid_config();
    config.output_file.clear();
    let err = config.validate().unwrap_err();
    assert_eq!(err.to_string(), "output_file must not be empty");
}

#[test]
fn test_validate_zero_poll_interval() {
    let mut config = valid_config();
    config.watch.poll_interval_ms = 0;
    assert!(config.validate().is_err());
}

// === Layering ===

#[test]
fn test_cli_overrides_replace_file_values() {
    let overrides = ConfigOverrides {
        input_files: vec!["b.md".to_string()],
        output_file: Some("other.md".to_string()),
        mode: Some(WatcherMode::Native),
        poll_interval_ms: None,
    };

    let config = apply_overrides(valid_config(), &overrides);

    assert_eq!(config.input_files, vec!["b.md".to_string()]);
    assert_eq!(config.output_file, "other.md");
    assert_eq!(config.watch.mode, WatcherMode::Native);
    assert_eq!(config.watch.poll_interval_ms, 100);
}

#[test]
fn test_empty_overrides_keep_file_values() {
    let config = apply_overrides(valid_config(), &ConfigOverrides::default());
    assert_eq!(config, valid_config());
}

#[test]
fn test_env_overrides() {
    let config = apply_env(
        valid_config(),
        env(&[
            ("WAMPA_WATCH_MODE", "native"),
            ("WAMPA_POLL_INTERVAL_MS", "250"),
            ("WAMPA_MAX_REMOTE_SIZE", "1000"),
        ]),
    );

    assert_eq!(config.watch.mode, WatcherMode::Native);
    assert_eq!(config.watch.poll_interval_ms, 250);
    assert_eq!(config.watch.max_remote_size, 1000);
}

#[test]
fn test_env_invalid_values_are_ignored() {
    let config = apply_env(
        valid_config(),
        env(&[
            ("WAMPA_WATCH_MODE", "nativ"),
            ("WAMPA_POLL_INTERVAL_MS", "fast"),
            ("WAMPA_MAX_REMOTE_SIZE", "0"),
        ]),
    );

    assert_eq!(config.watch, WatchSettings::default());
}

#[test]
fn test_cli_beats_env() {
    let config = apply_env(valid_config(), env(&[("WAMPA_POLL_INTERVAL_MS", "250")]));
    let overrides = ConfigOverrides {
        poll_interval_ms: Some(20),
        ..ConfigOverrides::default()
    };
    let config = apply_overrides(config, &overrides);
    assert_eq!(config.watch.poll_interval_ms, 20);
}

#[test]
fn test_overrides_is_complete() {
    let mut overrides = ConfigOverrides::default();
    assert!(!overrides.is_complete());
    overrides.input_files.push("a.md".to_string());
    assert!(!overrides.is_complete());
    overrides.output_file = Some("out.md".to_string());
    assert!(overrides.is_complete());
}

// === Loading from disk ===

#[test]
fn test_load_layered_missing_optional_file_uses_cli() {
    let dir = tempdir().unwrap();
    let overrides = ConfigOverrides {
        input_files: vec!["a.md".to_string()],
        output_file: Some("out.md".to_string()),
        ..ConfigOverrides::default()
    };

    let (config, warnings) =
        load_layered(&dir.path().join("wampa.json"), false, &overrides).unwrap();

    assert_eq!(config.input_files, vec!["a.md".to_string()]);
    assert_eq!(config.output_file, "out.md");
    assert!(warnings.is_empty());
}

#[test]
fn test_load_layered_missing_required_file_fails() {
    let dir = tempdir().unwrap();
    let err = load_layered(
        &dir.path().join("custom.json"),
        true,
        &ConfigOverrides::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("custom.json"));
}

#[test]
fn test_load_layered_missing_file_without_cli_fails_validation() {
    let dir = tempdir().unwrap();
    let err = load_layered(
        &dir.path().join("wampa.json"),
        false,
        &ConfigOverrides::default(),
    )
    .unwrap_err();
    assert!(matches!(err, WampaError::InvalidConfig(_)));
}

#[test]
fn test_load_layered_file_with_cli_override() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wampa.json");
    fs::write(
        &path,
        r#"{ "input_files": ["a.md", "b.md"], "output_file": "out.md", "colour": true }"#,
    )
    .unwrap();
    let overrides = ConfigOverrides {
        output_file: Some("cli.md".to_string()),
        ..ConfigOverrides::default()
    };

    let (config, warnings) = load_layered(&path, true, &overrides).unwrap();

    assert_eq!(config.input_files.len(), 2);
    assert_eq!(config.output_file, "cli.md");
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "colour");
}

#[test]
fn test_load_layered_malformed_file_fails_even_with_cli() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wampa.json");
    fs::write(&path, "{ broken").unwrap();
    let overrides = ConfigOverrides {
        input_files: vec!["a.md".to_string()],
        output_file: Some("out.md".to_string()),
        ..ConfigOverrides::default()
    };

    let err = load_layered(&path, false, &overrides).unwrap_err();
    assert!(matches!(err, WampaError::ConfigParse { .. }));
}
