//! Configuration tests
//!
//! The template written on first run must parse back into the same values,
//! and every key in it must be one the loader actually reads.

use super::*;
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn parse(toml_str: &str) -> FileConfig {
    toml::from_str(toml_str).expect("valid config")
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let merged = Config::merge(parsed.unwrap(), no_env);
    assert_eq!(merged.catalog, config.catalog);
    assert_eq!(merged.idle_threshold, config.idle_threshold);
    assert_eq!(merged.currency, config.currency);
    assert_eq!(merged.theme, config.theme);
    assert_eq!(merged.checkout, config.checkout);
    assert_eq!(merged.logging.level, config.logging.level);
    assert_eq!(merged.logging.file_rotation, config.logging.file_rotation);
}

#[test]
fn test_config_roundtrip_custom_values() {
    let mut config = Config::default();
    config.catalog = r#"C:\kiosk\"main" catalog.json"#.to_string();
    config.idle_threshold = Duration::from_millis(45_000);
    config.checkout.vend = Duration::from_millis(10);
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Never;

    let merged = Config::merge(parse(&config.to_toml()), no_env);
    assert_eq!(merged.catalog, config.catalog);
    assert_eq!(merged.idle_threshold, Duration::from_millis(45_000));
    assert_eq!(merged.checkout.vend, Duration::from_millis(10));
    assert!(merged.logging.file_enabled);
    assert_eq!(merged.logging.file_rotation, LogRotation::Never);
}

// ─────────────────────────────────────────────────────────────────────────────
// Merge precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_file_uses_defaults() {
    let config = Config::merge(FileConfig::default(), no_env);
    assert_eq!(config.catalog, "./data.json");
    assert_eq!(config.idle_threshold, Duration::from_millis(20_000));
    assert_eq!(config.theme, "Wendor Light");
    assert_eq!(config.checkout, CheckoutTiming::default());
}

#[test]
fn test_env_overrides_file() {
    let file = parse(
        r#"
catalog = "/srv/catalog.json"
idle_threshold_ms = 5000
theme = "Wendor Dark"
"#,
    );
    let env: HashMap<&str, &str> = [
        ("WENDOR_CATALOG", "https://example.test/products"),
        ("WENDOR_IDLE_MS", "60000"),
    ]
    .into_iter()
    .collect();

    let config = Config::merge(file, |key| env.get(key).map(|v| v.to_string()));
    assert_eq!(config.catalog, "https://example.test/products");
    assert_eq!(config.idle_threshold, Duration::from_millis(60_000));
    // Not overridden
    assert_eq!(config.theme, "Wendor Dark");
}

#[test]
fn test_unparseable_idle_env_falls_back_to_file() {
    let file = parse("idle_threshold_ms = 7000");
    let config = Config::merge(file, |key| {
        (key == "WENDOR_IDLE_MS").then(|| "soon".to_string())
    });
    assert_eq!(config.idle_threshold, Duration::from_millis(7_000));
}

#[test]
fn test_partial_checkout_section() {
    let file = parse(
        r#"
[checkout]
vend_delay_ms = 100
"#,
    );
    let config = Config::merge(file, no_env);
    assert_eq!(config.checkout.vend, Duration::from_millis(100));
    assert_eq!(config.checkout.payment, Duration::from_millis(2500));
    assert_eq!(config.checkout.vend_unlock, Duration::from_millis(1500));
}

#[test]
fn test_log_rotation_parse() {
    assert_eq!(LogRotation::parse("HOURLY"), LogRotation::Hourly);
    assert_eq!(LogRotation::parse("never"), LogRotation::Never);
    assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
}

// ─────────────────────────────────────────────────────────────────────────────
// File reading
// ─────────────────────────────────────────────────────────────────────────────

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("wendor-config-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_missing_file_is_empty_config() {
    let dir = scratch_dir("missing");
    let file = Config::read_file_config(&dir.join("nope.toml")).unwrap();
    assert!(file.catalog.is_none());
    assert!(file.checkout.is_none());
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = scratch_dir("malformed");
    let path = dir.join("config.toml");
    std::fs::write(&path, "idle_threshold_ms = \"twenty\"\n[checkout\n").unwrap();

    let err = Config::read_file_config(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config file"));
    std::fs::remove_dir_all(&dir).ok();
}
