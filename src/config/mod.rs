//! Configuration for the kiosk
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/wendor-kiosk/config.toml)
//! 3. Built-in defaults (lowest priority)

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::kiosk::CheckoutTiming;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod checkout;
mod logging;
mod serialization;

#[cfg(test)]
mod tests;

use checkout::FileCheckout;
use logging::FileLogging;
pub use logging::{LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Directory name under ~/.config
const APP_DIR: &str = "wendor-kiosk";

/// Idle threshold the kiosk runs with (the screensaver's own default is longer)
pub const KIOSK_IDLE_THRESHOLD_MS: u64 = 20_000;

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Catalog source: a file path or an http(s) URL
    pub catalog: String,

    /// Inactivity before the screensaver overlay appears
    pub idle_threshold: Duration,

    /// Currency symbol shown before prices
    pub currency: String,

    /// Theme name: "Wendor Light" or "Wendor Dark"
    pub theme: String,

    /// Simulated payment and vend delays
    pub checkout: CheckoutTiming,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: "./data.json".to_string(),
            idle_threshold: Duration::from_millis(KIOSK_IDLE_THRESHOLD_MS),
            currency: "₹".to_string(),
            theme: "Wendor Light".to_string(),
            checkout: CheckoutTiming::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure; every key is optional
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub catalog: Option<String>,
    pub idle_threshold_ms: Option<u64>,
    pub currency: Option<String>,
    pub theme: Option<String>,

    /// Optional [checkout] section
    pub checkout: Option<FileCheckout>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/wendor-kiosk/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join(APP_DIR).join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help operators discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Read and parse a config file; a missing file yields an empty config
    ///
    /// A file that exists but cannot be read or parsed is an error. A broken
    /// config should stop the kiosk rather than silently run on defaults.
    pub(crate) fn read_file_config(path: &Path) -> anyhow::Result<FileConfig> {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(e).with_context(|| format!("Cannot read config file {}", path.display())),
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn load() -> anyhow::Result<Self> {
        let file = match Self::config_path() {
            Some(path) => Self::read_file_config(&path)?,
            None => FileConfig::default(),
        };
        Ok(Self::merge(file, |key| std::env::var(key).ok()))
    }

    /// Combine file values with environment overrides
    pub(crate) fn merge(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // Catalog: env > file > default
        let catalog = env("WENDOR_CATALOG")
            .or(file.catalog)
            .unwrap_or(defaults.catalog);

        // Idle threshold: env > file > default; unparseable env values are ignored
        let idle_threshold = env("WENDOR_IDLE_MS")
            .and_then(|v| v.trim().parse().ok())
            .or(file.idle_threshold_ms)
            .map(Duration::from_millis)
            .unwrap_or(defaults.idle_threshold);

        // Theme: env > file > default
        let theme = env("WENDOR_THEME")
            .or(file.theme)
            .unwrap_or(defaults.theme);

        // Currency: file > default
        let currency = file.currency.unwrap_or(defaults.currency);

        let checkout = checkout::timing_from_file(file.checkout);
        let logging = LoggingConfig::from_file(file.logging);

        Self {
            catalog,
            idle_threshold,
            currency,
            theme,
            checkout,
            logging,
        }
    }
}
