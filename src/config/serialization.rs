//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Render the config as a commented TOML file
    pub fn to_toml(&self) -> String {
        format!(
            r#"# wendor-kiosk configuration

# Catalog source: a JSON file path or an http(s) URL
# (WENDOR_CATALOG env var overrides)
catalog = "{catalog}"

# Milliseconds of inactivity before the "Touch to Start" screensaver
# (WENDOR_IDLE_MS env var overrides)
idle_threshold_ms = {idle_ms}

# Currency symbol shown before prices
currency = "{currency}"

# Theme: Wendor Light, Wendor Dark (WENDOR_THEME env var overrides)
theme = "{theme}"

# Simulated payment and vend delays
[checkout]
payment_delay_ms = {payment_ms}
vend_unlock_delay_ms = {unlock_ms}
vend_delay_ms = {vend_ms}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# JSON file logging (in addition to the in-app log panel)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            catalog = escape(&self.catalog),
            idle_ms = self.idle_threshold.as_millis(),
            currency = escape(&self.currency),
            theme = escape(&self.theme),
            payment_ms = self.checkout.payment.as_millis(),
            unlock_ms = self.checkout.vend_unlock.as_millis(),
            vend_ms = self.checkout.vend.as_millis(),
            log_level = escape(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = escape(&self.logging.file_dir.display().to_string()),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = escape(&self.logging.file_prefix),
        )
    }

    /// Save current configuration to file
    pub fn save(&self) -> Result<(), std::io::Error> {
        let Some(path) = Self::config_path() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config path",
            ));
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, self.to_toml())
    }
}

/// Escape a value for a TOML basic string
fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
