//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use at_core::TickConfig;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,
    /// Default roster file for `employees sync`.
    pub roster_path: Option<PathBuf>,
    /// Seconds between network scans.
    pub scan_interval_secs: i64,
    /// Hour of the forced end-of-day cutoff (local time).
    pub cutoff_hour: u32,
    /// Minute of the forced end-of-day cutoff.
    pub cutoff_minute: u32,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("attendance.db"),
            roster_path: None,
            scan_interval_secs: i64::try_from(TickConfig::DEFAULT_SCAN_INTERVAL_SECS)
                .unwrap_or(60),
            cutoff_hour: TickConfig::DEFAULT_CUTOFF_HOUR,
            cutoff_minute: TickConfig::DEFAULT_CUTOFF_MINUTE,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (ATT_*)
        figment = figment.merge(Env::prefixed("ATT_"));

        figment.extract()
    }

    /// Tick settings with out-of-range values replaced by defaults.
    #[must_use]
    pub fn tick_config(&self) -> TickConfig {
        TickConfig::sanitized(self.scan_interval_secs, self.cutoff_hour, self.cutoff_minute)
    }
}

/// Returns the platform-specific config directory for att.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("att"))
}

/// Returns the platform-specific data directory for att.
///
/// On Linux: `~/.local/share/att`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("att"))
}
