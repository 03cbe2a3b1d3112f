//! Application settings and paths.
//!
//! Settings live in `settings.json` under the XDG configuration directory
//! (for example `~/.config/portsweep/settings.json`). Every field is
//! optional in the file; missing fields take their defaults.

use crate::error::{ConfigError, ConfigResult};
use crate::scanner::{ScanConfig, DEFAULT_CONCURRENCY, DEFAULT_MAX_ADDRESSES, DEFAULT_TIMEOUT};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Application directory paths following the XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/portsweep)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Resolve the platform directories.
    pub fn discover() -> ConfigResult<Self> {
        let project = ProjectDirs::from("com", "portsweep", "portsweep")
            .ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Persistent defaults for scans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Default number of simultaneous probes.
    pub default_concurrency: usize,
    /// Default per-probe timeout in seconds.
    pub default_timeout_secs: u64,
    /// Largest number of addresses one request may expand to.
    pub max_addresses_per_target: u64,
    /// Show a progress bar while scanning.
    pub show_progress: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_concurrency: DEFAULT_CONCURRENCY,
            default_timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            max_addresses_per_target: DEFAULT_MAX_ADDRESSES,
            show_progress: false,
        }
    }
}

impl AppSettings {
    /// Load settings from the default location, or defaults if none exist.
    pub fn load() -> ConfigResult<Self> {
        let file = Paths::discover()?.settings_file();

        if !file.exists() {
            debug!(path = %file.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let settings: Self =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        settings.validate()?;

        debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.default_concurrency == 0 {
            return Err(ConfigError::InvalidValue(
                "default_concurrency must be at least 1".to_string(),
            ));
        }
        if self.default_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "default_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.max_addresses_per_target == 0 {
            return Err(ConfigError::InvalidValue(
                "max_addresses_per_target must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Scan configuration built from these defaults.
    pub fn scan_config(&self) -> ScanConfig {
        let config = ScanConfig::new()
            .with_concurrency(self.default_concurrency)
            .with_timeout(Duration::from_secs(self.default_timeout_secs));

        if self.show_progress {
            config.with_progress()
        } else {
            config
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.default_concurrency, 5);
        assert_eq!(settings.default_timeout_secs, 10);
        assert_eq!(settings.max_addresses_per_target, 65536);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_serialization() {
        let settings = AppSettings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let parsed: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"default_concurrency": 32}}"#).unwrap();

        let settings = AppSettings::load_from(file.path()).unwrap();
        assert_eq!(settings.default_concurrency, 32);
        assert_eq!(settings.default_timeout_secs, 10);

        let config = settings.scan_config();
        assert_eq!(config.concurrency, 32);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"default_timeout_secs": 0}}"#).unwrap();
        assert!(matches!(
            AppSettings::load_from(file.path()),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_malformed_file_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            AppSettings::load_from(file.path()),
            Err(ConfigError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        assert!(matches!(
            AppSettings::load_from(Path::new("/nonexistent/settings.json")),
            Err(ConfigError::ReadFailed { .. })
        ));
    }
}
