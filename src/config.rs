use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub search: SearchSettings,
    pub output: OutputSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_marker")]
    pub marker: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Pause after every lookup
    #[serde(default = "default_throttle_ms")]
    pub throttle_ms: u64,
}

impl SearchSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            user_agent: default_user_agent(),
            marker: default_marker(),
            timeout_secs: default_timeout_secs(),
            throttle_ms: default_throttle_ms(),
        }
    }
}

fn default_endpoint() -> String { "https://www.legacy.com/obituaries/search".to_string() }
fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/91.0.4472.114 Safari/537.36"
        .to_string()
}
fn default_marker() -> String { crate::core::DEFAULT_MARKER.to_string() }
fn default_timeout_secs() -> u64 { 10 }
fn default_throttle_ms() -> u64 { 1000 }

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self { path: default_output_path() }
    }
}

fn default_output_path() -> PathBuf { PathBuf::from("output.csv") }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with OBIT)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., OBIT__SEARCH__THROTTLE_MS -> search.throttle_ms
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("OBIT")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_search_settings() {
        let search = SearchSettings::default();
        assert_eq!(search.endpoint, "https://www.legacy.com/obituaries/search");
        assert_eq!(search.marker, "obituaryList");
        assert_eq!(search.timeout(), Duration::from_secs(10));
        assert_eq!(search.throttle(), Duration::from_secs(1));
        assert!(search.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_default_output_and_logging() {
        let settings = Settings::default();
        assert_eq!(settings.output.path, PathBuf::from("output.csv"));
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.logging.format, "compact");
    }

    #[test]
    fn test_load_from_partial_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[search]\nthrottle_ms = 0\n\n[output]\npath = \"matches.csv\"").unwrap();

        let settings = Settings::load_from(file.path()).unwrap();

        assert_eq!(settings.search.throttle_ms, 0);
        assert_eq!(settings.search.timeout_secs, 10);
        assert_eq!(settings.output.path, PathBuf::from("matches.csv"));
        assert_eq!(settings.logging.level, "info");
    }
}
