//! Configuration management for uaforge.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Google VersionHistory API listing stable Chrome releases for win64.
pub const DEFAULT_CHROME_RELEASES_URL: &str =
    "https://versionhistory.googleapis.com/v1/chrome/platforms/win64/channels/stable/versions/all/releases";

/// Microsoft package pool index for stable Edge `.deb` builds.
pub const DEFAULT_EDGE_REPO_URL: &str =
    "https://packages.microsoft.com/repos/edge/pool/main/m/microsoft-edge-stable";

/// File name of the version cache when no explicit path is configured.
pub const DEFAULT_CACHE_FILE_NAME: &str = "uaforge_versions.json";

/// Main uaforge configuration.
///
/// This is loaded from `~/.config/uaforge/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ForgeConfig {
    /// Disk cache settings
    pub cache: CacheConfig,
    /// Remote version source settings
    pub sources: SourcesConfig,
}

impl ForgeConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, falling back to defaults if
    /// the file does not exist.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            let contents = fs::read_to_string(path)?;
            let config: Self = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `UAFORGE_CACHE_ENABLED`: Enable or disable the disk cache (true/false)
    /// - `UAFORGE_CACHE_PATH`: Override the cache file location
    /// - `UAFORGE_CACHE_TTL_SECS`: Override the cache lifetime
    /// - `UAFORGE_TIMEOUT_SECS`: Override the shared network deadline
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup. Unparsable values are ignored.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("UAFORGE_CACHE_ENABLED") {
            if let Ok(enabled) = val.parse() {
                self.cache.enabled = enabled;
                tracing::debug!("Override cache.enabled from env: {}", enabled);
            }
        }

        if let Some(val) = lookup("UAFORGE_CACHE_PATH") {
            if !val.is_empty() {
                tracing::debug!("Override cache.path from env: {}", val);
                self.cache.path = Some(PathBuf::from(val));
            }
        }

        if let Some(val) = lookup("UAFORGE_CACHE_TTL_SECS") {
            if let Ok(secs) = val.parse() {
                self.cache.ttl_secs = secs;
                tracing::debug!("Override cache.ttl_secs from env: {}", secs);
            }
        }

        if let Some(val) = lookup("UAFORGE_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                self.sources.timeout_secs = secs;
                tracing::debug!("Override sources.timeout_secs from env: {}", secs);
            }
        }
    }

    /// Check values that would make the generator misbehave.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.sources.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sources.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.sources.chrome_keep == 0 || self.sources.edge_keep == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sources.chrome_keep/edge_keep".to_string(),
                reason: "must keep at least one version".to_string(),
            });
        }
        Ok(())
    }

    /// Save configuration to an explicit path.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let config_dir = path.parent().ok_or_else(|| ConfigError::InvalidValue {
            field: "config_path".to_string(),
            reason: "no parent directory".to_string(),
        })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/uaforge/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("dev", "uaforge", "uaforge").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Disk cache settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether versions are persisted between runs
    pub enabled: bool,
    /// Cache file location (defaults to the system temp directory)
    pub path: Option<PathBuf>,
    /// How long a cached version set stays valid, in seconds
    pub ttl_secs: u64,
}

impl CacheConfig {
    /// The configured cache path, or the default file in the system temp dir.
    #[must_use]
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_CACHE_FILE_NAME))
    }

    /// Cache lifetime as a `Duration`.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: None,
            ttl_secs: 3600,
        }
    }
}

/// Remote version source settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourcesConfig {
    /// JSON releases endpoint for Chrome
    pub chrome_releases_url: String,
    /// HTML directory listing of Edge packages
    pub edge_repo_url: String,
    /// Number of Chrome releases to keep
    pub chrome_keep: usize,
    /// Number of Edge releases to keep
    pub edge_keep: usize,
    /// Deadline for the whole acquisition, in seconds
    pub timeout_secs: u64,
}

impl SourcesConfig {
    /// Shared acquisition deadline as a `Duration`.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            chrome_releases_url: DEFAULT_CHROME_RELEASES_URL.to_string(),
            edge_repo_url: DEFAULT_EDGE_REPO_URL.to_string(),
            chrome_keep: 45,
            edge_keep: 20,
            timeout_secs: 15,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ForgeConfig::default();
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.ttl_secs, 3600);
        assert_eq!(config.sources.chrome_keep, 45);
        assert_eq!(config.sources.edge_keep, 20);
        assert_eq!(config.sources.timeout(), Duration::from_secs(15));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_cache_path_in_temp_dir() {
        let config = CacheConfig::default();
        let path = config.resolved_path();
        assert!(path.starts_with(std::env::temp_dir()));
        assert!(path.ends_with(DEFAULT_CACHE_FILE_NAME));
    }

    #[test]
    fn test_config_save_load() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("nested").join("config.toml");

        let mut config = ForgeConfig::default();
        config.cache.enabled = true;
        config.cache.path = Some(tmp.path().join("versions.json"));
        config.sources.timeout_secs = 5;

        config.save_to(&config_path).expect("save config");
        let loaded = ForgeConfig::load_from(&config_path).expect("load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let tmp = TempDir::new().expect("create temp dir");
        let loaded = ForgeConfig::load_from(&tmp.path().join("absent.toml")).expect("load");
        assert_eq!(loaded, ForgeConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[cache]
enabled = true
ttl_secs = 60
"#;

        let config: ForgeConfig = toml::from_str(toml_str).expect("parse partial config");
        assert!(config.cache.enabled);
        assert_eq!(config.cache.ttl_secs, 60);
        // These should be defaults
        assert_eq!(config.sources.edge_repo_url, DEFAULT_EDGE_REPO_URL);
        assert_eq!(config.sources.chrome_keep, 45);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[sources]\ntimeout_secs = 0\n").expect("write config");

        let err = ForgeConfig::load_from(&path).expect_err("zero timeout must be rejected");
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("UAFORGE_CACHE_ENABLED", "true"),
            ("UAFORGE_CACHE_PATH", "/var/tmp/ua.json"),
            ("UAFORGE_CACHE_TTL_SECS", "120"),
            ("UAFORGE_TIMEOUT_SECS", "not-a-number"),
        ]);

        let mut config = ForgeConfig::default();
        config.apply_env_overrides(|key| env.get(key).map(|v| (*v).to_string()));

        assert!(config.cache.enabled);
        assert_eq!(config.cache.path, Some(PathBuf::from("/var/tmp/ua.json")));
        assert_eq!(config.cache.ttl(), Duration::from_secs(120));
        // Unparsable values leave the default in place
        assert_eq!(config.sources.timeout_secs, 15);
    }
}
