//! Configuration file management for workout.
//!
//! Provides a TOML-based config file at `~/.config/workout/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use workout_api::ApiConfig;

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub api: ApiSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ApiSection {
    /// Base URL of the REST service, including the `/api` prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Use the in-process mock backend instead of the network.
    #[serde(default)]
    pub mock: bool,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the workout config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/workout` or `~/.config/workout`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("workout");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("workout")
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Where the signed-in user's token is kept.
pub fn credentials_path() -> PathBuf {
    config_dir().join("credentials.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

pub fn save_config(config: &ConfigFile) -> Result<()> {
    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    write_private(&config_path(), &contents)
}

/// Write `contents` to `path`, creating parent dirs as needed.
/// Sets file permissions to 0600 on Unix.
pub fn write_private(path: &Path, contents: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
    }
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, perms)
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct WorkoutConfig {
    pub api_config: ApiConfig,
    pub mock: bool,
}

impl WorkoutConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - API URL: `cli_api_url` > `WORKOUT_API_URL` env > `api.url` > `ApiConfig::DEFAULT_URL`
    /// - Mock mode: `--mock` > `api.mock` > off
    pub fn resolve(cli_api_url: Option<&str>, cli_mock: bool) -> Self {
        let file_config = load_config().ok();

        let url = if let Some(url) = cli_api_url {
            url.to_string()
        } else if let Ok(url) = std::env::var(ApiConfig::ENV_VAR) {
            url
        } else if let Some(url) = file_config.as_ref().and_then(|c| c.api.url.clone()) {
            url
        } else {
            ApiConfig::DEFAULT_URL.to_string()
        };

        let mock = cli_mock || file_config.as_ref().is_some_and(|c| c.api.mock);

        Self {
            api_config: ApiConfig::new(url),
            mock,
        }
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        crate::test_util::lock_env()
    }

    /// Point XDG_CONFIG_HOME at `dir` for the duration of `f`.
    fn with_config_home<T>(dir: &Path, f: impl FnOnce() -> T) -> T {
        let orig = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe { std::env::set_var("XDG_CONFIG_HOME", dir) };
        let out = f();
        match orig {
            Some(x) => unsafe { std::env::set_var("XDG_CONFIG_HOME", x) },
            None => unsafe { std::env::remove_var("XDG_CONFIG_HOME") },
        }
        out
    }

    #[test]
    fn save_and_load_config_roundtrip() {
        let _lock = lock_env();
        let tmp = tempfile::TempDir::new().unwrap();

        let loaded = with_config_home(tmp.path(), || {
            let original = ConfigFile {
                api: ApiSection {
                    url: Some("http://testhost:9000/api".to_string()),
                    mock: true,
                },
            };
            save_config(&original).unwrap();
            load_config().unwrap()
        });

        assert_eq!(loaded.api.url.as_deref(), Some("http://testhost:9000/api"));
        assert!(loaded.api.mock);
        assert!(tmp.path().join("workout/config.toml").exists());
    }

    #[cfg(unix)]
    #[test]
    fn write_private_sets_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::TempDir::new().unwrap();
        let file = tmp.path().join("nested").join("secret.toml");
        write_private(&file, "token = \"x\"").unwrap();

        let meta = std::fs::metadata(&file).unwrap();
        assert_eq!(meta.permissions().mode() & 0o777, 0o600);
    }

    #[test]
    fn missing_sections_default() {
        let cfg: ConfigFile = toml::from_str("").unwrap();
        assert_eq!(cfg.api.url, None);
        assert!(!cfg.api.mock);
    }

    #[test]
    fn resolve_with_cli_flag_overrides_all() {
        let _lock = lock_env();

        unsafe { std::env::set_var(ApiConfig::ENV_VAR, "http://env:1/api") };
        let config = WorkoutConfig::resolve(Some("http://cli:2/api/"), false);
        unsafe { std::env::remove_var(ApiConfig::ENV_VAR) };

        assert_eq!(config.api_config.base_url, "http://cli:2/api");
    }

    #[test]
    fn resolve_with_env_var_overrides_config_file() {
        let _lock = lock_env();
        let tmp = tempfile::TempDir::new().unwrap();

        let config = with_config_home(tmp.path(), || {
            save_config(&ConfigFile {
                api: ApiSection {
                    url: Some("http://file:3/api".to_string()),
                    mock: false,
                },
            })
            .unwrap();
            unsafe { std::env::set_var(ApiConfig::ENV_VAR, "http://env:1/api") };
            let config = WorkoutConfig::resolve(None, false);
            unsafe { std::env::remove_var(ApiConfig::ENV_VAR) };
            config
        });

        assert_eq!(config.api_config.base_url, "http://env:1/api");
    }

    #[test]
    fn resolve_reads_config_file() {
        let _lock = lock_env();
        let tmp = tempfile::TempDir::new().unwrap();
        unsafe { std::env::remove_var(ApiConfig::ENV_VAR) };

        let config = with_config_home(tmp.path(), || {
            save_config(&ConfigFile {
                api: ApiSection {
                    url: Some("http://file:3/api".to_string()),
                    mock: true,
                },
            })
            .unwrap();
            WorkoutConfig::resolve(None, false)
        });

        assert_eq!(config.api_config.base_url, "http://file:3/api");
        assert!(config.mock);
    }

    #[test]
    fn resolve_defaults_when_nothing_set() {
        let _lock = lock_env();
        let tmp = tempfile::TempDir::new().unwrap();
        unsafe { std::env::remove_var(ApiConfig::ENV_VAR) };

        let config = with_config_home(tmp.path(), || WorkoutConfig::resolve(None, false));

        assert_eq!(config.api_config.base_url, ApiConfig::DEFAULT_URL);
        assert!(!config.mock);
    }

    #[test]
    fn config_path_ends_with_expected_filename() {
        let path = config_path();
        assert!(
            path.ends_with("workout/config.toml"),
            "unexpected config path: {}",
            path.display()
        );
    }
}
