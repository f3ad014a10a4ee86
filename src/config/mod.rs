//! Configuration management for `resident_desk`.
//!
//! Configuration is layered, later layers winning:
//! - Built-in defaults
//! - User config (`$XDG_CONFIG_HOME/resident-desk/config.yaml`)
//! - Workspace config (`.desk/config.yaml`)
//! - Environment variable overrides (`DESK_*`)
//! - Command-line flags

use std::fs;
use std::path::{Path, PathBuf};

use desk_lib::session::DEFAULT_USER_KEY;
use desk_lib::store::DEFAULT_ISSUES_KEY;
use desk_lib::{DateFormat, DeskError, FileStorage, IssueStore, Portal, SessionGate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Workspace directory holding config and data.
pub const WORKSPACE_DIR: &str = ".desk";

/// Failures while assembling configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("invalid value for {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("utc_offset_minutes out of range: {0}")]
    InvalidOffset(i32),
}

impl From<ConfigError> for DeskError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

/// One config layer as written in YAML. Absent keys leave the lower layer alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigLayer {
    pub data_dir: Option<PathBuf>,
    pub issues_key: Option<String>,
    pub user_key: Option<String>,
    pub require_login: Option<bool>,
    pub utc_offset_minutes: Option<i32>,
}

impl ConfigLayer {
    /// Read a layer from `path`; a missing file is an empty layer.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        debug!(path = %path.display(), "loaded config layer");
        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Build a layer from `DESK_*` variables, read through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEnv` for unparsable booleans or numbers.
    pub fn from_env<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require_login = match lookup("DESK_REQUIRE_LOGIN") {
            Some(value) => Some(parse_bool(&value).ok_or(ConfigError::InvalidEnv {
                name: "DESK_REQUIRE_LOGIN",
                value,
            })?),
            None => None,
        };
        let utc_offset_minutes = match lookup("DESK_UTC_OFFSET_MINUTES") {
            Some(value) => Some(value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: "DESK_UTC_OFFSET_MINUTES",
                value,
            })?),
            None => None,
        };

        Ok(Self {
            data_dir: lookup("DESK_DATA_DIR").map(PathBuf::from),
            issues_key: lookup("DESK_ISSUES_KEY"),
            user_key: lookup("DESK_USER_KEY"),
            require_login,
            utc_offset_minutes,
        })
    }

    /// Overlay `other` on top of `self`.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            data_dir: other.data_dir.or(self.data_dir),
            issues_key: other.issues_key.or(self.issues_key),
            user_key: other.user_key.or(self.user_key),
            require_login: other.require_login.or(self.require_login),
            utc_offset_minutes: other.utc_offset_minutes.or(self.utc_offset_minutes),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Flags that override every file and environment layer.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub data_dir: Option<PathBuf>,
}

/// Effective configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Storage scope directory.
    pub data_dir: PathBuf,
    pub issues_key: String,
    pub user_key: String,
    /// Hide the board until someone logs in.
    pub require_login: bool,
    /// Offset used to print dates; the machine's offset when unset.
    pub utc_offset_minutes: Option<i32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: Path::new(WORKSPACE_DIR).join("data"),
            issues_key: DEFAULT_ISSUES_KEY.to_string(),
            user_key: DEFAULT_USER_KEY.to_string(),
            require_login: false,
            utc_offset_minutes: None,
        }
    }
}

impl Config {
    /// Resolve a merged layer against the defaults.
    #[must_use]
    pub fn from_layer(layer: ConfigLayer) -> Self {
        let defaults = Self::default();
        Self {
            data_dir: layer.data_dir.unwrap_or(defaults.data_dir),
            issues_key: layer.issues_key.unwrap_or(defaults.issues_key),
            user_key: layer.user_key.unwrap_or(defaults.user_key),
            require_login: layer.require_login.unwrap_or(defaults.require_login),
            utc_offset_minutes: layer.utc_offset_minutes,
        }
    }

    /// Date formatter for the configured offset.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOffset` if the offset is outside ±24h.
    pub fn date_format(&self) -> Result<DateFormat, ConfigError> {
        match self.utc_offset_minutes {
            Some(minutes) => {
                DateFormat::with_offset_minutes(minutes).ok_or(ConfigError::InvalidOffset(minutes))
            }
            None => Ok(DateFormat::local()),
        }
    }
}

/// User config path, honoring `XDG_CONFIG_HOME`.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    Some(base.join("resident-desk").join("config.yaml"))
}

#[must_use]
pub fn workspace_config_path() -> PathBuf {
    Path::new(WORKSPACE_DIR).join("config.yaml")
}

/// Load the effective configuration.
///
/// # Errors
///
/// Returns `Config` if a config file or environment variable is invalid.
pub fn load(cli: &CliOverrides) -> desk_lib::Result<Config> {
    let mut layer = ConfigLayer::default();
    if let Some(path) = user_config_path() {
        layer = layer.merge(ConfigLayer::from_file(&path)?);
    }
    layer = layer.merge(ConfigLayer::from_file(&workspace_config_path())?);
    layer = layer.merge(ConfigLayer::from_env(|name| std::env::var(name).ok())?);
    layer = layer.merge(ConfigLayer {
        data_dir: cli.data_dir.clone(),
        ..ConfigLayer::default()
    });

    let config = Config::from_layer(layer);
    debug!(
        data_dir = %dunce::simplified(&config.data_dir).display(),
        require_login = config.require_login,
        "resolved config"
    );
    Ok(config)
}

/// Open the portal described by `config` over file storage.
///
/// # Errors
///
/// Returns `Config` if the date offset is invalid.
pub fn open_portal(config: &Config) -> desk_lib::Result<Portal<FileStorage>> {
    let storage = FileStorage::new(&config.data_dir);
    let dates = config.date_format()?;
    let store = IssueStore::open(storage.clone(), config.issues_key.clone());
    let gate = config
        .require_login
        .then(|| SessionGate::new(storage, config.user_key.clone()));
    Ok(Portal::new(store, gate, dates))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_layer(ConfigLayer::default());
        assert_eq!(config.data_dir, PathBuf::from(".desk/data"));
        assert_eq!(config.issues_key, "oxy-beaumonde-issues");
        assert_eq!(config.user_key, "oxy-beaumonde-user");
        assert!(!config.require_login);
        assert_eq!(config.utc_offset_minutes, None);
    }

    #[test]
    fn test_merge_prefers_upper_layer() {
        let lower = ConfigLayer {
            data_dir: Some(PathBuf::from("/lower")),
            require_login: Some(true),
            ..Default::default()
        };
        let upper = ConfigLayer {
            data_dir: Some(PathBuf::from("/upper")),
            ..Default::default()
        };
        let merged = lower.merge(upper);
        assert_eq!(merged.data_dir, Some(PathBuf::from("/upper")));
        assert_eq!(merged.require_login, Some(true));
    }

    #[test]
    fn test_from_file_yaml() {
        crate::logging::init_test_logging();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "data_dir: /srv/desk\nrequire_login: true\nutc_offset_minutes: 330\n",
        )
        .unwrap();

        let layer = ConfigLayer::from_file(&path).unwrap();
        assert_eq!(layer.data_dir, Some(PathBuf::from("/srv/desk")));
        assert_eq!(layer.require_login, Some(true));
        assert_eq!(layer.utc_offset_minutes, Some(330));
    }

    #[test]
    fn test_from_file_missing_or_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            ConfigLayer::from_file(&dir.path().join("absent.yaml")).unwrap(),
            ConfigLayer::default()
        );
        let path = dir.path().join("empty.yaml");
        fs::write(&path, "\n").unwrap();
        assert_eq!(ConfigLayer::from_file(&path).unwrap(), ConfigLayer::default());
    }

    #[test]
    fn test_from_file_rejects_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "prefix: bd\n").unwrap();
        assert!(matches!(
            ConfigLayer::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_from_env() {
        let layer = ConfigLayer::from_env(env(&[
            ("DESK_DATA_DIR", "/tmp/desk"),
            ("DESK_REQUIRE_LOGIN", "yes"),
            ("DESK_UTC_OFFSET_MINUTES", "-300"),
            ("DESK_ISSUES_KEY", "tower-b-issues"),
        ]))
        .unwrap();
        assert_eq!(layer.data_dir, Some(PathBuf::from("/tmp/desk")));
        assert_eq!(layer.require_login, Some(true));
        assert_eq!(layer.utc_offset_minutes, Some(-300));
        assert_eq!(layer.issues_key.as_deref(), Some("tower-b-issues"));
        assert_eq!(layer.user_key, None);
    }

    #[test]
    fn test_from_env_invalid_values() {
        assert!(matches!(
            ConfigLayer::from_env(env(&[("DESK_REQUIRE_LOGIN", "maybe")])),
            Err(ConfigError::InvalidEnv { name: "DESK_REQUIRE_LOGIN", .. })
        ));
        assert!(matches!(
            ConfigLayer::from_env(env(&[("DESK_UTC_OFFSET_MINUTES", "ist")])),
            Err(ConfigError::InvalidEnv { .. })
        ));
    }

    #[test]
    fn test_date_format_offset_validation() {
        let mut config = Config::default();
        config.utc_offset_minutes = Some(330);
        assert!(config.date_format().is_ok());
        config.utc_offset_minutes = Some(5000);
        assert!(matches!(
            config.date_format(),
            Err(ConfigError::InvalidOffset(5000))
        ));
    }

    #[test]
    fn test_open_portal_gated_by_config() {
        crate::logging::init_test_logging();
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config {
            data_dir: dir.path().to_path_buf(),
            utc_offset_minutes: Some(0),
            ..Config::default()
        };
        assert!(!open_portal(&config).unwrap().is_gated());
        config.require_login = true;
        assert!(open_portal(&config).unwrap().is_gated());
    }
}
