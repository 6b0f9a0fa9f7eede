//! Site configuration: optional JSON file plus environment overrides.
//!
//! # Invariants
//! - A missing config file is not an error; defaults apply.
//! - Environment values win over file values.
//! - Blank environment values are ignored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const ENV_ACCESS_KEY: &str = "MEDPORTAL_ACCESS_KEY";
pub const ENV_ACCESS_KEY_ALT: &str = "MEDPORTAL_ACCESS_KEY_ALT";
pub const ENV_DASHBOARD_ENABLED: &str = "MEDPORTAL_DASHBOARD_ENABLED";
pub const ENV_DB_PATH: &str = "MEDPORTAL_DB_PATH";

const DEFAULT_DB_FILE: &str = "medportal.sqlite3";

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    InvalidValue { name: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse config `{}`: {source}", path.display())
            }
            Self::InvalidValue { name, value } => {
                write!(f, "invalid value `{value}` for `{name}`")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::InvalidValue { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginConfig {
    #[serde(default)]
    pub primary_secret: Option<String>,
    #[serde(default)]
    pub secondary_secret: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Off by default: the dashboard container renders hidden.
    #[serde(default)]
    pub render_enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub login: LoginConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    /// SQLite file backing local/session storage.
    #[serde(default)]
    pub storage_path: Option<PathBuf>,
    #[serde(default)]
    pub log_level: Option<String>,
    /// Per-committee slot counts replacing the built-in table.
    #[serde(default)]
    pub committee_slots: BTreeMap<String, u32>,
}

impl SiteConfig {
    /// Reads `path` when given and present, then applies process env.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) if path.exists() => Self::from_file(path)?,
            _ => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies overrides from `lookup` (usually `std::env::var`).
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(value) = read(ENV_ACCESS_KEY) {
            self.login.primary_secret = Some(value);
        }
        if let Some(value) = read(ENV_ACCESS_KEY_ALT) {
            self.login.secondary_secret = Some(value);
        }
        if let Some(value) = read(ENV_DASHBOARD_ENABLED) {
            self.dashboard.render_enabled = parse_flag(ENV_DASHBOARD_ENABLED, &value)?;
        }
        if let Some(value) = read(ENV_DB_PATH) {
            self.storage_path = Some(PathBuf::from(value.trim()));
        }
        Ok(())
    }

    pub fn storage_path_or_default(&self) -> PathBuf {
        self.storage_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE))
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, SiteConfig, ENV_ACCESS_KEY, ENV_DASHBOARD_ENABLED};

    #[test]
    fn env_overrides_file_values_and_ignores_blank() {
        let mut config: SiteConfig = serde_json::from_str(
            r#"{"login": {"primary_secret": "archivo", "secondary_secret": "otro"}}"#,
        )
        .unwrap();
        config
            .apply_env(|name| match name {
                ENV_ACCESS_KEY => Some("entorno".to_string()),
                "MEDPORTAL_ACCESS_KEY_ALT" => Some("  ".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.login.primary_secret.as_deref(), Some("entorno"));
        assert_eq!(config.login.secondary_secret.as_deref(), Some("otro"));
    }

    #[test]
    fn dashboard_flag_rejects_garbage() {
        let mut config = SiteConfig::default();
        let err = config
            .apply_env(|name| (name == ENV_DASHBOARD_ENABLED).then(|| "quizas".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn empty_json_uses_defaults() {
        let config: SiteConfig = serde_json::from_str("{}").unwrap();
        assert!(!config.dashboard.render_enabled);
        assert!(config.committee_slots.is_empty());
    }
}
