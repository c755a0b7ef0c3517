//! Layered application configuration.
//!
//! # Responsibility
//! - Describe database and logging settings with usable defaults.
//! - Merge an optional JSON file, `EMPLOYEE_*` environment variables and
//!   caller overrides through one `config::Config` builder.
//!
//! # Invariants
//! - Precedence is defaults < JSON file < environment < explicit overrides.
//! - Invalid values fail the load, never fall back silently.

use crate::logging::default_log_level;
use ::config::{Config, Environment, File, FileFormat, Map};
use serde::Deserialize;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment prefix; `EMPLOYEE_DATABASE__PATH` maps to `database.path`.
pub const ENV_PREFIX: &str = "EMPLOYEE";
const ENV_SEPARATOR: &str = "__";

pub const KEY_DB_PATH: &str = "database.path";
pub const KEY_LOG_LEVEL: &str = "logging.level";
pub const KEY_LOG_DIR: &str = "logging.directory";

const DEFAULT_DB_PATH: &str = "data/employeedb.sqlite3";
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug)]
pub enum ConfigError {
    /// A source could not be read or an override could not be applied.
    Load(::config::ConfigError),
    /// The merged values do not fit [`AppConfig`].
    Deserialize(::config::ConfigError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load(err) => write!(f, "failed to load config: {err}"),
            Self::Deserialize(err) => write!(f, "invalid config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Load(err) | Self::Deserialize(err) => Some(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database file. Parent directories are created on open.
    pub path: PathBuf,
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DB_PATH),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl DatabaseConfig {
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Absolute directory for rotating log files; stderr when unset.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            directory: None,
        }
    }
}

impl AppConfig {
    /// Loads the optional JSON file, the process environment and `overrides`.
    pub fn load(
        path: Option<&Path>,
        overrides: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        Self::load_with_options(path, None, overrides)
    }

    /// Same as [`AppConfig::load`], reading `EMPLOYEE_*` variables from `env`
    /// instead of the process environment when it is `Some`.
    pub fn load_with_options(
        path: Option<&Path>,
        env: Option<Map<String, String>>,
        overrides: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Json));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .source(env),
        );

        if let Some(overrides) = overrides {
            for (key, value) in overrides {
                builder = builder
                    .set_override(key, value)
                    .map_err(ConfigError::Load)?;
            }
        }

        builder
            .build()
            .map_err(ConfigError::Load)?
            .try_deserialize()
            .map_err(ConfigError::Deserialize)
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, KEY_DB_PATH};
    use std::collections::HashMap;
    use std::io::Write;
    use std::path::PathBuf;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn json_file(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp config");
        file.write_all(body.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn no_sources_yields_defaults() {
        let config = AppConfig::load_with_options(None, Some(map(&[])), None)
            .expect("empty sources should load");

        assert_eq!(config, AppConfig::default());
        assert_eq!(
            config.database.path,
            PathBuf::from("data/employeedb.sqlite3")
        );
        assert_eq!(config.database.busy_timeout_ms, 5_000);
        assert!(config.logging.directory.is_none());
    }

    #[test]
    fn json_file_fills_missing_keys_with_defaults() {
        let file = json_file(r#"{ "database": { "path": "/tmp/custom.db" } }"#);

        let config = AppConfig::load_with_options(Some(file.path()), Some(map(&[])), None)
            .expect("config should parse");
        assert_eq!(config.database.path, PathBuf::from("/tmp/custom.db"));
        assert_eq!(config.database.busy_timeout_ms, 5_000);
        assert_eq!(config.logging, AppConfig::default().logging);
    }

    #[test]
    fn malformed_json_fails_to_load() {
        let file = json_file("{ not json");

        let err = AppConfig::load_with_options(Some(file.path()), Some(map(&[])), None)
            .expect_err("must fail");
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn env_takes_precedence_over_file_values() {
        let file = json_file(r#"{ "database": { "path": "from-file.db", "busy_timeout_ms": 10 } }"#);
        let env = map(&[
            ("EMPLOYEE_DATABASE__PATH", "from-env.db"),
            ("EMPLOYEE_DATABASE__BUSY_TIMEOUT_MS", "250"),
            ("EMPLOYEE_LOGGING__LEVEL", "warn"),
        ]);

        let config = AppConfig::load_with_options(Some(file.path()), Some(env), None)
            .expect("env should apply");
        assert_eq!(config.database.path, PathBuf::from("from-env.db"));
        assert_eq!(config.database.busy_timeout_ms, 250);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn explicit_overrides_beat_env() {
        let env = map(&[
            ("EMPLOYEE_DATABASE__PATH", "from-env.db"),
            ("EMPLOYEE_LOGGING__LEVEL", "warn"),
        ]);
        let overrides = map(&[(KEY_DB_PATH, "from-flag.db")]);

        let config = AppConfig::load_with_options(None, Some(env), Some(overrides))
            .expect("overrides should apply");
        assert_eq!(config.database.path, PathBuf::from("from-flag.db"));
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let env = map(&[("EMPLOYEE_DATABASE__PATH", "")]);
        let config = AppConfig::load_with_options(None, Some(env), None)
            .expect("blank values are ignored");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        for raw in ["soon", "-1"] {
            let env = map(&[("EMPLOYEE_DATABASE__BUSY_TIMEOUT_MS", raw)]);
            let err = AppConfig::load_with_options(None, Some(env), None)
                .expect_err("invalid timeout must fail");
            assert!(matches!(err, ConfigError::Deserialize(_)), "{raw}: {err}");
        }
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("absent.json");

        let err = AppConfig::load_with_options(Some(&missing), Some(map(&[])), None)
            .expect_err("explicit file must exist");
        assert!(matches!(err, ConfigError::Load(_)));
    }
}
