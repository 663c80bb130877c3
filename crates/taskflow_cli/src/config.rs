//! Runtime configuration for the `taskflow` binary.
//!
//! Resolution order per field: command-line flag, environment variable,
//! then a default under the platform data directory.

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

pub const DB_ENV: &str = "TASKFLOW_DB";
pub const LOG_DIR_ENV: &str = "TASKFLOW_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "TASKFLOW_LOG_LEVEL";

const APP_DIR_NAME: &str = "taskflow";
const DB_FILE_NAME: &str = "taskflow.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigFlags {
    pub db: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    /// Always absolute.
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl AppConfig {
    /// Resolves against the process environment and platform directories.
    pub fn resolve(flags: ConfigFlags) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to read current directory")?;
        Self::resolve_with(
            flags,
            |name| std::env::var(name).ok(),
            dirs::data_dir(),
            &cwd,
        )
    }

    /// Resolution with injected environment lookup and data directory.
    pub fn resolve_with(
        flags: ConfigFlags,
        env: impl Fn(&str) -> Option<String>,
        data_dir: Option<PathBuf>,
        cwd: &Path,
    ) -> Result<Self> {
        let env_path = |name: &str| {
            env(name)
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
        };
        let app_dir = || {
            data_dir
                .as_ref()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or_else(|| {
                    anyhow!("no platform data directory; pass --db and --log-dir explicitly")
                })
        };

        let db_path = match flags.db.or_else(|| env_path(DB_ENV)) {
            Some(path) => path,
            None => app_dir()?.join(DB_FILE_NAME),
        };
        let log_dir = match flags.log_dir.or_else(|| env_path(LOG_DIR_ENV)) {
            Some(path) => absolutize(path, cwd),
            None => app_dir()?.join(LOG_DIR_NAME),
        };
        let log_level = flags
            .log_level
            .or_else(|| env(LOG_LEVEL_ENV).filter(|value| !value.trim().is_empty()))
            .unwrap_or_else(|| taskflow_core::default_log_level().to_string());

        Ok(Self {
            db_path,
            log_dir,
            log_level,
        })
    }

    /// Creates the directory holding the database file.
    pub fn ensure_db_parent(&self) -> Result<()> {
        if let Some(parent) = self
            .db_path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
        {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create database directory `{}`", parent.display())
            })?;
        }
        Ok(())
    }
}

fn absolutize(path: PathBuf, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigFlags, DB_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_live_under_data_dir() {
        let config = AppConfig::resolve_with(
            ConfigFlags::default(),
            env_of(&[]),
            Some(PathBuf::from("/data")),
            Path::new("/work"),
        )
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/data/taskflow/taskflow.sqlite3"));
        assert_eq!(config.log_dir, PathBuf::from("/data/taskflow/logs"));
        assert_eq!(config.log_level, taskflow_core::default_log_level());
    }

    #[test]
    fn env_overrides_defaults_and_flags_override_env() {
        let env = env_of(&[
            (DB_ENV, "/env/tasks.sqlite3"),
            (LOG_DIR_ENV, "env-logs"),
            (LOG_LEVEL_ENV, "warn"),
        ]);

        let from_env = AppConfig::resolve_with(
            ConfigFlags::default(),
            &env,
            None,
            Path::new("/work"),
        )
        .unwrap();
        assert_eq!(from_env.db_path, PathBuf::from("/env/tasks.sqlite3"));
        assert_eq!(from_env.log_dir, PathBuf::from("/work/env-logs"));
        assert_eq!(from_env.log_level, "warn");

        let flags = ConfigFlags {
            db: Some(PathBuf::from("local.sqlite3")),
            log_dir: Some(PathBuf::from("/flag/logs")),
            log_level: Some("trace".to_string()),
        };
        let from_flags = AppConfig::resolve_with(flags, &env, None, Path::new("/work")).unwrap();
        assert_eq!(from_flags.db_path, PathBuf::from("local.sqlite3"));
        assert_eq!(from_flags.log_dir, PathBuf::from("/flag/logs"));
        assert_eq!(from_flags.log_level, "trace");
    }

    #[test]
    fn missing_data_dir_without_overrides_is_an_error() {
        let result = AppConfig::resolve_with(
            ConfigFlags::default(),
            env_of(&[]),
            None,
            Path::new("/work"),
        );
        assert!(result.is_err());
    }
}
