use crate::error::ConfigError;
use serde::Deserialize;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "bookshelf.toml";

fn default_bind() -> String {
    "127.0.0.1:5000".into()
}

fn default_workers() -> usize {
    4
}

fn default_database_path() -> PathBuf {
    PathBuf::from("library.db")
}

fn default_log_level() -> String {
    bookshelf_core::default_log_level().into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    #[serde(default = "default_bind")]
    pub(crate) bind: String,
    #[serde(default = "default_workers")]
    pub(crate) workers: usize,
    #[serde(default = "default_database_path")]
    pub(crate) database_path: PathBuf,
    #[serde(default = "default_log_level")]
    pub(crate) log_level: String,
    /// Absolute directory for rolling log files; stderr when unset.
    #[serde(default)]
    pub(crate) log_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            workers: default_workers(),
            database_path: default_database_path(),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl Config {
    pub(crate) fn load(settings_file: &Path) -> Result<Config, ConfigError> {
        let contents = read_to_string(settings_file).map_err(|e| ConfigError::ReadFile {
            path: settings_file.display().to_string(),
            source: e,
        })?;
        Config::parse(&contents)
    }

    pub(crate) fn parse(contents: &str) -> Result<Config, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("BOOKSHELF_DATABASE") {
            self.database_path = PathBuf::from(path);
        }
        if let Some(bind) = lookup("BOOKSHELF_BIND") {
            self.bind = bind;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::Invalid {
                reason: "workers must be greater than 0".to_string(),
            });
        }
        if self.database_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                reason: "database_path must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Loads `$BOOKSHELF_CONFIG_FILE`, else `./bookshelf.toml` when present, else
/// defaults; then applies environment overrides.
pub(crate) fn load() -> Result<Config, ConfigError> {
    let mut settings = match std::env::var("BOOKSHELF_CONFIG_FILE") {
        Ok(settings_file) => Config::load(Path::new(&settings_file))?,
        Err(_) => {
            if Path::new(DEFAULT_CONFIG_FILE).exists() {
                Config::load(Path::new(DEFAULT_CONFIG_FILE))?
            } else {
                Config::default()
            }
        }
    };

    settings.apply_env(|key| std::env::var(key).ok());
    settings.validate()?;
    Ok(settings)
}
