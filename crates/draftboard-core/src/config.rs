// Configuration loading and parsing (config/draftboard.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::api::client::parse_base_url;

/// Name of the single config file, under both `config/` and `defaults/`.
pub const CONFIG_FILE: &str = "draftboard.toml";

/// Environment variable that overrides `service.base_url`.
pub const BASE_URL_ENV: &str = "DRAFTBOARD_BASE_URL";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the draft service lives.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Directory for the log file, relative to the working directory.
    #[serde(default = "default_log_directory")]
    pub directory: String,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            directory: default_log_directory(),
            filter: default_log_filter(),
        }
    }
}

fn default_log_directory() -> String {
    "logs".to_string()
}

fn default_log_filter() -> String {
    "draftboard=info,warn".to_string()
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/draftboard.toml` relative to `base_dir`.
///
/// Does not copy defaults and ignores the environment. Prefer `load_config()`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    load_config_with(base_dir, None)
}

/// Load `config/draftboard.toml` relative to `base_dir` with an optional
/// base URL override. The override replaces the file's value before
/// anything is validated, so it can stand in for a broken entry.
pub fn load_config_with(
    base_dir: &Path,
    base_url: Option<String>,
) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let config: Config =
        toml::from_str(&text).map_err(|source| ConfigError::ParseError { path, source })?;
    apply_env_overrides(config, base_url)
}

/// Apply environment overrides, then normalize and validate the result.
pub fn apply_env_overrides(
    mut config: Config,
    base_url: Option<String>,
) -> Result<Config, ConfigError> {
    if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
        config.service.base_url = url;
    }
    normalize(&mut config)?;
    validate(&config)?;
    Ok(config)
}

/// First run: seed `config/draftboard.toml` from `defaults/`.
///
/// Returns the path written, or `None` when the config already exists or
/// there is no default to seed from (loading then reports the missing file).
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    let source = base_dir.join("defaults").join(CONFIG_FILE);
    if target.exists() || !source.is_file() {
        return Ok(None);
    }

    let copy_failed = |e: std::io::Error| ConfigError::DefaultsCopyError {
        message: format!("{} -> {}: {e}", source.display(), target.display()),
    };
    if let Some(config_dir) = target.parent() {
        std::fs::create_dir_all(config_dir).map_err(copy_failed)?;
    }
    std::fs::copy(&source, &target).map_err(copy_failed)?;
    Ok(Some(target))
}

/// Load config relative to the current working directory, seeding it from
/// the defaults first and honouring `DRAFTBOARD_BASE_URL`.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_file(&cwd)?;
    load_config_with(&cwd, std::env::var(BASE_URL_ENV).ok())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn normalize(config: &mut Config) -> Result<(), ConfigError> {
    let url = parse_base_url(&config.service.base_url)?;
    config.service.base_url = url.as_str().trim_end_matches('/').to_string();
    Ok(())
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    parse_base_url(&config.service.base_url)?;

    if config.logging.directory.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "logging.directory".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
