//! Configuration loader
//!
//! Builds the application [`Config`] from layered sources.
//!
//! ## Loading Strategy
//! 1. Load `.env` from the working directory, if present
//! 2. Read a config file: `SUITEGATE_CONFIG` if set, otherwise the first
//!    probed path that exists, otherwise built-in defaults
//! 3. Apply environment variable overrides
//! 4. Validate and normalise
//!
//! ## Environment Variables
//! - `SUITEGATE_CONFIG`: Explicit config file path
//! - `SUITEGATE_CLIENT`: Client override for every account
//! - `SUITEGATE_CREDENTIALS_DIR`: Directory holding credential files
//! - `SUITEGATE_BREAKER_THRESHOLD`: Consecutive failures before a circuit opens
//! - `SUITEGATE_BREAKER_RESET_MS`: Cooldown before an open circuit closes
//! - `SUITEGATE_RETRY_BASE_DELAY_MS`: Base delay for exponential backoff
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./suitegate.toml`, `./suitegate.json`
//! 2. `$XDG_CONFIG_HOME/suitegate/config.toml` and `config.json`
//!    (`~/.config` when `XDG_CONFIG_HOME` is unset)

use std::path::{Path, PathBuf};
use std::str::FromStr;

use suitegate_domain::{Config, Result, SuiteError};
use tracing::{debug, info};

/// Explicit config file path
pub const ENV_CONFIG_PATH: &str = "SUITEGATE_CONFIG";
/// Client override for every account
pub const ENV_CLIENT: &str = "SUITEGATE_CLIENT";
/// Credentials directory
pub const ENV_CREDENTIALS_DIR: &str = "SUITEGATE_CREDENTIALS_DIR";
/// Breaker failure threshold
pub const ENV_BREAKER_THRESHOLD: &str = "SUITEGATE_BREAKER_THRESHOLD";
/// Breaker reset window in milliseconds
pub const ENV_BREAKER_RESET_MS: &str = "SUITEGATE_BREAKER_RESET_MS";
/// Base backoff delay in milliseconds
pub const ENV_RETRY_BASE_DELAY_MS: &str = "SUITEGATE_RETRY_BASE_DELAY_MS";

/// Load configuration from the process environment and the filesystem
///
/// # Errors
/// Returns `SuiteError::Config` if:
/// - `SUITEGATE_CONFIG` names a missing file
/// - A file cannot be read or has an invalid format
/// - An override variable has an invalid value
/// - The merged configuration fails validation
pub fn load() -> Result<Config> {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "Loaded .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => debug!(error = %e, "Ignoring unreadable .env file"),
    }

    let explicit = std::env::var_os(ENV_CONFIG_PATH).map(PathBuf::from);
    load_with(explicit, |key| std::env::var(key).ok())
}

/// [`load`] with an explicit file and a custom variable lookup
///
/// `env` is consulted for override variables and for the probe locations.
pub fn load_with<E>(explicit: Option<PathBuf>, env: E) -> Result<Config>
where
    E: Fn(&str) -> Option<String>,
{
    let config = match explicit.or_else(|| probe_config_paths_with(&env)) {
        Some(path) => load_from_file(&path)?,
        None => {
            info!("No configuration file found, using defaults");
            Config::default()
        }
    };

    apply_env_overrides(config, env)?.validate()
}

/// Load configuration from a single file
///
/// Format is detected by extension (`.toml` or `.json`). The result is not
/// validated; [`load_with`] does that after overrides are applied.
///
/// # Errors
/// Returns `SuiteError::Config` if the file is missing, unreadable or
/// malformed.
pub fn load_from_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(SuiteError::Config(format!("Config file not found: {}", path.display())));
    }

    info!(path = %path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(path)
        .map_err(|e| SuiteError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, path)
}

/// Parse configuration from string content
///
/// # Errors
/// Returns `SuiteError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| SuiteError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| SuiteError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(SuiteError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Apply `SUITEGATE_*` overrides on top of `config`
///
/// # Errors
/// Returns `SuiteError::Config` if a numeric variable does not parse.
pub fn apply_env_overrides<E>(mut config: Config, env: E) -> Result<Config>
where
    E: Fn(&str) -> Option<String>,
{
    let env = |key: &str| env(key).filter(|value| !value.trim().is_empty());

    if let Some(client) = env(ENV_CLIENT) {
        config.tenancy.client_override = Some(client);
    }
    if let Some(dir) = env(ENV_CREDENTIALS_DIR) {
        config.credentials.directory = Some(PathBuf::from(dir));
    }
    if let Some(raw) = env(ENV_BREAKER_THRESHOLD) {
        config.circuit_breaker.failure_threshold = parse_var(ENV_BREAKER_THRESHOLD, &raw)?;
    }
    if let Some(raw) = env(ENV_BREAKER_RESET_MS) {
        config.circuit_breaker.reset_window_ms = parse_var(ENV_BREAKER_RESET_MS, &raw)?;
    }
    if let Some(raw) = env(ENV_RETRY_BASE_DELAY_MS) {
        config.retry.base_delay_ms = parse_var(ENV_RETRY_BASE_DELAY_MS, &raw)?;
    }

    Ok(config)
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    probe_config_paths_with(|key| std::env::var(key).ok())
}

fn probe_config_paths_with<E>(env: E) -> Option<PathBuf>
where
    E: Fn(&str) -> Option<String>,
{
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend([cwd.join("suitegate.toml"), cwd.join("suitegate.json")]);
    }

    if let Some(dir) = config_dir_with(&env) {
        candidates.extend([dir.join("config.toml"), dir.join("config.json")]);
    }

    candidates.into_iter().find(|path| path.is_file())
}

/// `$XDG_CONFIG_HOME/suitegate`, falling back to `$HOME/.config/suitegate`
pub fn default_config_dir() -> Option<PathBuf> {
    config_dir_with(|key| std::env::var(key).ok())
}

fn config_dir_with<E>(env: E) -> Option<PathBuf>
where
    E: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| env(key).filter(|value| !value.is_empty()).map(PathBuf::from);
    non_empty("XDG_CONFIG_HOME")
        .or_else(|| non_empty("HOME").map(|home| home.join(".config")))
        .map(|base| base.join("suitegate"))
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| SuiteError::Config(format!("Invalid {}: {}", key, e)))
}
