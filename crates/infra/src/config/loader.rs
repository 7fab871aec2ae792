//! Configuration loader
//!
//! Loads client configuration from a file and environment variables.
//!
//! ## Loading Strategy
//! 1. Probes multiple paths for a config file
//! 2. Falls back to defaults when none exists
//! 3. Applies environment variable overrides on top
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `RSBLOX_HTTP_TIMEOUT_SECS`: Request timeout in seconds
//! - `RSBLOX_USER_AGENT`: User-Agent header value
//! - `RSBLOX_ACCEPT_INVALID_CERTS`: Skip TLS certificate validation (true/false)
//! - `RSBLOX_TOKEN_PROBE_URL`: Endpoint probed for a mutation token
//! - `RSBLOX_MAX_PAGES`: Page cap per collection (`0` or `none` disables it)
//! - `RSBLOX_MAX_ITEMS`: Item cap per collection (`0` or `none` disables it)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./rsblox.toml`, `./rsblox.json`, `./config.toml`, `./config.json`
//! 2. The same names in the parent and grandparent directories
//! 3. The same names relative to the executable location

use std::path::{Path, PathBuf};

use rsblox_domain::{BloxError, ClientConfig, Result};

const CONFIG_FILE_NAMES: [&str; 4] = ["rsblox.toml", "rsblox.json", "config.toml", "config.json"];

/// Load configuration with automatic fallback strategy
///
/// Reads the first config file found by [`probe_config_paths`], or starts
/// from defaults when there is none, then applies environment overrides.
///
/// # Errors
/// Returns `BloxError::Config` if a found file is invalid or an environment
/// variable holds an invalid value.
pub fn load() -> Result<ClientConfig> {
    let config = match probe_config_paths() {
        Some(path) => load_from_file(Some(path))?,
        None => {
            tracing::debug!("No config file found, using defaults");
            ClientConfig::default()
        }
    };

    apply_env_overrides(config)
}

/// Load configuration from environment variables over defaults
///
/// # Errors
/// Returns `BloxError::Config` if a variable has an invalid value.
pub fn load_from_env() -> Result<ClientConfig> {
    apply_env_overrides(ClientConfig::default())
}

/// Apply `RSBLOX_*` environment overrides to `config`
///
/// Unset variables leave the corresponding field untouched.
///
/// # Errors
/// Returns `BloxError::Config` if a variable has an invalid value.
pub fn apply_env_overrides(mut config: ClientConfig) -> Result<ClientConfig> {
    if let Some(value) = env_opt("RSBLOX_HTTP_TIMEOUT_SECS") {
        config.http.timeout_secs = value
            .parse::<u64>()
            .map_err(|e| BloxError::Config(format!("Invalid HTTP timeout: {}", e)))?;
    }
    if let Some(value) = env_opt("RSBLOX_USER_AGENT") {
        config.http.user_agent = value;
    }
    if let Some(value) = env_bool("RSBLOX_ACCEPT_INVALID_CERTS")? {
        config.http.accept_invalid_certs = value;
    }

    if let Some(value) = env_opt("RSBLOX_TOKEN_PROBE_URL") {
        url::Url::parse(&value)
            .map_err(|e| BloxError::Config(format!("Invalid token probe URL: {}", e)))?;
        config.auth.token_probe_url = value;
    }

    if let Some(value) = env_opt("RSBLOX_MAX_PAGES") {
        config.pagination.max_pages = parse_limit("RSBLOX_MAX_PAGES", &value)?;
    }
    if let Some(value) = env_opt("RSBLOX_MAX_ITEMS") {
        config.pagination.max_items = parse_limit("RSBLOX_MAX_ITEMS", &value)?;
    }

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension). Missing
/// sections and fields take their defaults.
///
/// # Errors
/// Returns `BloxError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(BloxError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            BloxError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| BloxError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| BloxError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| BloxError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(BloxError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, its parent directories (up to 2
/// levels), then the executable's directory and its parents.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.extend([exe_dir.to_path_buf(), exe_dir.join(".."), exe_dir.join("../..")]);
        }
    }

    roots
        .iter()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// Non-empty environment variable, if set.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive).
/// Unset or empty yields `None`; any other value is a config error.
fn env_bool(key: &str) -> Result<Option<bool>> {
    let Some(value) = env_opt(key) else {
        return Ok(None);
    };
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(BloxError::Config(format!("Invalid boolean for {}: {}", key, value))),
    }
}

/// Parse a collection cap; `0` and `none` disable it.
fn parse_limit(key: &str, value: &str) -> Result<Option<usize>> {
    if value.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    match value.parse::<usize>() {
        Ok(0) => Ok(None),
        Ok(limit) => Ok(Some(limit)),
        Err(e) => Err(BloxError::Config(format!("Invalid value for {}: {}", key, e))),
    }
}
