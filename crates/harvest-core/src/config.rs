use std::path::PathBuf;
use std::str::FromStr;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default =
        |var: &str, default: &str| -> String { lookup(var).unwrap_or_else(|_| default.to_string()) };

    let log_level = or_default("HARVEST_LOG_LEVEL", "info");
    let log_dir = lookup("HARVEST_LOG_DIR")
        .ok()
        .filter(|dir| !dir.trim().is_empty())
        .map(PathBuf::from);
    let output_dir = PathBuf::from(or_default("HARVEST_OUTPUT_DIR", "./data"));

    let request_timeout_secs: u64 = parse_var(
        "HARVEST_REQUEST_TIMEOUT_SECS",
        &or_default("HARVEST_REQUEST_TIMEOUT_SECS", "10"),
    )?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "HARVEST_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        });
    }

    let books_category_id = or_default("HARVEST_BOOKS_CATEGORY_ID", "001001003032");
    let books_page_size: u32 = parse_var(
        "HARVEST_BOOKS_PAGE_SIZE",
        &or_default("HARVEST_BOOKS_PAGE_SIZE", "24"),
    )?;
    let books_max_pages: u32 = parse_var(
        "HARVEST_BOOKS_MAX_PAGES",
        &or_default("HARVEST_BOOKS_MAX_PAGES", "5"),
    )?;
    let books_delay_ms: u64 = parse_var(
        "HARVEST_BOOKS_DELAY_MS",
        &or_default("HARVEST_BOOKS_DELAY_MS", "1000"),
    )?;

    Ok(AppConfig {
        log_level,
        log_dir,
        output_dir,
        request_timeout_secs,
        books_category_id,
        books_page_size,
        books_max_pages,
        books_delay_ms,
    })
}

fn parse_var<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
