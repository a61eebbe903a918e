use crate::app_config::{
    AppConfig, EndpointConfig, Environment, DEFAULT_FEATURE_QUERY_URL, DEFAULT_GEOCODE_URL,
    DEFAULT_SUGGEST_URL,
};
use crate::widget_config::{WidgetConfig, DEFAULT_CONTAINER_ID};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
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
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every setting has a default, so an empty environment yields a working
/// configuration pointed at the public ArcGIS services.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("DESO_ENV", "development"))?;
    let log_level = or_default("DESO_LOG_LEVEL", "info");

    let endpoints = EndpointConfig {
        suggest_url: parse_url(
            "DESO_SUGGEST_URL",
            &or_default("DESO_SUGGEST_URL", DEFAULT_SUGGEST_URL),
        )?,
        geocode_url: parse_url(
            "DESO_GEOCODE_URL",
            &or_default("DESO_GEOCODE_URL", DEFAULT_GEOCODE_URL),
        )?,
        feature_query_url: parse_url(
            "DESO_FEATURE_QUERY_URL",
            &or_default("DESO_FEATURE_QUERY_URL", DEFAULT_FEATURE_QUERY_URL),
        )?,
    };

    let request_timeout_secs = parse_u64("DESO_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "DESO_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let user_agent = or_default("DESO_USER_AGENT", "deso-lookup/0.1 (address-to-area)");
    let max_retries = parse_u32("DESO_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse_u64("DESO_RETRY_BACKOFF_BASE_MS", "500")?;
    let debounce_ms = parse_u64("DESO_DEBOUNCE_MS", "250")?;

    let widget = WidgetConfig {
        container_id: or_default("DESO_CONTAINER_ID", DEFAULT_CONTAINER_ID),
        auto_initialize: parse_bool(
            "DESO_AUTO_INITIALIZE",
            &or_default("DESO_AUTO_INITIALIZE", "true"),
        )?,
    };

    Ok(AppConfig {
        env,
        log_level,
        endpoints,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
        debounce_ms,
        widget,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "DESO_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got \"{other}\""),
        }),
    }
}

/// Only absolute http(s) URLs are accepted; the client appends query strings
/// to them verbatim.
fn parse_url(var: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected an http(s) URL, got \"{trimmed}\""),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
