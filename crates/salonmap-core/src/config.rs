use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every setting has a default, so an empty environment yields a usable
/// config pointed at the public Overpass instance.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("SALONMAP_ENV", "development"))?;

    let bind_addr = or_default("SALONMAP_BIND_ADDR", "0.0.0.0:8080")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("SALONMAP_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("SALONMAP_LOG_LEVEL", "info");

    let overpass_url = or_default(
        "SALONMAP_OVERPASS_URL",
        "https://overpass-api.de/api/interpreter",
    );
    if !overpass_url.starts_with("http://") && !overpass_url.starts_with("https://") {
        return Err(invalid(
            "SALONMAP_OVERPASS_URL",
            format!("expected an http(s) URL, got '{overpass_url}'"),
        ));
    }

    let overpass_area = or_default("SALONMAP_OVERPASS_AREA", "CA-ON");
    if overpass_area.trim().is_empty() {
        return Err(invalid(
            "SALONMAP_OVERPASS_AREA",
            "area code must be non-empty".to_string(),
        ));
    }

    let request_timeout_secs = parse_u64("SALONMAP_REQUEST_TIMEOUT_SECS", "180")?;
    let user_agent = or_default("SALONMAP_USER_AGENT", "salonmap/0.1 (business-locator)");

    let cache_ttl_secs = parse_u64("SALONMAP_CACHE_TTL_SECS", "86400")?;
    if cache_ttl_secs == 0 {
        return Err(invalid(
            "SALONMAP_CACHE_TTL_SECS",
            "ttl must be at least one second".to_string(),
        ));
    }

    let region_path = lookup("SALONMAP_REGION_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        overpass_url,
        overpass_area,
        request_timeout_secs,
        user_agent,
        cache_ttl_secs,
        region_path,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SALONMAP_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
