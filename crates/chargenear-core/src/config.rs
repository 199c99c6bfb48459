use crate::app_config::AppConfig;
use crate::geo::Coordinates;
use crate::ConfigError;

pub const DEFAULT_OCM_BASE_URL: &str = "https://api.openchargemap.io/v3/";
pub const DEFAULT_MAPBOX_BASE_URL: &str = "https://api.mapbox.com/";
pub const DEFAULT_ADDRESS: &str = "1111 Expedia Group Wy W, Seattle, WA 98119";

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
/// Decoupled from the real environment so it can be tested with a `HashMap`
/// lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        or_default(var, default)
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        match or_default(var, default).to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" => Ok(false),
            other => Err(invalid(var, format!("expected a boolean, got '{other}'"))),
        }
    };

    // Blank secrets are treated as unset so an empty `.env` line does not
    // produce a request with `key=`.
    let secret = |var: &str| lookup(var).ok().filter(|v| !v.trim().is_empty());

    let log_level = or_default("CHARGENEAR_LOG_LEVEL", "info");

    let ocm_api_key = secret("OCM_API_KEY");
    let ocm_base_url = or_default("CHARGENEAR_OCM_BASE_URL", DEFAULT_OCM_BASE_URL);
    let ocm_passthrough = parse_bool("CHARGENEAR_OCM_PASSTHROUGH", "false")?;
    let mapbox_token = secret("MAPBOX_TOKEN");
    let mapbox_base_url = or_default("CHARGENEAR_MAPBOX_BASE_URL", DEFAULT_MAPBOX_BASE_URL);

    let search_distance_miles = parse_f64("CHARGENEAR_SEARCH_DISTANCE_MILES", "100")?;
    if !(search_distance_miles.is_finite() && search_distance_miles > 0.0) {
        return Err(invalid(
            "CHARGENEAR_SEARCH_DISTANCE_MILES",
            format!("must be a positive number of miles, got {search_distance_miles}"),
        ));
    }

    let max_results = parse_u32("CHARGENEAR_MAX_RESULTS", "100")?;
    if max_results == 0 {
        return Err(invalid(
            "CHARGENEAR_MAX_RESULTS",
            "must be greater than zero".to_string(),
        ));
    }

    let request_timeout_secs = parse_u64("CHARGENEAR_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("CHARGENEAR_USER_AGENT", "chargenear/0.1 (charger-search)");
    let max_retries = parse_u32("CHARGENEAR_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse_u64("CHARGENEAR_RETRY_BACKOFF_BASE_MS", "500")?;

    let default_lat = parse_f64("CHARGENEAR_DEFAULT_LAT", "47.6290525")?;
    let default_lon = parse_f64("CHARGENEAR_DEFAULT_LON", "-122.3758909")?;
    let default_origin = Coordinates::new(default_lat, default_lon).map_err(|e| {
        let var = match e {
            crate::CoordinateError::LatitudeOutOfRange(_) => "CHARGENEAR_DEFAULT_LAT",
            crate::CoordinateError::LongitudeOutOfRange(_) => "CHARGENEAR_DEFAULT_LON",
        };
        invalid(var, e.to_string())
    })?;
    let default_address = or_default("CHARGENEAR_DEFAULT_ADDRESS", DEFAULT_ADDRESS);

    Ok(AppConfig {
        log_level,
        ocm_api_key,
        ocm_base_url,
        ocm_passthrough,
        mapbox_token,
        mapbox_base_url,
        search_distance_miles,
        max_results,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
        default_origin,
        default_address,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
