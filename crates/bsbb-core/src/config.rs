use crate::app_config::AppConfig;
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
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let data_dir = PathBuf::from(or_default("BSBB_DATA_DIR", "./.bsbb"));
    let log_level = or_default("BSBB_LOG_LEVEL", "info");
    let google_api_key = lookup("BSBB_GOOGLE_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());

    let places_base_url = or_default("BSBB_PLACES_BASE_URL", "https://maps.googleapis.com");
    let overpass_base_url = or_default("BSBB_OVERPASS_BASE_URL", "https://overpass-api.de");
    let geocoder_base_url = or_default(
        "BSBB_GEOCODER_BASE_URL",
        "https://nominatim.openstreetmap.org",
    );

    let request_timeout_secs = parse_u64("BSBB_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("BSBB_USER_AGENT", "bsbb/0.1 (local-business-directory)");
    let search_radius_m = parse_u32("BSBB_SEARCH_RADIUS_M", "1500")?;
    let result_limit = parse_usize("BSBB_RESULT_LIMIT", "50")?;

    if result_limit == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "BSBB_RESULT_LIMIT".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        data_dir,
        log_level,
        google_api_key,
        places_base_url,
        overpass_base_url,
        geocoder_base_url,
        request_timeout_secs,
        user_agent,
        search_radius_m,
        result_limit,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
