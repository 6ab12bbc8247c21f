use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::{error, info, warn};

static CONFIG: OnceLock<HashMap<String, String>> = OnceLock::new();

/// Default configuration values
const DEFAULTS: &[(&str, &str)] = &[
    ("SERVER_ADDRESS", "0.0.0.0"),
    ("SERVER_PORT", "8080"),
    ("JWT_ACCESS_TOKEN_EXPIRY_MINUTES", "15"),
    ("JWT_REFRESH_TOKEN_EXPIRY_DAYS", "7"),
    ("DB_PORT", "5432"),
    ("DB_SSL_MODE", "disable"),
    ("DB_MAX_CONNECTIONS", "10"),
    ("ROLE_CACHE_TTL_SECONDS", "30"),
    ("REQUEST_TIMEOUT_SECONDS", "60"),
    ("SHUTDOWN_GRACE_SECONDS", "30"),
    ("LOG_LEVEL", "info"),
    ("ENV", "development"),
];

/// Keys without a default that are still read from the environment
const REQUIRED: &[&str] = &["DB_USER", "DB_PASSWORD", "DB_HOST", "DB_NAME", "JWT_SECRET"];

pub fn init() {
    match dotenv::dotenv() {
        Ok(path) => info!("Loaded environment file: {:?}", path),
        Err(_) => warn!("No .env file found, using system environment variables"),
    }

    let config = collect(|key| std::env::var(key).ok());

    if CONFIG.set(config).is_err() {
        error!("Configuration already initialized");
    } else {
        info!("Configuration initialized successfully");
    }
}

/// Defaults overlaid with whatever `lookup` finds for the known keys.
fn collect(lookup: impl Fn(&str) -> Option<String>) -> HashMap<String, String> {
    let mut config: HashMap<String, String> = DEFAULTS
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

    let keys = DEFAULTS.iter().map(|(key, _)| *key).chain(REQUIRED.iter().copied());
    for key in keys {
        if let Some(value) = lookup(key) {
            config.insert(key.to_string(), value);
        }
    }
    config
}

pub fn get(parameter: &str) -> String {
    get_optional(parameter).unwrap_or_else(|| {
        error!("Configuration parameter '{}' not found", parameter);
        panic!("Required configuration parameter '{}' is missing", parameter);
    })
}

pub fn get_optional(parameter: &str) -> Option<String> {
    CONFIG
        .get()
        .and_then(|config| config.get(parameter))
        .cloned()
}

/// Required parameter parsed as `T`. Panics at startup on a missing or malformed value.
pub fn get_parsed<T>(parameter: &str) -> T
where
    T: FromStr,
    T::Err: Display,
{
    let value = get(parameter);
    value.trim().parse::<T>().unwrap_or_else(|e| {
        error!("Configuration parameter '{}' has invalid value '{}': {}", parameter, value, e);
        panic!("Configuration parameter '{}' is not valid", parameter);
    })
}

/// Positive integer or the fallback. Zero, negatives and garbage all mean "use the default".
pub fn get_positive_i64_or(parameter: &str, fallback: i64) -> i64 {
    positive_or(get_optional(parameter).as_deref(), fallback)
}

fn positive_or(value: Option<&str>, fallback: i64) -> i64 {
    value
        .and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(fallback)
}
