use crate::config::parameter;
use std::sync::OnceLock;
use tracing::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Test,
}

impl Environment {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            "test" | "testing" => Environment::Test,
            _ => Environment::Development,
        }
    }
}

/// How much detail may reach the logs.
///
/// Usernames and e-mail addresses are only logged in development at debug level;
/// raw error text is logged in development or at debug level. Passwords, hashes and
/// tokens are never logged at all.
#[derive(Debug, Clone, Copy)]
pub struct LoggingConfig {
    environment: Environment,
    log_level: Level,
}

impl LoggingConfig {
    pub fn new(environment: Environment, log_level: Level) -> Self {
        Self {
            environment,
            log_level,
        }
    }

    /// Reads `ENV` and `LOG_LEVEL`. Unset or unknown values fall back to development/info.
    pub fn from_parameters() -> Self {
        let environment = parameter::get_optional("ENV")
            .map(|value| Environment::parse(&value))
            .unwrap_or(Environment::Development);
        let log_level = parameter::get_optional("LOG_LEVEL")
            .and_then(|value| parse_level(&value))
            .unwrap_or(Level::INFO);

        Self::new(environment, log_level)
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn log_level(&self) -> Level {
        self.log_level
    }

    pub fn allow_detailed_errors(&self) -> bool {
        self.environment == Environment::Development || self.log_level >= Level::DEBUG
    }

    pub fn allow_sensitive_data(&self) -> bool {
        self.environment == Environment::Development && self.log_level >= Level::DEBUG
    }
}

fn parse_level(value: &str) -> Option<Level> {
    value.trim().parse::<Level>().ok()
}

static LOGGING_CONFIG: OnceLock<LoggingConfig> = OnceLock::new();

/// Resolve the logging config and install the global `tracing` subscriber.
///
/// Production output drops module targets and ANSI colours so log shippers get plain lines.
pub fn init() -> &'static LoggingConfig {
    let config = get_config();

    let builder = tracing_subscriber::fmt().with_max_level(config.log_level());
    let installed = match config.environment() {
        Environment::Production => builder.with_target(false).with_ansi(false).try_init(),
        Environment::Development | Environment::Test => builder.try_init(),
    };

    if installed.is_err() {
        tracing::warn!("Global tracing subscriber already set; keeping the existing one");
    }
    tracing::info!(
        "Logging configured: environment={:?}, level={}",
        config.environment(),
        config.log_level()
    );
    config
}

/// Process-wide config. Falls back to `from_parameters` when `init` has not run (tests).
pub fn get_config() -> &'static LoggingConfig {
    LOGGING_CONFIG.get_or_init(LoggingConfig::from_parameters)
}

/// Logging macros that respect [`LoggingConfig`]
pub mod secure_log {

    /// `error!` whose detail is suppressed outside development/debug.
    macro_rules! secure_error {
        ($message:expr) => {
            if $crate::config::logging::get_config().allow_detailed_errors() {
                tracing::error!("{}", $message);
            } else {
                tracing::error!("An internal error occurred");
            }
        };
        ($message:expr, $error:expr) => {
            if $crate::config::logging::get_config().allow_detailed_errors() {
                tracing::error!("{}: {}", $message, $error);
            } else {
                tracing::error!("{}: An internal error occurred", $message);
            }
        };
    }

    /// `debug!` for personal data; a no-op unless sensitive logging is allowed.
    macro_rules! sensitive_debug {
        ($($arg:tt)*) => {
            if $crate::config::logging::get_config().allow_sensitive_data() {
                tracing::debug!($($arg)*);
            }
        };
    }

    pub(crate) use secure_error;
    pub(crate) use sensitive_debug;
}
