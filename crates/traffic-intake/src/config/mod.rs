use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::workflows::intake::checkout::{CheckoutRedirects, DEFAULT_CHECKOUT_ORIGIN};
use crate::workflows::intake::StepValidator;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub intake: IntakeConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let bypass_validation = match env::var("INTAKE_BYPASS_VALIDATION") {
            Ok(value) => parse_flag("INTAKE_BYPASS_VALIDATION", &value)?,
            Err(_) => false,
        };
        if bypass_validation && environment == AppEnvironment::Production {
            return Err(ConfigError::BypassInProduction);
        }

        let checkout_origin = env::var("CHECKOUT_ORIGIN")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_CHECKOUT_ORIGIN.to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            intake: IntakeConfig {
                bypass_validation,
                checkout_origin,
            },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Intake wizard behavior and the checkout return address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeConfig {
    /// Demo/test switch: every step passes validation and labor forcing always runs.
    pub bypass_validation: bool,
    pub checkout_origin: String,
}

impl IntakeConfig {
    pub fn validator(&self) -> StepValidator {
        StepValidator::with_bypass(self.bypass_validation)
    }

    pub fn redirects(&self) -> CheckoutRedirects {
        CheckoutRedirects::for_origin(&self.checkout_origin)
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            bypass_validation: false,
            checkout_origin: DEFAULT_CHECKOUT_ORIGIN.to_string(),
        }
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            name,
            value: value.to_string(),
        }),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidFlag { name: &'static str, value: String },
    BypassInProduction,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidFlag { name, value } => {
                write!(f, "{name} must be true or false, got '{value}'")
            }
            ConfigError::BypassInProduction => {
                write!(f, "INTAKE_BYPASS_VALIDATION cannot be enabled in production")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidFlag { .. }
            | ConfigError::BypassInProduction => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("INTAKE_BYPASS_VALIDATION");
        env::remove_var("CHECKOUT_ORIGIN");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.intake, IntakeConfig::default());
        assert!(!config.intake.validator().is_bypassed());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn bypass_flag_and_origin_are_read_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("INTAKE_BYPASS_VALIDATION", "true");
        env::set_var("CHECKOUT_ORIGIN", "https://intake.example.com/");
        let config = AppConfig::load().expect("config loads");
        assert!(config.intake.validator().is_bypassed());
        assert_eq!(
            config.intake.redirects().success_url,
            "https://intake.example.com/?session_id={CHECKOUT_SESSION_ID}"
        );
        reset_env();
    }

    #[test]
    fn rejects_unreadable_bypass_flag() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("INTAKE_BYPASS_VALIDATION", "sometimes");
        let error = AppConfig::load().expect_err("flag must be boolean");
        assert!(matches!(
            error,
            ConfigError::InvalidFlag {
                name: "INTAKE_BYPASS_VALIDATION",
                ..
            }
        ));
        reset_env();
    }

    #[test]
    fn refuses_bypass_in_production() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "production");
        env::set_var("INTAKE_BYPASS_VALIDATION", "1");
        let error = AppConfig::load().expect_err("bypass is not allowed in production");
        assert!(matches!(error, ConfigError::BypassInProduction));
        reset_env();
    }
}
