use crate::attendance::policy::{
    PolicyConfig, PolicyError, DEFAULT_MIN_OFFICE_DAYS, DEFAULT_ROLLING_WINDOW_WEEKS,
    DEFAULT_THRESHOLD, DEFAULT_TOP_WEEKS, DEFAULT_WEEKDAYS_PER_WEEK,
};
use crate::attendance::HolidayQuery;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

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

/// Top-level configuration for the service and the CLI.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub policy: PolicyConfig,
    pub holidays: HolidaySettings,
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

        let policy = PolicyConfig::new(
            number_var("RTO_MIN_OFFICE_DAYS", DEFAULT_MIN_OFFICE_DAYS)?,
            number_var("RTO_WEEKDAYS_PER_WEEK", DEFAULT_WEEKDAYS_PER_WEEK)?,
            number_var("RTO_ROLLING_WINDOW_WEEKS", DEFAULT_ROLLING_WINDOW_WEEKS)?,
            number_var("RTO_TOP_WEEKS", DEFAULT_TOP_WEEKS)?,
            number_var("RTO_THRESHOLD", DEFAULT_THRESHOLD)?,
        )
        .map_err(ConfigError::InvalidPolicy)?;

        let holidays = HolidaySettings {
            country: optional_var("RTO_HOLIDAY_COUNTRY"),
            company: optional_var("RTO_HOLIDAY_COMPANY"),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            policy,
            holidays,
        })
    }
}

fn number_var<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { var, value: raw }),
        _ => Ok(default),
    }
}

fn optional_var(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Default holiday calendar selection; unset country means no holidays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySettings {
    pub country: Option<String>,
    pub company: Option<String>,
}

impl HolidaySettings {
    pub fn query(&self) -> Option<HolidayQuery> {
        let country = self.country.as_deref()?;
        let query = HolidayQuery::for_country(country);
        Some(match self.company.as_deref() {
            Some(company) => query.with_company(company),
            None => query,
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { var: &'static str, value: String },
    InvalidPolicy(PolicyError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { var, value } => {
                write!(f, "{var} must be numeric (got '{value}')")
            }
            ConfigError::InvalidPolicy(err) => write!(f, "invalid attendance policy: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidNumber { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPolicy(err) => Some(err),
        }
    }
}
