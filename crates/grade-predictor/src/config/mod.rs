use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::grading::{CatalogError, DegreeType};

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

/// Top-level configuration for the predictor service and CLI.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub predictor: PredictorConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("PREDICTOR_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("PREDICTOR_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PREDICTOR_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("PREDICTOR_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let default_degree_type = env::var("PREDICTOR_DEFAULT_TRACK")
            .unwrap_or_else(|_| "data_science".to_string())
            .parse::<DegreeType>()
            .map_err(|source| ConfigError::InvalidTrack { source })?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            predictor: PredictorConfig {
                default_degree_type,
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

/// Defaults applied when a caller does not pick a track explicitly.
#[derive(Debug, Clone, Copy)]
pub struct PredictorConfig {
    pub default_degree_type: DegreeType,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTrack { source: CatalogError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "PREDICTOR_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "PREDICTOR_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTrack { .. } => write!(
                f,
                "PREDICTOR_DEFAULT_TRACK must be data_science or electronic_systems"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidTrack { source } => Some(source),
        }
    }
}
