//! Environment-driven configuration for the service binaries.

use std::env;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use crate::workflows::progression::PromotionConfig;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 4000;

/// Stage the process believes it is running in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => AppEnvironment::Production,
            "test" | "ci" => AppEnvironment::Test,
            _ => AppEnvironment::Development,
        }
    }
}

/// Everything the binaries read from the process environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub progression: ProgressionTuning,
}

impl AppConfig {
    /// Loads configuration from the environment, reading `.env` first when
    /// one is present.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            environment: AppEnvironment::parse(&env_or("PARLO_ENV", "development")),
            server: ServerConfig {
                host: env_or("PARLO_HOST", DEFAULT_HOST),
                port: parsed_env("PARLO_PORT")?.unwrap_or(DEFAULT_PORT),
            },
            telemetry: TelemetryConfig {
                log_level: env_or("PARLO_LOG_LEVEL", "info"),
            },
            progression: ProgressionTuning::load()?,
        })
    }
}

/// Where the HTTP server listens.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Resolves the configured binding, accepting `localhost` as an alias
    /// for the IPv4 loopback address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        } else {
            self.host
                .parse()
                .map_err(|source| ConfigError::InvalidHost { source })?
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Log filtering controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Optional overrides for the promotion engine thresholds.
///
/// Levels move on the same rules everywhere; these knobs let a deployment
/// tighten or relax the bars without a release. Unset keys leave the
/// injected defaults alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressionTuning {
    pub promotion_threshold: Option<f64>,
    pub demotion_threshold: Option<f64>,
    pub allow_top_level_auto_demote: Option<bool>,
}

impl ProgressionTuning {
    fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            promotion_threshold: parsed_env("PARLO_PROMOTION_THRESHOLD")?,
            demotion_threshold: parsed_env("PARLO_DEMOTION_THRESHOLD")?,
            allow_top_level_auto_demote: parsed_env("PARLO_ALLOW_TOP_LEVEL_DEMOTE")?,
        })
    }

    /// Applies the configured overrides on top of `base`.
    pub fn apply(&self, mut base: PromotionConfig) -> PromotionConfig {
        if let Some(threshold) = self.promotion_threshold {
            base.promotion_threshold = threshold;
        }
        if let Some(threshold) = self.demotion_threshold {
            base.demotion_threshold = threshold;
        }
        if let Some(allowed) = self.allow_top_level_auto_demote {
            base.allow_top_level_auto_demote = allowed;
        }
        base
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parsed_env<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) => Ok(Some(value)),
            Err(_) => Err(ConfigError::Invalid { key, value: raw }),
        },
        Err(_) => Ok(None),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Invalid { key: &'static str, value: String },
    InvalidHost { source: std::net::AddrParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid { key, value } => {
                write!(f, "{key} is set to `{value}`, which is not a usable value")
            }
            ConfigError::InvalidHost { .. } => {
                write!(f, "PARLO_HOST must be an IP address or `localhost`")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Invalid { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
