//! Configuration management for motormart
//!
//! Loads client configuration from environment variables (and a `.env` file
//! when present), with support for different environments.

use std::env;
use std::path::PathBuf;
use thiserror::Error;

const DEV_PAYLOAD_SECRET: &str = "development-payload-secret-change-in-production";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid environment value: {0}")]
    InvalidValue(String),
}

/// Application environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Parse environment from string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "prod" | "production" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidValue(format!(
                "Invalid environment: '{}'. Expected: dev, staging, or prod",
                s
            ))),
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// GraphQL gateway endpoint
    pub gateway_url: String,

    /// Shared secret for sealing outbound payloads
    pub payload_secret: String,

    /// Current environment
    pub environment: Environment,

    /// Directory holding locally persisted state
    pub storage_dir: PathBuf,

    /// Per-request timeout for gateway calls
    pub request_timeout_secs: u64,

    /// Log level (RUST_LOG)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .map(|s| Environment::parse(&s))
            .unwrap_or(Ok(Environment::Development))?;

        let gateway_url = env::var("GATEWAY_URL")
            .map_err(|_| ConfigError::MissingEnvVar("GATEWAY_URL".to_string()))?;

        let payload_secret = match env::var("PAYLOAD_SECRET") {
            Ok(secret) => secret,
            Err(_) if environment.is_production() => {
                return Err(ConfigError::MissingEnvVar("PAYLOAD_SECRET".to_string()))
            }
            Err(_) => DEV_PAYLOAD_SECRET.to_string(),
        };

        let storage_dir = env::var("STORAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".motormart"));

        let request_timeout_secs = env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .map_err(|_| {
                ConfigError::InvalidValue("REQUEST_TIMEOUT_SECS must be a number".to_string())
            })?;

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            gateway_url,
            payload_secret,
            environment,
            storage_dir,
            request_timeout_secs,
            log_level,
        })
    }

    /// Gateway URL with any embedded credentials masked, for logging
    pub fn gateway_url_masked(&self) -> String {
        if let Some(at_pos) = self.gateway_url.find('@') {
            if let Some(colon_pos) = self.gateway_url[..at_pos].rfind(':') {
                let prefix = &self.gateway_url[..colon_pos + 1];
                let suffix = &self.gateway_url[at_pos..];
                return format!("{}****{}", prefix, suffix);
            }
        }
        self.gateway_url.clone()
    }
}
