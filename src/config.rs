//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL (required for Postgres storage)
    pub database_url: Option<String>,

    /// Maximum database connections in pool
    pub database_max_connections: u32,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Services mounted by this process
    pub services: Vec<ServiceKind>,

    /// Repository backend
    pub storage: StorageKind,

    /// Reported by /info
    pub app_name: String,
    pub app_version: String,

    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage = match lookup("BANK_STORAGE") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BANK_STORAGE"))?,
            None => StorageKind::Postgres,
        };

        let database_url = lookup("DATABASE_URL");
        if storage == StorageKind::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingEnv("DATABASE_URL"));
        }

        let database_max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS"))?;

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        let services = parse_services(&lookup("BANK_SERVICES").unwrap_or_else(|| "all".to_string()))?;

        let app_name = lookup("APP_NAME").unwrap_or_else(|| "bank-services".to_string());
        let app_version =
            lookup("APP_VERSION").unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

        let log_format = match lookup("LOG_FORMAT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidValue("LOG_FORMAT"))?,
            None => LogFormat::Pretty,
        };

        Ok(Self {
            database_url,
            database_max_connections,
            host,
            port,
            environment,
            services,
            storage,
            app_name,
            app_version,
            log_format,
        })
    }
}

/// Parse a comma separated service list; `all` selects every service.
fn parse_services(value: &str) -> Result<Vec<ServiceKind>, ConfigError> {
    if value.trim().eq_ignore_ascii_case("all") {
        return Ok(ServiceKind::ALL.to_vec());
    }

    let mut services = Vec::new();
    for name in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let kind: ServiceKind = name
            .parse()
            .map_err(|_| ConfigError::InvalidValue("BANK_SERVICES"))?;
        if !services.contains(&kind) {
            services.push(kind);
        }
    }

    if services.is_empty() {
        return Err(ConfigError::InvalidValue("BANK_SERVICES"));
    }
    Ok(services)
}

// =========================================================================
// Services
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    Account,
    AntiFraud,
    Authorization,
    History,
    PublicInfo,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 5] = [
        ServiceKind::Account,
        ServiceKind::AntiFraud,
        ServiceKind::Authorization,
        ServiceKind::History,
        ServiceKind::PublicInfo,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ServiceKind::Account => "account",
            ServiceKind::AntiFraud => "anti-fraud",
            ServiceKind::Authorization => "authorization",
            ServiceKind::History => "history",
            ServiceKind::PublicInfo => "public-info",
        }
    }

    /// URL prefix the service router is nested under
    pub fn context_path(&self) -> &'static str {
        match self {
            ServiceKind::Account => "/api/account",
            ServiceKind::AntiFraud => "/api/anti-fraud",
            ServiceKind::Authorization => "/api/authorization",
            ServiceKind::History => "/api/history",
            ServiceKind::PublicInfo => "/api/public-info",
        }
    }

    /// Postgres schema holding the service's tables
    pub fn schema(&self) -> &'static str {
        match self {
            ServiceKind::Account => "account",
            ServiceKind::AntiFraud => "anti_fraud",
            ServiceKind::Authorization => "auth",
            ServiceKind::History => "history",
            ServiceKind::PublicInfo => "public_bank_information",
        }
    }

    pub fn tables(&self) -> &'static [&'static str] {
        match self {
            ServiceKind::Account => &["account_details", "audit"],
            ServiceKind::AntiFraud => &[
                "suspicious_account_transfers",
                "suspicious_card_transfer",
                "suspicious_phone_transfers",
                "audit",
            ],
            ServiceKind::Authorization => &["users", "audit"],
            ServiceKind::History => &["history"],
            ServiceKind::PublicInfo => &[
                "branch",
                "atm",
                "bank_details",
                "license",
                "certificate",
                "audit",
            ],
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ServiceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        ServiceKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| format!("unknown service '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Postgres,
    Memory,
}

impl FromStr for StorageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" => Ok(StorageKind::Postgres),
            "memory" => Ok(StorageKind::Memory),
            other => Err(format!("unknown storage '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
