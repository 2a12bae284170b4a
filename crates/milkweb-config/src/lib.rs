//! Configuration management for milkweb
//!
//! This module handles loading, validation, and management of
//! milkweb configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::ConfigError;

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

/// Data directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the vendor data directory
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    /// Main vendor data file name (JSON)
    #[serde(default = "default_main_file")]
    pub main_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            main_file: default_main_file(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("./data")
}

fn default_main_file() -> String {
    "vendor.json".to_string()
}

/// Organization details printed on statements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationConfig {
    /// Business name shown in page headers and statement exports
    #[serde(default = "default_org_name")]
    pub name: String,
    /// Currency glyph prefixed to formatted amounts
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for OrganizationConfig {
    fn default() -> Self {
        Self {
            name: default_org_name(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

fn default_org_name() -> String {
    "Milk Vendor".to_string()
}

fn default_currency_symbol() -> String {
    "Rs.".to_string()
}

/// Statement filter settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StatementConfig {
    /// First day of the week for the "week" quick period
    #[serde(default)]
    pub week_start: WeekStart,
    /// Quick period preselected when the statements page opens
    #[serde(default)]
    pub default_period: QuickPeriod,
}

/// Week start convention
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    /// Week runs Monday through Sunday
    Monday,
    /// Week runs Sunday through Saturday
    Sunday,
}

impl Default for WeekStart {
    fn default() -> Self {
        WeekStart::Monday
    }
}

impl std::str::FromStr for WeekStart {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monday" => Ok(WeekStart::Monday),
            "sunday" => Ok(WeekStart::Sunday),
            _ => Err(format!("Invalid week start: {}", s)),
        }
    }
}

impl std::fmt::Display for WeekStart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeekStart::Monday => write!(f, "monday"),
            WeekStart::Sunday => write!(f, "sunday"),
        }
    }
}

/// Quick period enumeration for statement date ranges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuickPeriod {
    /// Current date only
    Today,
    /// Containing calendar week
    Week,
    /// Containing calendar month
    Month,
    /// Manually entered bounds
    Custom,
}

impl Default for QuickPeriod {
    fn default() -> Self {
        QuickPeriod::Month
    }
}

impl std::str::FromStr for QuickPeriod {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "today" => Ok(QuickPeriod::Today),
            "week" => Ok(QuickPeriod::Week),
            "month" => Ok(QuickPeriod::Month),
            "custom" => Ok(QuickPeriod::Custom),
            _ => Err(format!("Invalid quick period: {}", s)),
        }
    }
}

impl std::fmt::Display for QuickPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuickPeriod::Today => write!(f, "today"),
            QuickPeriod::Week => write!(f, "week"),
            QuickPeriod::Month => write!(f, "month"),
            QuickPeriod::Custom => write!(f, "custom"),
        }
    }
}

/// Pagination settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Records per page for lists
    #[serde(default = "default_records_per_page")]
    pub records_per_page: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            records_per_page: default_records_per_page(),
        }
    }
}

fn default_records_per_page() -> usize {
    50
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Data directory settings
    #[serde(default)]
    pub data: DataConfig,
    /// Organization details
    #[serde(default)]
    pub organization: OrganizationConfig,
    /// Statement filter settings
    #[serde(default)]
    pub statement: StatementConfig,
    /// Pagination settings
    #[serde(default)]
    pub pagination: PaginationConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.to_string_lossy().to_string(),
                }
            } else {
                ConfigError::IoError
            }
        })?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::InvalidYaml { message: e.to_string() })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.pagination.records_per_page == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pagination.records_per_page".to_string(),
                reason: "Records per page must be greater than 0".to_string(),
            });
        }

        if self.organization.name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "organization.name".to_string(),
                reason: "Organization name must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Get the full path to the vendor data file
    pub fn vendor_path(&self) -> PathBuf {
        self.data.path.join(&self.data.main_file)
    }
}

// ==================== Tests ====================
