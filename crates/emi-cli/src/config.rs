//! CLI configuration.
//!
//! Settings come from an optional YAML file. An explicit `--config` path must
//! exist; otherwise `./emi.yaml` is read when present and built-in defaults
//! apply when it is not.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

use emi_core::loan::parameters::{
    DEFAULT_ANNUAL_RATE_PERCENT, DEFAULT_PRINCIPAL, DEFAULT_TERM_YEARS,
};
use emi_core::loan::{LoanParameters, DEFAULT_SCHEDULE_ROWS};
use emi_core::EmiError;

pub const DEFAULT_CONFIG_FILE: &str = "emi.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to read '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse '{path}': {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] EmiError),
}

/// Loan shown by `emi defaults`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultLoan {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub term_years: u32,
}

impl Default for DefaultLoan {
    fn default() -> Self {
        DefaultLoan {
            principal: DEFAULT_PRINCIPAL,
            annual_rate_percent: DEFAULT_ANNUAL_RATE_PERCENT,
            term_years: DEFAULT_TERM_YEARS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Schedule rows printed when `--max-rows` is not given
    pub max_rows: usize,
    pub defaults: DefaultLoan,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            max_rows: DEFAULT_SCHEDULE_ROWS,
            defaults: DefaultLoan::default(),
        }
    }
}

impl Settings {
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !Path::new(p).is_file() {
                    return Err(ConfigError::NotFound(p.to_string()));
                }
                Self::from_file(p)
            }
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => Ok(Settings::default()),
        }
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml(&contents, path)
    }

    pub fn from_yaml(contents: &str, path: &str) -> Result<Self, ConfigError> {
        let settings: Settings =
            serde_yaml::from_str(contents).map_err(|source| ConfigError::Parse {
                path: path.to_string(),
                source,
            })?;
        settings.default_parameters()?;
        Ok(settings)
    }

    pub fn default_parameters(&self) -> Result<LoanParameters, EmiError> {
        LoanParameters::new(
            self.defaults.principal,
            self.defaults.annual_rate_percent,
            self.defaults.term_years,
        )
    }
}
