//! Configuration loading and representation.
//!
//! Everything comes from environment variables; unset variables fall back to defaults,
//! malformed ones are rejected.

use std::str::FromStr;

use thiserror::Error;

use banksys_observability::LogFormat;

pub const LOG_FORMAT_VAR: &str = "BANKSYS_LOG_FORMAT";
pub const OUTPUT_VAR: &str = "BANKSYS_OUTPUT";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },
}

/// How statements are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BankConfig {
    pub log_format: LogFormat,
    pub output: OutputFormat,
}

impl BankConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source (used by tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = BankConfig::default();

        if let Some(value) = lookup(LOG_FORMAT_VAR) {
            config.log_format = value.parse().map_err(|_| ConfigError::InvalidValue {
                var: LOG_FORMAT_VAR,
                value: value.clone(),
            })?;
        }

        if let Some(value) = lookup(OUTPUT_VAR) {
            config.output = value.parse().map_err(|_| ConfigError::InvalidValue {
                var: OUTPUT_VAR,
                value: value.clone(),
            })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = BankConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[test]
    fn reads_both_variables() {
        let config =
            BankConfig::from_lookup(lookup(&[(LOG_FORMAT_VAR, "text"), (OUTPUT_VAR, "JSON")]))
                .unwrap();
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[test]
    fn rejects_unknown_values() {
        let err = BankConfig::from_lookup(lookup(&[(OUTPUT_VAR, "xml")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                var: OUTPUT_VAR,
                value: "xml".to_string()
            }
        );
    }
}
