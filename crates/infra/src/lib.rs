//! Infrastructure layer: the shared account registry and process configuration.

pub mod bank;
pub mod config;

mod integration_tests;

pub use bank::{Bank, BankError, RecordEnvelope};
pub use config::{BankConfig, ConfigError, OutputFormat};
