//! Configuration management for formbot
//!
//! Supports loading configuration from:
//! - YAML/TOML settings files (`config/default.*`, `config/{env}.*`)
//! - Environment variables (`FORMBOT__` prefix)
//! - A form file with the cuisine catalog, slot mapping overrides and
//!   response templates
//!
//! Form files are checked at startup by `ConfigValidator`; a form file that
//! names an undeclared slot is rejected before any conversation runs.

pub mod constants;
pub mod form;
pub mod settings;
pub mod validator;

pub use form::FormConfig;
pub use settings::{
    load_settings, load_settings_from, ObservabilityConfig, RuntimeEnvironment, Settings,
};
pub use validator::{
    ConfigValidator, ValidationCategory, ValidationError, ValidationReport, ValidationSeverity,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Environment error: {0}")]
    Environment(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<formbot_core::FormError> for ConfigError {
    fn from(err: formbot_core::FormError) -> Self {
        match err {
            formbot_core::FormError::UnknownSlot(slot) => ConfigError::InvalidValue {
                field: format!("slot_mappings.{}", slot),
                message: "slot is not declared by the form".to_string(),
            },
            other => ConfigError::InvalidValue {
                field: "form".to_string(),
                message: other.to_string(),
            },
        }
    }
}
