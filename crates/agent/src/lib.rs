//! Restaurant booking form
//!
//! Features:
//! - `RestaurantForm`: slot mappings, per-slot validators and submit
//! - `CuisineCatalog`: supported cuisines, overridable from config
//! - `FormRunner`: activation, extraction, validation, next-slot requests
//!   and submission for any `FormAction`

pub mod catalog;
pub mod mappings;
pub mod restaurant;
pub mod runner;
pub mod validators;

pub use catalog::CuisineCatalog;
pub use mappings::SlotMappings;
pub use restaurant::RestaurantForm;
pub use runner::FormRunner;
pub use validators::{validator_for, SlotValidator, ValidationContext};

use formbot_config::ConfigError;
use formbot_core::FormError;
use thiserror::Error;

/// Agent errors
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Form error: {0}")]
    Form(#[from] FormError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
