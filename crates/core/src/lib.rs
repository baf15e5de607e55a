//! Core types and traits for form-filling dialogue actions
//!
//! This crate provides the types shared by every other crate:
//! - Slot names and the closed slot value type
//! - Extraction strategies and their intent filters
//! - Tracker snapshot, parsed user messages and form events
//! - Validation outcomes and message keys
//! - The `FormAction` trait and the dispatcher abstraction
//! - Error types

pub mod dispatcher;
pub mod error;
pub mod extraction;
pub mod message;
pub mod slot;
pub mod tracker;
pub mod traits;
pub mod validation;

pub use dispatcher::{CollectingDispatcher, DispatchedMessage, Dispatcher};
pub use error::{FormError, Result};
pub use extraction::{first_candidate, ExtractionStrategy};
pub use message::{Entity, IntentRef, ParsedMessage};
pub use slot::{SlotName, SlotValue, REQUESTED_SLOT};
pub use tracker::{ActiveForm, Event, Tracker, ACTION_LISTEN};
pub use traits::FormAction;
pub use validation::{MessageKey, ValidationResult};
