//! Restaurant booking form
//!
//! Collects cuisine, party size, seating preference, additional preferences
//! and feedback, then acknowledges the booking.

use formbot_config::constants::form::FORM_NAME;
use formbot_config::FormConfig;
use formbot_core::{
    Dispatcher, Event, ExtractionStrategy, FormAction, MessageKey, SlotName, SlotValue, Tracker,
    ValidationResult,
};

use crate::catalog::CuisineCatalog;
use crate::mappings::SlotMappings;
use crate::validators::{validator_for, ValidationContext};
use crate::AgentError;

#[derive(Debug, Clone, Default)]
pub struct RestaurantForm {
    catalog: CuisineCatalog,
    mappings: SlotMappings,
}

impl RestaurantForm {
    /// Form with the built-in catalog and mappings
    pub fn new() -> Self {
        Self::default()
    }

    /// Form built from a form configuration
    ///
    /// `FormConfig::load` has already validated file-backed configs; only
    /// undeclared slot keys in the mapping overrides are rejected here.
    pub fn from_config(config: &FormConfig) -> Result<Self, AgentError> {
        let catalog = CuisineCatalog::from_names(&config.cuisines);
        let mappings = SlotMappings::default().with_overrides(config.mapping_overrides()?);

        tracing::info!(
            form = FORM_NAME,
            cuisines = catalog.len(),
            mapping_overrides = config.slot_mappings.len(),
            "Restaurant form configured"
        );

        Ok(Self { catalog, mappings })
    }
}

impl FormAction for RestaurantForm {
    fn name(&self) -> &str {
        FORM_NAME
    }

    fn required_slots(&self, _tracker: &Tracker) -> Vec<SlotName> {
        SlotName::ALL.to_vec()
    }

    fn slot_mappings(&self, slot: SlotName) -> &[ExtractionStrategy] {
        self.mappings.get(slot)
    }

    fn validate(&self, slot: SlotName, value: &SlotValue, tracker: &Tracker) -> ValidationResult {
        match validator_for(slot) {
            Some(validator) => {
                let ctx = ValidationContext {
                    catalog: &self.catalog,
                    tracker,
                };
                validator(value, &ctx)
            }
            None => ValidationResult::Accept(value.clone()),
        }
    }

    fn submit(&self, dispatcher: &mut dyn Dispatcher, tracker: &Tracker) -> Vec<Event> {
        dispatcher.utter_template(MessageKey::Submit, tracker);
        Vec::new()
    }
}
