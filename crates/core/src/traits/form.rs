//! Form action trait
//!
//! The callback surface a dialogue host drives while filling a form: it asks
//! for the form name, the required slots and their extraction strategies,
//! validates each extracted candidate, and calls `submit` once every required
//! slot is set.

use crate::dispatcher::Dispatcher;
use crate::error::Result;
use crate::extraction::ExtractionStrategy;
use crate::slot::{SlotName, SlotValue};
use crate::tracker::{Event, Tracker};
use crate::validation::ValidationResult;

pub trait FormAction: Send + Sync {
    /// Unique identifier of the form
    fn name(&self) -> &str;

    /// Slots the form has to fill, in the order they are requested
    fn required_slots(&self, tracker: &Tracker) -> Vec<SlotName>;

    /// Extraction strategies for a slot, highest priority first
    fn slot_mappings(&self, slot: SlotName) -> &[ExtractionStrategy];

    /// Validate a candidate value
    ///
    /// Slots without a dedicated validator accept any value.
    fn validate(&self, _slot: SlotName, value: &SlotValue, _tracker: &Tracker) -> ValidationResult {
        ValidationResult::Accept(value.clone())
    }

    /// Called once all required slots are filled
    fn submit(&self, dispatcher: &mut dyn Dispatcher, tracker: &Tracker) -> Vec<Event>;

    /// Strategies for a slot given by name
    ///
    /// Fails for slot names the form does not declare.
    fn extraction_strategies_for(&self, slot: &str) -> Result<&[ExtractionStrategy]> {
        let slot: SlotName = slot.parse()?;
        Ok(self.slot_mappings(slot))
    }
}
