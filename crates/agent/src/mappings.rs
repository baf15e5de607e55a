//! Slot-to-extraction-strategy mappings
//!
//! Order inside each list is priority order: the first strategy that yields
//! a candidate for the latest message wins.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::BTreeMap;

use formbot_config::constants::{form::NO_ADDITIONAL_PREFERENCES, intents};
use formbot_core::{ExtractionStrategy, SlotName};

static DEFAULT_MAPPINGS: Lazy<SlotMappings> = Lazy::new(|| {
    use ExtractionStrategy as S;

    let mut slots = BTreeMap::new();
    slots.insert(
        SlotName::Cuisine,
        vec![S::from_entity("cuisine").without_intents([intents::CHITCHAT])],
    );
    slots.insert(
        SlotName::NumPeople,
        vec![
            S::from_entity("num_people")
                .with_intents([intents::INFORM, intents::REQUEST_RESTAURANT]),
            S::from_entity("number"),
        ],
    );
    slots.insert(
        SlotName::OutdoorSeating,
        vec![
            S::from_entity("seating"),
            S::from_intent(intents::AFFIRM, true),
            S::from_intent(intents::DENY, false),
        ],
    );
    slots.insert(
        SlotName::Preferences,
        vec![
            S::from_intent(intents::DENY, NO_ADDITIONAL_PREFERENCES),
            S::from_text().without_intents([intents::AFFIRM]),
        ],
    );
    slots.insert(
        SlotName::Feedback,
        vec![S::from_entity("feedback"), S::from_text()],
    );

    SlotMappings { slots }
});

/// Strategy lists for every declared slot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotMappings {
    slots: BTreeMap<SlotName, Vec<ExtractionStrategy>>,
}

impl SlotMappings {
    /// Replace the lists of the given slots, keeping the rest
    pub fn with_overrides<I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (SlotName, Vec<ExtractionStrategy>)>,
    {
        for (slot, strategies) in overrides {
            tracing::debug!(slot = %slot, strategies = strategies.len(), "Overriding slot mapping");
            self.slots.insert(slot, strategies);
        }
        self
    }

    pub fn get(&self, slot: SlotName) -> &[ExtractionStrategy] {
        self.slots.get(&slot).map(|v| v.as_slice()).unwrap_or(&[])
    }
}

impl Default for SlotMappings {
    fn default() -> Self {
        DEFAULT_MAPPINGS.clone()
    }
}
