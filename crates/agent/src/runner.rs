//! Form run loop
//!
//! One `run` call per host invocation:
//!
//! ```text
//! activate (if needed) ──► validate user turn ──► request next slot
//!       │                        │                       │
//!  Form(name) +            SlotSet per              SlotSet(requested_slot)
//!  prefilled checks        extracted slot           or submit + deactivate
//! ```
//!
//! Rejected candidates reset their slot to `None`, so the same slot is asked
//! for again on the next run.

use std::collections::BTreeMap;

use formbot_core::{
    first_candidate, Dispatcher, Event, FormAction, FormError, MessageKey, SlotName, SlotValue,
    Tracker, ValidationResult,
};

/// Drives a `FormAction` through one invocation
pub struct FormRunner<F> {
    form: F,
}

impl<F: FormAction> FormRunner<F> {
    pub fn new(form: F) -> Self {
        Self { form }
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    /// Run the form against the current conversation state
    ///
    /// Fails with `ExecutionRejected` when the user turn yields nothing for
    /// the requested slot or any other slot, leaving the host to pick another
    /// action.
    pub fn run(
        &self,
        dispatcher: &mut dyn Dispatcher,
        tracker: &Tracker,
    ) -> Result<Vec<Event>, FormError> {
        let span = tracing::debug_span!(
            "form_run",
            form = self.form.name(),
            sender = %tracker.sender_id
        );
        let _guard = span.enter();

        let mut events = self.activate_if_required(dispatcher, tracker);
        events.extend(self.validate_if_required(dispatcher, tracker)?);

        let mut scratch = tracker.clone();
        scratch.apply_all(&events);

        match self.request_next_slot(dispatcher, &scratch) {
            Some(request) => events.extend(request),
            None => {
                tracing::info!(form = self.form.name(), "All required slots filled, submitting");
                events.extend(self.form.submit(dispatcher, &scratch));
                events.extend(self.deactivate());
            }
        }

        Ok(events)
    }

    fn activate_if_required(&self, dispatcher: &mut dyn Dispatcher, tracker: &Tracker) -> Vec<Event> {
        let active = tracker.active_form.as_ref().map(|f| f.name.as_str());
        if active == Some(self.form.name()) {
            tracing::debug!("Form is active");
            return Vec::new();
        }

        tracing::debug!(previous = ?active, "Activating form");
        let mut events = vec![Event::Form {
            name: Some(self.form.name().to_string()),
        }];

        let prefilled: BTreeMap<SlotName, SlotValue> = self
            .form
            .required_slots(tracker)
            .into_iter()
            .filter_map(|slot| tracker.slot(slot).map(|v| (slot, v.clone())))
            .collect();

        if !prefilled.is_empty() {
            tracing::debug!(slots = ?prefilled.keys().collect::<Vec<_>>(), "Validating pre-filled slots");
            events.extend(self.validate_slots(prefilled, dispatcher, tracker));
        }

        events
    }

    fn validate_if_required(
        &self,
        dispatcher: &mut dyn Dispatcher,
        tracker: &Tracker,
    ) -> Result<Vec<Event>, FormError> {
        let validate = tracker.active_form.as_ref().map_or(true, |f| f.validate);
        if tracker.after_user_turn() && validate {
            self.validate(dispatcher, tracker)
        } else {
            tracing::debug!("Skipping validation");
            Ok(Vec::new())
        }
    }

    /// Extract candidates from the latest message and validate them
    fn validate(
        &self,
        dispatcher: &mut dyn Dispatcher,
        tracker: &Tracker,
    ) -> Result<Vec<Event>, FormError> {
        let requested = tracker
            .requested_slot()
            .map(|name| name.parse::<SlotName>())
            .transpose()?;

        let mut slot_values = self.extract_other_slots(tracker, requested);

        if let Some(slot) = requested {
            if let Some(value) = self.extract_requested_slot(tracker, slot) {
                slot_values.insert(slot, value);
            }
            if slot_values.is_empty() {
                tracing::debug!(slot = %slot, "Nothing extracted for requested slot");
                return Err(FormError::ExecutionRejected {
                    form: self.form.name().to_string(),
                    slot: slot.to_string(),
                });
            }
        }

        tracing::debug!(extracted = ?slot_values, "Validating extracted slots");
        Ok(self.validate_slots(slot_values, dispatcher, tracker))
    }

    /// Entity-only extraction for slots other than the requested one
    ///
    /// Only strategies that read an entity named after the slot itself are
    /// considered, so free text never leaks into unrelated slots.
    fn extract_other_slots(
        &self,
        tracker: &Tracker,
        requested: Option<SlotName>,
    ) -> BTreeMap<SlotName, SlotValue> {
        let message = &tracker.latest_message;
        let mut values = BTreeMap::new();

        for slot in self.form.required_slots(tracker) {
            if Some(slot) == requested {
                continue;
            }
            let value = self
                .form
                .slot_mappings(slot)
                .iter()
                .filter(|s| s.entity() == Some(slot.as_str()))
                .find_map(|s| s.extract(message));
            if let Some(value) = value {
                values.insert(slot, value);
            }
        }

        values
    }

    fn extract_requested_slot(&self, tracker: &Tracker, slot: SlotName) -> Option<SlotValue> {
        tracing::debug!(slot = %slot, "Trying to extract requested slot");
        let value = first_candidate(self.form.slot_mappings(slot), &tracker.latest_message);
        if value.is_some() {
            tracing::debug!(slot = %slot, value = ?value, "Extracted requested slot");
        }
        value
    }

    fn validate_slots(
        &self,
        slot_values: BTreeMap<SlotName, SlotValue>,
        dispatcher: &mut dyn Dispatcher,
        tracker: &Tracker,
    ) -> Vec<Event> {
        slot_values
            .into_iter()
            .map(|(slot, value)| match self.form.validate(slot, &value, tracker) {
                ValidationResult::Accept(accepted) => {
                    tracing::debug!(slot = %slot, value = %accepted, "Slot accepted");
                    Event::slot_set(slot, Some(accepted))
                }
                ValidationResult::Reject(key) => {
                    tracing::info!(slot = %slot, value = %value, reason = %key, "Slot rejected");
                    dispatcher.utter_template(key, tracker);
                    Event::slot_set(slot, None)
                }
            })
            .collect()
    }

    /// Ask for the first unset required slot, in declared order
    fn request_next_slot(
        &self,
        dispatcher: &mut dyn Dispatcher,
        tracker: &Tracker,
    ) -> Option<Vec<Event>> {
        let next = self
            .form
            .required_slots(tracker)
            .into_iter()
            .find(|slot| tracker.slot(*slot).is_none())?;

        tracing::debug!(slot = %next, "Requesting next slot");
        dispatcher.utter_template(MessageKey::AskSlot(next), tracker);
        Some(vec![Event::requested_slot(Some(next))])
    }

    fn deactivate(&self) -> Vec<Event> {
        tracing::debug!(form = self.form.name(), "Deactivating form");
        vec![Event::Form { name: None }, Event::requested_slot(None)]
    }
}
