//! Turn-by-turn replay of a script through the form

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use formbot_agent::{FormRunner, RestaurantForm};
use formbot_core::{
    CollectingDispatcher, Event, FormAction, FormError, ParsedMessage, SlotName, Tracker,
};

/// What one user turn produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnOutcome {
    /// Dispatched messages, rendered through the configured responses
    pub replies: Vec<String>,
    pub events: Vec<Event>,
    /// Requested slot the form could not extract anything for
    pub rejected: Option<String>,
}

/// Conversation state carried across turns
pub struct Replay {
    runner: FormRunner<RestaurantForm>,
    responses: BTreeMap<String, String>,
    tracker: Tracker,
}

impl Replay {
    pub fn new(form: RestaurantForm, responses: BTreeMap<String, String>) -> Self {
        Self {
            runner: FormRunner::new(form),
            responses,
            tracker: Tracker::new("cli"),
        }
    }

    pub fn with_sender(mut self, sender_id: impl Into<String>) -> Self {
        self.tracker.sender_id = sender_id.into();
        self
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    /// Run the form for one user turn and apply its events
    ///
    /// A rejected turn leaves the tracker untouched apart from the new
    /// message; only configuration problems are returned as errors.
    pub fn turn(&mut self, message: ParsedMessage) -> Result<TurnOutcome, FormError> {
        self.tracker.set_user_message(message);
        let mut dispatcher = CollectingDispatcher::new();

        match self.runner.run(&mut dispatcher, &self.tracker) {
            Ok(events) => {
                self.tracker.apply_all(&events);
                let replies = dispatcher
                    .drain()
                    .into_iter()
                    .map(|m| self.render(m.template))
                    .collect();
                Ok(TurnOutcome {
                    replies,
                    events,
                    rejected: None,
                })
            }
            Err(FormError::ExecutionRejected { form, slot }) => {
                tracing::warn!(
                    form = %form,
                    slot = %slot,
                    text = %self.tracker.latest_message.text,
                    "Form rejected the turn"
                );
                Ok(TurnOutcome {
                    rejected: Some(slot),
                    ..Default::default()
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Values of every required slot, `null` when unset
    pub fn slots(&self) -> Value {
        let form = self.runner.form();
        let slots: Map<String, Value> = form
            .required_slots(&self.tracker)
            .into_iter()
            .map(|slot: SlotName| {
                let value = self
                    .tracker
                    .slot(slot)
                    .and_then(|v| serde_json::to_value(v).ok())
                    .unwrap_or(Value::Null);
                (slot.to_string(), value)
            })
            .collect();
        Value::Object(slots)
    }

    pub fn is_form_active(&self) -> bool {
        self.tracker.active_form.is_some()
    }

    fn render(&self, template: String) -> String {
        match self.responses.get(&template) {
            Some(text) => text.clone(),
            None => template,
        }
    }
}
