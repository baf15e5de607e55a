//! Conversation state snapshot and the events a form returns
//!
//! The host owns conversation state. A form reads a `Tracker` and answers
//! with `Event`s; the host (or a test driver) applies them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::message::ParsedMessage;
use crate::slot::{SlotName, SlotValue, REQUESTED_SLOT};

/// Action name the host records while waiting for user input
pub const ACTION_LISTEN: &str = "action_listen";

/// The form currently driving the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveForm {
    pub name: String,
    /// Whether user input should be validated on the next run
    #[serde(default = "default_true")]
    pub validate: bool,
    /// Whether the last run was rejected
    #[serde(default)]
    pub rejected: bool,
}

fn default_true() -> bool {
    true
}

impl ActiveForm {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            validate: true,
            rejected: false,
        }
    }
}

/// Events returned by a form run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// Set a slot; `None` resets it to unset
    SlotSet {
        name: String,
        value: Option<SlotValue>,
    },
    /// Activate a form, or deactivate with `None`
    Form { name: Option<String> },
}

impl Event {
    pub fn slot_set(slot: SlotName, value: Option<SlotValue>) -> Self {
        Event::SlotSet {
            name: slot.as_str().to_string(),
            value,
        }
    }

    pub fn requested_slot(slot: Option<SlotName>) -> Self {
        Event::SlotSet {
            name: REQUESTED_SLOT.to_string(),
            value: slot.map(|s| SlotValue::text(s.as_str())),
        }
    }

    /// Whether this event changes a slot other than the bookkeeping slot
    pub fn is_slot_mutation(&self) -> bool {
        matches!(self, Event::SlotSet { name, .. } if name != REQUESTED_SLOT)
    }
}

/// Read-only view of one conversation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tracker {
    #[serde(default)]
    pub sender_id: String,
    #[serde(default)]
    pub slots: BTreeMap<String, Option<SlotValue>>,
    #[serde(default)]
    pub latest_message: ParsedMessage,
    #[serde(default)]
    pub latest_action_name: Option<String>,
    #[serde(default)]
    pub active_form: Option<ActiveForm>,
}

impl Tracker {
    pub fn new(sender_id: impl Into<String>) -> Self {
        Self {
            sender_id: sender_id.into(),
            ..Default::default()
        }
    }

    /// Record a new user turn
    pub fn with_user_message(mut self, message: ParsedMessage) -> Self {
        self.set_user_message(message);
        self
    }

    pub fn set_user_message(&mut self, message: ParsedMessage) {
        self.latest_message = message;
        self.latest_action_name = Some(ACTION_LISTEN.to_string());
    }

    pub fn with_slot(mut self, slot: SlotName, value: impl Into<SlotValue>) -> Self {
        self.slots.insert(slot.as_str().to_string(), Some(value.into()));
        self
    }

    pub fn with_active_form(mut self, form: ActiveForm) -> Self {
        self.active_form = Some(form);
        self
    }

    /// Current value of a slot; unset and reset slots both read as `None`
    pub fn get_slot(&self, name: &str) -> Option<&SlotValue> {
        self.slots.get(name).and_then(|v| v.as_ref())
    }

    pub fn slot(&self, slot: SlotName) -> Option<&SlotValue> {
        self.get_slot(slot.as_str())
    }

    /// The slot the form asked for last, as recorded in `requested_slot`
    pub fn requested_slot(&self) -> Option<&str> {
        self.get_slot(REQUESTED_SLOT).and_then(|v| v.as_text())
    }

    /// Whether the latest action was waiting for user input
    pub fn after_user_turn(&self) -> bool {
        self.latest_action_name.as_deref() == Some(ACTION_LISTEN)
    }

    pub fn apply(&mut self, event: &Event) {
        match event {
            Event::SlotSet { name, value } => {
                tracing::trace!(slot = %name, value = ?value, "Applying slot event");
                self.slots.insert(name.clone(), value.clone());
            }
            Event::Form { name: Some(name) } => {
                self.active_form = Some(ActiveForm::new(name.clone()));
            }
            Event::Form { name: None } => {
                self.active_form = None;
            }
        }
    }

    pub fn apply_all<'a, I>(&mut self, events: I)
    where
        I: IntoIterator<Item = &'a Event>,
    {
        for event in events {
            self.apply(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_and_reset_read_as_none() {
        let mut tracker = Tracker::new("user-1");
        assert!(tracker.slot(SlotName::Cuisine).is_none());

        tracker.apply(&Event::slot_set(SlotName::Cuisine, Some("greek".into())));
        assert_eq!(tracker.slot(SlotName::Cuisine), Some(&SlotValue::text("greek")));

        tracker.apply(&Event::slot_set(SlotName::Cuisine, None));
        assert!(tracker.slot(SlotName::Cuisine).is_none());
        assert!(tracker.slots.contains_key("cuisine"));
    }

    #[test]
    fn test_requested_slot_round_trip() {
        let mut tracker = Tracker::new("user-1");
        tracker.apply(&Event::requested_slot(Some(SlotName::NumPeople)));
        assert_eq!(tracker.requested_slot(), Some("num_people"));

        tracker.apply(&Event::requested_slot(None));
        assert_eq!(tracker.requested_slot(), None);
    }

    #[test]
    fn test_form_activation_events() {
        let mut tracker = Tracker::new("user-1");
        tracker.apply(&Event::Form {
            name: Some("restaurant_form".to_string()),
        });
        let form = tracker.active_form.as_ref().unwrap();
        assert_eq!(form.name, "restaurant_form");
        assert!(form.validate);

        tracker.apply(&Event::Form { name: None });
        assert!(tracker.active_form.is_none());
    }

    #[test]
    fn test_user_turn_marks_listen() {
        let tracker = Tracker::new("user-1").with_user_message(ParsedMessage::new("hi"));
        assert!(tracker.after_user_turn());
    }

    #[test]
    fn test_slot_mutation_excludes_bookkeeping() {
        assert!(Event::slot_set(SlotName::Feedback, None).is_slot_mutation());
        assert!(!Event::requested_slot(None).is_slot_mutation());
        assert!(!Event::Form { name: None }.is_slot_mutation());
    }

    #[test]
    fn test_event_serialization() {
        let json = serde_json::to_value(Event::slot_set(SlotName::OutdoorSeating, Some(true.into())))
            .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"event": "slot_set", "name": "outdoor_seating", "value": true})
        );
    }
}
