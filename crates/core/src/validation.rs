//! Validation outcomes and the message keys a form may emit

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::slot::{SlotName, SlotValue};

/// Template keys a form selects; rendering is left to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKey {
    WrongCuisine,
    WrongNumPeople,
    WrongOutdoorSeating,
    Submit,
    /// Prompt for a slot
    AskSlot(SlotName),
}

impl MessageKey {
    /// Short key, e.g. `wrong_cuisine` or `ask_num_people`
    pub fn as_str(&self) -> String {
        match self {
            MessageKey::WrongCuisine => "wrong_cuisine".to_string(),
            MessageKey::WrongNumPeople => "wrong_num_people".to_string(),
            MessageKey::WrongOutdoorSeating => "wrong_outdoor_seating".to_string(),
            MessageKey::Submit => "submit".to_string(),
            MessageKey::AskSlot(slot) => format!("ask_{}", slot),
        }
    }

    /// Host template name, e.g. `utter_wrong_cuisine`
    pub fn template(&self) -> String {
        format!("utter_{}", self.as_str())
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template())
    }
}

/// Result of validating one slot candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Keep this (possibly normalized) value
    Accept(SlotValue),
    /// Reset the slot and tell the user why
    Reject(MessageKey),
}

impl ValidationResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationResult::Accept(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_names() {
        assert_eq!(MessageKey::WrongCuisine.template(), "utter_wrong_cuisine");
        assert_eq!(MessageKey::WrongNumPeople.as_str(), "wrong_num_people");
        assert_eq!(MessageKey::WrongOutdoorSeating.template(), "utter_wrong_outdoor_seating");
        assert_eq!(MessageKey::Submit.template(), "utter_submit");
        assert_eq!(
            MessageKey::AskSlot(SlotName::OutdoorSeating).template(),
            "utter_ask_outdoor_seating"
        );
    }
}
