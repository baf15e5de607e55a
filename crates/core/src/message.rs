//! Parsed user messages as delivered by the NLU layer

use serde::{Deserialize, Serialize};

use crate::slot::SlotValue;

/// Classified intent of a user message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentRef {
    pub name: String,
    #[serde(default = "default_confidence")]
    pub confidence: f32,
}

fn default_confidence() -> f32 {
    1.0
}

/// An entity extracted from a user message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity type (e.g., "cuisine", "number")
    pub entity: String,
    /// Extracted value
    pub value: SlotValue,
    /// Character offsets in the message text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<usize>,
    #[serde(default = "default_confidence")]
    pub confidence: f32,
}

impl Entity {
    pub fn new(entity: impl Into<String>, value: impl Into<SlotValue>) -> Self {
        Self {
            entity: entity.into(),
            value: value.into(),
            start: None,
            end: None,
            confidence: 1.0,
        }
    }
}

/// Latest user message with its NLU parse
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedMessage {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub intent: Option<IntentRef>,
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl ParsedMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            intent: None,
            entities: Vec::new(),
        }
    }

    pub fn with_intent(mut self, intent: impl Into<String>) -> Self {
        self.intent = Some(IntentRef {
            name: intent.into(),
            confidence: 1.0,
        });
        self
    }

    pub fn with_entity(mut self, entity: impl Into<String>, value: impl Into<SlotValue>) -> Self {
        self.entities.push(Entity::new(entity, value));
        self
    }

    /// Name of the classified intent, if any
    pub fn intent_name(&self) -> Option<&str> {
        self.intent.as_ref().map(|i| i.name.as_str())
    }

    /// Value of the first entity with the given name
    pub fn entity_value(&self, name: &str) -> Option<&SlotValue> {
        self.entities
            .iter()
            .find(|e| e.entity == name)
            .map(|e| &e.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_entity_wins() {
        let msg = ParsedMessage::new("3 or 4 people")
            .with_entity("number", "3")
            .with_entity("number", "4");

        assert_eq!(msg.entity_value("number"), Some(&SlotValue::text("3")));
        assert_eq!(msg.entity_value("cuisine"), None);
    }

    #[test]
    fn test_deserialize_nlu_parse() {
        let json = r#"{
            "text": "a table for 4",
            "intent": {"name": "inform", "confidence": 0.93},
            "entities": [{"entity": "number", "value": 4, "start": 12, "end": 13}]
        }"#;
        let msg: ParsedMessage = serde_json::from_str(json).unwrap();

        assert_eq!(msg.intent_name(), Some("inform"));
        assert_eq!(msg.entity_value("number"), Some(&SlotValue::text("4")));
        assert_eq!(msg.entities[0].start, Some(12));
    }

    #[test]
    fn test_missing_fields_default() {
        let msg: ParsedMessage = serde_yaml::from_str("text: hello").unwrap();
        assert_eq!(msg.intent_name(), None);
        assert!(msg.entities.is_empty());
    }
}
