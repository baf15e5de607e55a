//! Slot extraction strategies
//!
//! A slot is mapped to an ordered list of strategies. Each strategy reads one
//! source in the latest user message (an entity, the intent, or the raw
//! text) and is gated by optional intent filters. The first strategy that
//! yields a value wins.

use serde::{Deserialize, Serialize};

use crate::message::ParsedMessage;
use crate::slot::SlotValue;

/// How to derive a slot candidate from a parsed user message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExtractionStrategy {
    /// Take the value of a named entity
    FromEntity {
        entity: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        intent: Vec<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        not_intent: Vec<String>,
    },
    /// Assign a literal value when the message has the given intent
    FromIntent { intent: String, value: SlotValue },
    /// Take the whole message text
    FromText {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        intent: Vec<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        not_intent: Vec<String>,
    },
}

impl ExtractionStrategy {
    pub fn from_entity(entity: impl Into<String>) -> Self {
        ExtractionStrategy::FromEntity {
            entity: entity.into(),
            intent: Vec::new(),
            not_intent: Vec::new(),
        }
    }

    pub fn from_intent(intent: impl Into<String>, value: impl Into<SlotValue>) -> Self {
        ExtractionStrategy::FromIntent {
            intent: intent.into(),
            value: value.into(),
        }
    }

    pub fn from_text() -> Self {
        ExtractionStrategy::FromText {
            intent: Vec::new(),
            not_intent: Vec::new(),
        }
    }

    /// Restrict the strategy to messages with one of these intents
    pub fn with_intents<I, S>(mut self, intents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let ExtractionStrategy::FromEntity { intent, .. }
        | ExtractionStrategy::FromText { intent, .. } = &mut self
        {
            intent.extend(intents.into_iter().map(Into::into));
        }
        self
    }

    /// Exclude messages with any of these intents
    pub fn without_intents<I, S>(mut self, intents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let ExtractionStrategy::FromEntity { not_intent, .. }
        | ExtractionStrategy::FromText { not_intent, .. } = &mut self
        {
            not_intent.extend(intents.into_iter().map(Into::into));
        }
        self
    }

    /// Whether the intent filters admit this message
    ///
    /// With no intent list, any intent outside `not_intent` passes. With an
    /// intent list, only those intents pass.
    pub fn intent_is_desired(&self, message: &ParsedMessage) -> bool {
        let current = message.intent_name();
        match self {
            ExtractionStrategy::FromIntent { intent, .. } => current == Some(intent.as_str()),
            ExtractionStrategy::FromEntity {
                intent, not_intent, ..
            }
            | ExtractionStrategy::FromText { intent, not_intent } => {
                let listed = |names: &[String]| {
                    current.map_or(false, |c| names.iter().any(|n| n == c))
                };
                (intent.is_empty() && !listed(not_intent.as_slice())) || listed(intent.as_slice())
            }
        }
    }

    /// Entity this strategy reads, if it is an entity strategy
    pub fn entity(&self) -> Option<&str> {
        match self {
            ExtractionStrategy::FromEntity { entity, .. } => Some(entity),
            _ => None,
        }
    }

    /// Apply the strategy to a message
    ///
    /// Returns `None` when the filters reject the message or the source is
    /// absent. Empty text, from the message or an entity, never counts as a
    /// candidate.
    pub fn extract(&self, message: &ParsedMessage) -> Option<SlotValue> {
        if !self.intent_is_desired(message) {
            return None;
        }
        match self {
            ExtractionStrategy::FromEntity { entity, .. } => message
                .entity_value(entity)
                .filter(|value| !value.is_empty())
                .cloned(),
            ExtractionStrategy::FromIntent { value, .. } => Some(value.clone()),
            ExtractionStrategy::FromText { .. } => {
                if message.text.is_empty() {
                    None
                } else {
                    Some(SlotValue::Text(message.text.clone()))
                }
            }
        }
    }
}

/// Run strategies in order and return the first candidate
pub fn first_candidate(
    strategies: &[ExtractionStrategy],
    message: &ParsedMessage,
) -> Option<SlotValue> {
    strategies.iter().find_map(|s| s.extract(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(intent: &str) -> ParsedMessage {
        ParsedMessage::new("some text").with_intent(intent)
    }

    #[test]
    fn test_not_intent_filter() {
        let strategy = ExtractionStrategy::from_entity("cuisine").without_intents(["chitchat"]);
        assert!(strategy.intent_is_desired(&msg("inform")));
        assert!(!strategy.intent_is_desired(&msg("chitchat")));
    }

    #[test]
    fn test_intent_filter() {
        let strategy =
            ExtractionStrategy::from_entity("num_people").with_intents(["inform", "request_restaurant"]);
        assert!(strategy.intent_is_desired(&msg("inform")));
        assert!(strategy.intent_is_desired(&msg("request_restaurant")));
        assert!(!strategy.intent_is_desired(&msg("greet")));
        assert!(!strategy.intent_is_desired(&ParsedMessage::new("no intent")));
    }

    #[test]
    fn test_no_filter_accepts_missing_intent() {
        let strategy = ExtractionStrategy::from_text();
        assert!(strategy.intent_is_desired(&ParsedMessage::new("hello")));
    }

    #[test]
    fn test_from_intent_requires_exact_intent() {
        let strategy = ExtractionStrategy::from_intent("affirm", true);
        assert_eq!(strategy.extract(&msg("affirm")), Some(SlotValue::Bool(true)));
        assert_eq!(strategy.extract(&msg("deny")), None);
    }

    #[test]
    fn test_first_candidate_priority() {
        let strategies = vec![
            ExtractionStrategy::from_intent("deny", "no additional preferences"),
            ExtractionStrategy::from_text().without_intents(["affirm"]),
        ];

        assert_eq!(
            first_candidate(&strategies, &msg("deny")),
            Some(SlotValue::text("no additional preferences"))
        );
        assert_eq!(
            first_candidate(&strategies, &msg("inform")),
            Some(SlotValue::text("some text"))
        );
        assert_eq!(first_candidate(&strategies, &msg("affirm")), None);
    }

    #[test]
    fn test_empty_text_is_not_a_candidate() {
        let strategy = ExtractionStrategy::from_text();
        assert_eq!(strategy.extract(&ParsedMessage::default()), None);
    }

    #[test]
    fn test_empty_entity_falls_through_to_text() {
        let strategies = vec![
            ExtractionStrategy::from_entity("feedback"),
            ExtractionStrategy::from_text(),
        ];
        let message = ParsedMessage::new("great service").with_entity("feedback", "");

        assert_eq!(strategies[0].extract(&message), None);
        assert_eq!(
            first_candidate(&strategies, &message),
            Some(SlotValue::text("great service"))
        );
    }

    #[test]
    fn test_yaml_strategies() {
        let yaml = r#"
- type: from_entity
  entity: seating
- type: from_intent
  intent: affirm
  value: true
- type: from_text
  not_intent: [affirm]
"#;
        let strategies: Vec<ExtractionStrategy> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(strategies[0], ExtractionStrategy::from_entity("seating"));
        assert_eq!(strategies[1], ExtractionStrategy::from_intent("affirm", true));
        assert_eq!(
            strategies[2],
            ExtractionStrategy::from_text().without_intents(["affirm"])
        );
    }
}
