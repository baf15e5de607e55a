//! Host-provided channel for user-facing messages

use serde::{Deserialize, Serialize};

use crate::tracker::Tracker;
use crate::validation::MessageKey;

/// Emits templated messages to the user
///
/// Forms only pick a template; the host renders it.
pub trait Dispatcher {
    fn utter_template(&mut self, key: MessageKey, tracker: &Tracker);
}

/// A message queued by `CollectingDispatcher`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchedMessage {
    pub template: String,
    pub sender_id: String,
}

/// Dispatcher that records messages in order
#[derive(Debug, Default)]
pub struct CollectingDispatcher {
    messages: Vec<DispatchedMessage>,
}

impl CollectingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[DispatchedMessage] {
        &self.messages
    }

    /// Template names in emission order
    pub fn templates(&self) -> Vec<&str> {
        self.messages.iter().map(|m| m.template.as_str()).collect()
    }

    /// Take all queued messages, leaving the dispatcher empty
    pub fn drain(&mut self) -> Vec<DispatchedMessage> {
        std::mem::take(&mut self.messages)
    }
}

impl Dispatcher for CollectingDispatcher {
    fn utter_template(&mut self, key: MessageKey, tracker: &Tracker) {
        tracing::debug!(template = %key, sender = %tracker.sender_id, "Dispatching template");
        self.messages.push(DispatchedMessage {
            template: key.template(),
            sender_id: tracker.sender_id.clone(),
        });
    }
}
