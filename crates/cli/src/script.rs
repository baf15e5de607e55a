//! Conversation scripts
//!
//! A script is a list of parsed user turns, in YAML or JSON:
//!
//! ```yaml
//! - text: I'd like to book a table
//!   intent: { name: request_restaurant }
//! - text: Italian please
//!   intent: { name: inform }
//!   entities:
//!     - { entity: cuisine, value: Italian }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use formbot_core::ParsedMessage;

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Cannot read script {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid script {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Script {0} has no turns")]
    Empty(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub turns: Vec<ParsedMessage>,
}

impl Script {
    /// Read a script, parsing `.json` files as JSON and anything else as YAML
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: shown.clone(),
            source,
        })?;

        let script = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_yaml(&content),
        }
        .map_err(|message| ScriptError::Parse {
            path: shown.clone(),
            message,
        })?;

        if script.turns.is_empty() {
            return Err(ScriptError::Empty(shown));
        }

        tracing::debug!(path = %path.display(), turns = script.turns.len(), "Loaded script");
        Ok(script)
    }

    fn from_yaml(content: &str) -> Result<Self, String> {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }

    fn from_json(content: &str) -> Result<Self, String> {
        serde_json::from_str(content).map_err(|e| e.to_string())
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
