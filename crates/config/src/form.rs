//! Form Configuration
//!
//! Loaded from a YAML (or TOML) file:
//!
//! ```yaml
//! cuisines: [caribbean, chinese, french]
//! slot_mappings:
//!   feedback:
//!     - type: from_entity
//!       entity: feedback
//!     - type: from_text
//! responses:
//!   utter_submit: "All done!"
//! ```
//!
//! Every section is optional; missing sections fall back to the built-in
//! defaults of the restaurant form.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use formbot_core::{ExtractionStrategy, SlotName};

use crate::constants::form::DEFAULT_CUISINES;
use crate::validator::ConfigValidator;
use crate::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    /// Supported cuisines
    #[serde(default = "default_cuisines")]
    pub cuisines: Vec<String>,
    /// Per-slot strategy lists replacing the built-in mappings
    #[serde(default)]
    pub slot_mappings: BTreeMap<String, Vec<ExtractionStrategy>>,
    /// Template name to response text
    #[serde(default)]
    pub responses: BTreeMap<String, String>,
}

fn default_cuisines() -> Vec<String> {
    DEFAULT_CUISINES.iter().map(|c| c.to_string()).collect()
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            cuisines: default_cuisines(),
            slot_mappings: BTreeMap::new(),
            responses: BTreeMap::new(),
        }
    }
}

impl FormConfig {
    /// Load from a YAML, JSON or TOML file, chosen by extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileNotFound(format!("{}: {}", path.display(), e)))?;

        let config: FormConfig = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?
            }
            Some("json") => {
                serde_json::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?
            }
            _ => serde_yaml::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?,
        };

        config.validate()?;

        tracing::debug!(
            path = %path.display(),
            cuisines = config.cuisines.len(),
            mapping_overrides = config.slot_mappings.len(),
            responses = config.responses.len(),
            "Loaded form configuration"
        );

        Ok(config)
    }

    /// Load a file if it exists, otherwise use defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            tracing::info!(
                path = %path.as_ref().display(),
                "Form config not found, using built-in defaults"
            );
            Ok(Self::default())
        }
    }

    /// Reject configurations with critical findings
    pub fn validate(&self) -> Result<(), ConfigError> {
        let report = ConfigValidator::new().validate(self);
        tracing::debug!(summary = %report.summary(), "Validated form config");

        for warning in report.warnings() {
            tracing::warn!("{}", warning);
        }

        if let Some(critical) = report.critical_errors().first() {
            return Err(ConfigError::InvalidValue {
                field: critical.field.clone().unwrap_or_else(|| critical.source.clone()),
                message: critical.message.clone(),
            });
        }

        Ok(())
    }

    /// Mapping overrides keyed by declared slot
    pub fn mapping_overrides(&self) -> Result<Vec<(SlotName, Vec<ExtractionStrategy>)>, ConfigError> {
        self.slot_mappings
            .iter()
            .map(|(name, strategies)| -> Result<_, ConfigError> {
                Ok((name.parse::<SlotName>()?, strategies.clone()))
            })
            .collect()
    }

    /// Response text for a template, if configured
    pub fn response(&self, template: &str) -> Option<&str> {
        self.responses.get(template).map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_catalog() {
        let config = FormConfig::default();
        assert_eq!(config.cuisines.len(), 7);
        assert!(config.cuisines.contains(&"italian".to_string()));
        assert!(config.slot_mappings.is_empty());
    }

    #[test]
    fn test_load_yaml() {
        let file = write_temp(
            ".yaml",
            r#"
cuisines: [thai, Vietnamese]
slot_mappings:
  feedback:
    - type: from_text
responses:
  utter_submit: "All done!"
"#,
        );

        let config = FormConfig::load(file.path()).unwrap();
        assert_eq!(config.cuisines, vec!["thai", "Vietnamese"]);
        assert_eq!(config.response("utter_submit"), Some("All done!"));

        let overrides = config.mapping_overrides().unwrap();
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides[0].0, SlotName::Feedback);
        assert_eq!(overrides[0].1, vec![ExtractionStrategy::from_text()]);
    }

    #[test]
    fn test_load_toml() {
        let file = write_temp(
            ".toml",
            r#"
cuisines = ["greek"]

[responses]
utter_wrong_cuisine = "Sorry, we don't serve that."
"#,
        );

        let config = FormConfig::load(file.path()).unwrap();
        assert_eq!(config.cuisines, vec!["greek"]);
        assert!(config.response("utter_wrong_cuisine").is_some());
    }

    #[test]
    fn test_unknown_slot_override_rejected() {
        let file = write_temp(
            ".yaml",
            r#"
slot_mappings:
  dessert:
    - type: from_text
"#,
        );

        let err = FormConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = FormConfig::load("/nonexistent/form.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = FormConfig::load_or_default("/nonexistent/form.yaml").unwrap();
        assert_eq!(config.cuisines.len(), 7);
    }

    #[test]
    fn test_malformed_yaml() {
        let file = write_temp(".yaml", "cuisines: {not: [a list");
        let err = FormConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
