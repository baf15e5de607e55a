//! Config Validator for Form Configuration
//!
//! Validates the form file at startup to catch errors early:
//! - Slot mapping overrides reference declared slots
//! - Strategy lists are non-empty and well-formed
//! - The cuisine catalog is usable
//! - Response templates cover every message the form can emit
//!
//! # Example
//!
//! ```ignore
//! use formbot_config::{ConfigValidator, FormConfig};
//!
//! let report = ConfigValidator::new().validate(&FormConfig::default());
//! assert!(report.is_ok());
//! ```

use std::collections::HashSet;

use formbot_core::{ExtractionStrategy, MessageKey, SlotName};

use crate::form::FormConfig;

/// Validation error with context
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Category of error
    pub category: ValidationCategory,
    /// Config section
    pub source: String,
    /// Specific field or reference
    pub field: Option<String>,
    /// Error message
    pub message: String,
    /// Severity level
    pub severity: ValidationSeverity,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let field_str = self.field.as_deref().unwrap_or("(root)");
        write!(
            f,
            "[{:?}] {}/{}: {}",
            self.severity, self.source, field_str, self.message
        )
    }
}

impl std::error::Error for ValidationError {}

/// Category of validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationCategory {
    /// Missing required configuration
    MissingRequired,
    /// Reference to something the form does not declare
    InvalidReference,
    /// Duplicate definition
    Duplicate,
    /// Value will be normalized or ignored
    Normalized,
}

/// Severity of validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    /// Informational warning
    Warning,
    /// Potential issue
    Error,
    /// Critical - will prevent startup
    Critical,
}

/// Findings for one form configuration
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    fn push(
        &mut self,
        category: ValidationCategory,
        severity: ValidationSeverity,
        source: &str,
        field: Option<&str>,
        message: impl Into<String>,
    ) {
        self.errors.push(ValidationError {
            category,
            source: source.to_string(),
            field: field.map(|f| f.to_string()),
            message: message.into(),
            severity,
        });
    }

    /// Check if validation passed (no critical errors)
    pub fn is_ok(&self) -> bool {
        !self.errors.iter().any(|e| e.severity == ValidationSeverity::Critical)
    }

    pub fn critical_errors(&self) -> Vec<&ValidationError> {
        self.with_severity(ValidationSeverity::Critical)
    }

    pub fn warnings(&self) -> Vec<&ValidationError> {
        self.with_severity(ValidationSeverity::Warning)
    }

    fn with_severity(&self, severity: ValidationSeverity) -> Vec<&ValidationError> {
        self.errors.iter().filter(|e| e.severity == severity).collect()
    }

    pub fn summary(&self) -> String {
        if self.errors.is_empty() {
            return "Form config: All validations passed".to_string();
        }
        let count = |s: ValidationSeverity| self.errors.iter().filter(|e| e.severity == s).count();
        format!(
            "Form config: {} critical, {} errors, {} warnings",
            count(ValidationSeverity::Critical),
            count(ValidationSeverity::Error),
            count(ValidationSeverity::Warning)
        )
    }
}

/// Form config validator
pub struct ConfigValidator {
    include_warnings: bool,
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigValidator {
    pub fn new() -> Self {
        Self {
            include_warnings: true,
        }
    }

    /// Set whether to include warnings
    pub fn with_warnings(mut self, include: bool) -> Self {
        self.include_warnings = include;
        self
    }

    pub fn validate(&self, config: &FormConfig) -> ValidationReport {
        let mut report = ValidationReport::default();

        self.validate_cuisines(config, &mut report);
        self.validate_mappings(config, &mut report);
        if self.include_warnings {
            self.validate_responses(config, &mut report);
        }

        report
    }

    fn validate_cuisines(&self, config: &FormConfig, report: &mut ValidationReport) {
        if config.cuisines.iter().all(|c| c.trim().is_empty()) {
            report.push(
                ValidationCategory::MissingRequired,
                ValidationSeverity::Critical,
                "cuisines",
                None,
                "No cuisines defined; every cuisine would be rejected",
            );
            return;
        }

        let mut seen = HashSet::new();
        for cuisine in &config.cuisines {
            let normalized = cuisine.trim().to_lowercase();
            if !seen.insert(normalized.clone()) {
                report.push(
                    ValidationCategory::Duplicate,
                    ValidationSeverity::Warning,
                    "cuisines",
                    Some(cuisine.as_str()),
                    "Duplicate cuisine",
                );
            } else if self.include_warnings && normalized != *cuisine {
                report.push(
                    ValidationCategory::Normalized,
                    ValidationSeverity::Warning,
                    "cuisines",
                    Some(cuisine.as_str()),
                    format!("Cuisine will be stored as '{}'", normalized),
                );
            }
        }
    }

    fn validate_mappings(&self, config: &FormConfig, report: &mut ValidationReport) {
        for (slot, strategies) in &config.slot_mappings {
            if slot.parse::<SlotName>().is_err() {
                report.push(
                    ValidationCategory::InvalidReference,
                    ValidationSeverity::Critical,
                    "slot_mappings",
                    Some(slot.as_str()),
                    "Mapping references a slot the form does not declare",
                );
                continue;
            }

            if strategies.is_empty() {
                report.push(
                    ValidationCategory::MissingRequired,
                    ValidationSeverity::Critical,
                    "slot_mappings",
                    Some(slot.as_str()),
                    "Slot has no extraction strategies",
                );
            }

            for strategy in strategies {
                let empty_name = match strategy {
                    ExtractionStrategy::FromEntity { entity, .. } => entity.trim().is_empty(),
                    ExtractionStrategy::FromIntent { intent, .. } => intent.trim().is_empty(),
                    ExtractionStrategy::FromText { .. } => false,
                };
                if empty_name {
                    report.push(
                        ValidationCategory::MissingRequired,
                        ValidationSeverity::Critical,
                        "slot_mappings",
                        Some(slot.as_str()),
                        "Strategy is missing its entity or intent name",
                    );
                }
            }
        }
    }

    /// Only checked when some responses are configured; without any, hosts
    /// render their own templates.
    fn validate_responses(&self, config: &FormConfig, report: &mut ValidationReport) {
        if config.responses.is_empty() {
            return;
        }

        let mut expected: Vec<MessageKey> = vec![
            MessageKey::WrongCuisine,
            MessageKey::WrongNumPeople,
            MessageKey::WrongOutdoorSeating,
            MessageKey::Submit,
        ];
        expected.extend(SlotName::ALL.iter().map(|s| MessageKey::AskSlot(*s)));

        for key in expected {
            let template = key.template();
            if !config.responses.contains_key(&template) {
                report.push(
                    ValidationCategory::MissingRequired,
                    ValidationSeverity::Warning,
                    "responses",
                    Some(template.as_str()),
                    "No response text for template",
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes() {
        let report = ConfigValidator::new().validate(&FormConfig::default());
        assert!(report.is_ok());
        assert!(report.errors.is_empty());
        assert_eq!(report.summary(), "Form config: All validations passed");
    }

    #[test]
    fn test_empty_catalog_is_critical() {
        let config = FormConfig {
            cuisines: vec![],
            ..Default::default()
        };
        let report = ConfigValidator::new().validate(&config);
        assert!(!report.is_ok());
        assert_eq!(report.critical_errors()[0].source, "cuisines");
    }

    #[test]
    fn test_unknown_slot_is_critical() {
        let mut config = FormConfig::default();
        config
            .slot_mappings
            .insert("dessert".to_string(), vec![ExtractionStrategy::from_text()]);

        let report = ConfigValidator::new().validate(&config);
        assert!(!report.is_ok());
        let err = report.critical_errors()[0];
        assert_eq!(err.category, ValidationCategory::InvalidReference);
        assert_eq!(err.field.as_deref(), Some("dessert"));
    }

    #[test]
    fn test_empty_strategy_list_is_critical() {
        let mut config = FormConfig::default();
        config.slot_mappings.insert("feedback".to_string(), vec![]);
        assert!(!ConfigValidator::new().validate(&config).is_ok());
    }

    #[test]
    fn test_blank_entity_name_is_critical() {
        let mut config = FormConfig::default();
        config
            .slot_mappings
            .insert("cuisine".to_string(), vec![ExtractionStrategy::from_entity(" ")]);
        assert!(!ConfigValidator::new().validate(&config).is_ok());
    }

    #[test]
    fn test_catalog_warnings() {
        let config = FormConfig {
            cuisines: vec!["Greek".to_string(), "greek".to_string()],
            ..Default::default()
        };
        let report = ConfigValidator::new().validate(&config);
        assert!(report.is_ok());
        assert_eq!(report.warnings().len(), 2);

        let quiet = ConfigValidator::new().with_warnings(false).validate(&config);
        assert_eq!(quiet.warnings().len(), 1);
    }

    #[test]
    fn test_partial_responses_warn() {
        let mut config = FormConfig::default();
        config
            .responses
            .insert("utter_submit".to_string(), "All done!".to_string());

        let report = ConfigValidator::new().validate(&config);
        assert!(report.is_ok());
        // 3 reject templates + 5 ask templates are missing
        assert_eq!(report.warnings().len(), 8);
    }
}
