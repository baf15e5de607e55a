//! Centralized constants for formbot
//!
//! Single source of truth for defaults shared by the config loader, the
//! form implementation and the CLI.

/// Restaurant form defaults
pub mod form {
    /// Form identifier reported to the host
    pub const FORM_NAME: &str = "restaurant_form";

    /// Cuisines the restaurant supports (lowercase)
    pub const DEFAULT_CUISINES: &[&str] = &[
        "caribbean",
        "chinese",
        "french",
        "greek",
        "indian",
        "italian",
        "mexican",
    ];

    /// Value assigned to `preferences` when the user declines to add any
    pub const NO_ADDITIONAL_PREFERENCES: &str = "no additional preferences";
}

/// Intent names used by the default slot mappings
pub mod intents {
    pub const AFFIRM: &str = "affirm";
    pub const DENY: &str = "deny";
    pub const INFORM: &str = "inform";
    pub const CHITCHAT: &str = "chitchat";
    pub const REQUEST_RESTAURANT: &str = "request_restaurant";
}

/// Config file locations
pub mod paths {
    /// Directory searched for `default.*` and `{env}.*` settings files
    pub const CONFIG_DIR: &str = "config";

    /// Default form configuration file
    pub const FORM_CONFIG: &str = "config/form.yaml";

    /// Prefix for environment overrides, e.g. `FORMBOT__OBSERVABILITY__LOG_LEVEL`
    pub const ENV_PREFIX: &str = "FORMBOT";
}
