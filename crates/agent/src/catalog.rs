//! Supported cuisine catalog

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::BTreeSet;

use formbot_config::constants::form::DEFAULT_CUISINES;

static DEFAULT_CATALOG: Lazy<CuisineCatalog> =
    Lazy::new(|| CuisineCatalog::from_names(DEFAULT_CUISINES.iter().copied()));

/// Immutable set of lowercase cuisine names
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CuisineCatalog {
    cuisines: BTreeSet<String>,
}

impl CuisineCatalog {
    /// Build a catalog; names are trimmed and lowercased, blanks dropped
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cuisines = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_lowercase())
            .filter(|n| !n.is_empty())
            .collect();
        Self { cuisines }
    }

    /// Membership test, case-insensitive on the candidate
    pub fn contains(&self, candidate: &str) -> bool {
        self.cuisines.contains(&candidate.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.cuisines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cuisines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.cuisines.iter().map(|s| s.as_str())
    }
}

impl Default for CuisineCatalog {
    fn default() -> Self {
        DEFAULT_CATALOG.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = CuisineCatalog::default();
        let names: Vec<&str> = catalog.iter().collect();
        assert_eq!(
            names,
            vec!["caribbean", "chinese", "french", "greek", "indian", "italian", "mexican"]
        );
    }

    #[test]
    fn test_case_insensitive_membership() {
        let catalog = CuisineCatalog::default();
        assert!(catalog.contains("Italian"));
        assert!(catalog.contains("MEXICAN"));
        assert!(!catalog.contains("thai"));
        // No trimming on the candidate side
        assert!(!catalog.contains(" greek"));
    }

    #[test]
    fn test_from_names_normalizes() {
        let catalog = CuisineCatalog::from_names(["  Thai ", "", "thai", "Korean"]);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("thai"));
        assert!(catalog.contains("korean"));
    }
}
