//! Project name derivation.

use serde::{Deserialize, Serialize};

/// Resource-safe project identifier derived from a display name.
///
/// The slug is the display name lowercased with every run of whitespace
/// collapsed into a single hyphen. It is derived once per request and used
/// verbatim wherever a resource name, tag value, or state key needs the
/// project name. No uniqueness is guaranteed beyond what the transform
/// naturally provides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSlug(String);

impl ProjectSlug {
    /// Derive a slug from a human-readable display name.
    pub fn derive(name: &str) -> Self {
        let slug = name
            .trim()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");
        Self(slug)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Secondary form for targets that forbid hyphens in identifiers,
    /// such as database names.
    pub fn underscored(&self) -> String {
        self.0.replace('-', "_")
    }

    /// Condensed form for targets that only allow alphanumerics,
    /// such as Azure storage account names.
    pub fn condensed(&self) -> String {
        self.0.replace('-', "")
    }
}

impl std::fmt::Display for ProjectSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_lowercases_and_hyphenates() {
        assert_eq!(ProjectSlug::derive("My Shop").as_str(), "my-shop");
    }

    #[test]
    fn test_slug_collapses_whitespace_runs() {
        assert_eq!(
            ProjectSlug::derive("  Big \t Data   Platform ").as_str(),
            "big-data-platform"
        );
    }

    #[test]
    fn test_slug_is_deterministic() {
        assert_eq!(
            ProjectSlug::derive("Acme Corp"),
            ProjectSlug::derive("Acme Corp")
        );
    }

    #[test]
    fn test_underscored_and_condensed_forms() {
        let slug = ProjectSlug::derive("My Shop");
        assert_eq!(slug.underscored(), "my_shop");
        assert_eq!(slug.condensed(), "myshop");
    }
}
