//! Request and response models for the generation engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{EngineResult, GenerateError};

/// Deployment environment for the generated configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "development" => Some(Environment::Development),
            "staging" => Some(Environment::Staging),
            "production" => Some(Environment::Production),
            _ => None,
        }
    }

    /// Production deployments get database redundancy, deletion protection
    /// and a final snapshot on teardown; other environments get none.
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A declared service, opaque to the engine and used only by the
/// narrative document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Validated set of infrastructure capability flags.
///
/// Flags are independent inputs: the engine never mutates or "corrects" the
/// caller's selection. Unmet prerequisites are handled fail-soft at
/// synthesis time by omitting the dependent block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSelection {
    #[serde(default)]
    pub vpc: bool,
    #[serde(default)]
    pub nat_gateway: bool,
    #[serde(default)]
    pub kubernetes: bool,
    #[serde(default)]
    pub node_pools: bool,
    #[serde(default)]
    pub relational_db: bool,
    #[serde(default)]
    pub security_groups: bool,
    #[serde(default)]
    pub logging: bool,
    #[serde(default)]
    pub metrics: bool,
}

impl ComponentSelection {
    /// Known component names with their prerequisite components.
    pub const KNOWN: &'static [(&'static str, &'static [&'static str])] = &[
        ("vpc", &[]),
        ("nat_gateway", &["vpc"]),
        ("kubernetes", &[]),
        ("node_pools", &["kubernetes"]),
        ("relational_db", &[]),
        ("security_groups", &["vpc"]),
        ("logging", &["kubernetes"]),
        ("metrics", &["kubernetes"]),
    ];

    /// Build a selection from the wire-level component map.
    ///
    /// Missing keys default to disabled; an unknown key is rejected rather
    /// than silently ignored.
    pub fn from_map(components: &BTreeMap<String, bool>) -> EngineResult<Self> {
        let mut selection = Self::default();
        for (name, enabled) in components {
            match name.as_str() {
                "vpc" => selection.vpc = *enabled,
                "nat_gateway" => selection.nat_gateway = *enabled,
                "kubernetes" => selection.kubernetes = *enabled,
                "node_pools" => selection.node_pools = *enabled,
                "relational_db" => selection.relational_db = *enabled,
                "security_groups" => selection.security_groups = *enabled,
                "logging" => selection.logging = *enabled,
                "metrics" => selection.metrics = *enabled,
                other => {
                    return Err(GenerateError::InvalidRequest(format!(
                        "Unknown component: {other}"
                    )))
                }
            }
        }
        Ok(selection)
    }

    /// Whether any component requiring a provider-resources document
    /// is enabled.
    pub fn has_resources(&self) -> bool {
        self.vpc || self.kubernetes || self.relational_db
    }

    /// Names of the enabled components, in declaration order.
    pub fn enabled(&self) -> Vec<&'static str> {
        let flags = [
            ("vpc", self.vpc),
            ("nat_gateway", self.nat_gateway),
            ("kubernetes", self.kubernetes),
            ("node_pools", self.node_pools),
            ("relational_db", self.relational_db),
            ("security_groups", self.security_groups),
            ("logging", self.logging),
            ("metrics", self.metrics),
        ];
        flags
            .into_iter()
            .filter_map(|(name, on)| on.then_some(name))
            .collect()
    }
}

/// One request to the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    #[serde(default)]
    pub architecture_id: String,
    pub architecture_name: String,
    #[serde(default)]
    pub services: Vec<Service>,
    pub cloud_provider: String,
    pub region: String,
    pub environment: String,
    #[serde(default)]
    pub components: BTreeMap<String, bool>,
}

/// A single generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedDocument {
    pub filename: String,
    pub content: String,
}

impl GeneratedDocument {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }
}

/// Complete result of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Generated files keyed by filename, deterministically ordered.
    pub files: BTreeMap<String, String>,
    pub provider: String,
    pub region: String,
    pub environment: String,
}

impl GenerationResult {
    pub fn from_documents(
        documents: Vec<GeneratedDocument>,
        provider: &str,
        region: &str,
        environment: &str,
    ) -> Self {
        Self {
            files: documents
                .into_iter()
                .map(|d| (d.filename, d.content))
                .collect(),
            provider: provider.to_string(),
            region: region.to_string(),
            environment: environment.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_from_map_defaults_missing_to_disabled() {
        let mut components = BTreeMap::new();
        components.insert("vpc".to_string(), true);
        let selection = ComponentSelection::from_map(&components).unwrap();
        assert!(selection.vpc);
        assert!(!selection.kubernetes);
        assert!(!selection.relational_db);
    }

    #[test]
    fn test_selection_rejects_unknown_component() {
        let mut components = BTreeMap::new();
        components.insert("blockchain".to_string(), true);
        let err = ComponentSelection::from_map(&components).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidRequest(_)));
    }

    #[test]
    fn test_selection_preserves_inconsistent_flags() {
        // The engine never corrects the caller's selection.
        let mut components = BTreeMap::new();
        components.insert("node_pools".to_string(), true);
        components.insert("kubernetes".to_string(), false);
        let selection = ComponentSelection::from_map(&components).unwrap();
        assert!(selection.node_pools);
        assert!(!selection.kubernetes);
    }

    #[test]
    fn test_has_resources() {
        let empty = ComponentSelection::default();
        assert!(!empty.has_resources());

        let db_only = ComponentSelection {
            relational_db: true,
            ..Default::default()
        };
        assert!(db_only.has_resources());
    }

    #[test]
    fn test_environment_from_str() {
        assert_eq!(
            Environment::from_str("production"),
            Some(Environment::Production)
        );
        assert_eq!(Environment::from_str("qa"), None);
    }
}
