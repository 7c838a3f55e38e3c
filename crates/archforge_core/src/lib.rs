//! # archforge_core
//!
//! Infrastructure code generation engine for archforge.
//!
//! Turns an abstract architecture description (provider, region,
//! environment, enabled components) into a complete, internally consistent
//! set of Terraform documents. The engine is pure and synchronous: it holds
//! no state across invocations and identical requests produce byte-identical
//! results (except the narrative document's copyright year).
//!
//! ## Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//!
//! use archforge_core::{Engine, GenerationRequest};
//!
//! let mut components = BTreeMap::new();
//! components.insert("vpc".to_string(), true);
//! components.insert("kubernetes".to_string(), true);
//!
//! let request = GenerationRequest {
//!     architecture_id: "arch-1".to_string(),
//!     architecture_name: "My Shop".to_string(),
//!     services: Vec::new(),
//!     cloud_provider: "aws".to_string(),
//!     region: "us-east-1".to_string(),
//!     environment: "development".to_string(),
//!     components,
//! };
//!
//! let result = Engine::generate(&request).unwrap();
//! assert!(result.files.contains_key("resources.tf"));
//! ```

pub mod assemble;
pub mod block;
pub mod error;
pub mod naming;
pub mod narrative;
pub mod provider;
pub mod request;
pub mod schema;
pub mod synth;

pub use assemble::Engine;
pub use block::{BlockSet, ResourceBlock};
pub use error::{EngineResult, GenerateError};
pub use naming::ProjectSlug;
pub use provider::CloudProvider;
pub use request::{
    ComponentSelection, Environment, GeneratedDocument, GenerationRequest, GenerationResult,
    Service,
};
pub use schema::{OutputsBuilder, VariablesBuilder};
pub use synth::{synthesizer_for, ProviderSynthesizer, SynthContext};

/// Bootstrap document filename (terraform settings, backend, provider).
pub const BOOTSTRAP_FILENAME: &str = "main.tf";
/// Variables document filename.
pub const VARIABLES_FILENAME: &str = "variables.tf";
/// Outputs document filename.
pub const OUTPUTS_FILENAME: &str = "outputs.tf";
/// Provider-resources document filename; present only when at least one
/// resource-bearing component is enabled.
pub const RESOURCES_FILENAME: &str = "resources.tf";
/// Narrative usage document filename.
pub const NARRATIVE_FILENAME: &str = "README.md";
