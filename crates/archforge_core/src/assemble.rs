//! Document assembly and the engine entry point.

use tracing::{debug, info};

use crate::error::{EngineResult, GenerateError};
use crate::naming::ProjectSlug;
use crate::provider::CloudProvider;
use crate::request::{
    ComponentSelection, Environment, GeneratedDocument, GenerationRequest, GenerationResult,
};
use crate::schema::{OutputsBuilder, VariablesBuilder};
use crate::synth::{synthesizer_for, SynthContext};
use crate::{narrative, BOOTSTRAP_FILENAME, NARRATIVE_FILENAME, OUTPUTS_FILENAME,
    RESOURCES_FILENAME, VARIABLES_FILENAME};

/// The infrastructure code generation engine.
///
/// Pure and stateless: one request in, one complete file map out. Safe to
/// invoke concurrently without coordination.
pub struct Engine;

impl Engine {
    /// Generate the full set of configuration documents for a request.
    ///
    /// Either a complete, internally consistent file map is returned, or an
    /// error and no files at all.
    pub fn generate(request: &GenerationRequest) -> EngineResult<GenerationResult> {
        if request.architecture_name.trim().is_empty() {
            return Err(GenerateError::InvalidRequest(
                "Architecture name must not be empty".to_string(),
            ));
        }

        let provider = CloudProvider::from_str(&request.cloud_provider)
            .ok_or_else(|| GenerateError::UnsupportedProvider(request.cloud_provider.clone()))?;

        let environment = Environment::from_str(&request.environment).ok_or_else(|| {
            GenerateError::InvalidRequest(format!(
                "Unknown environment: {}",
                request.environment
            ))
        })?;

        let selection = ComponentSelection::from_map(&request.components)?;
        let slug = ProjectSlug::derive(&request.architecture_name);

        info!(
            "Generating {} configuration for '{}' ({})",
            provider, slug, environment
        );

        let ctx = SynthContext {
            selection: &selection,
            region: &request.region,
            environment,
            slug: &slug,
            display_name: &request.architecture_name,
        };
        let blocks = synthesizer_for(provider).synthesize(&ctx);
        debug!("Synthesized resource domains: {:?}", blocks.labels());

        let mut documents = vec![
            GeneratedDocument::new(
                BOOTSTRAP_FILENAME,
                bootstrap_document(provider, &slug, &request.region, environment, &selection),
            ),
            GeneratedDocument::new(
                VARIABLES_FILENAME,
                VariablesBuilder::build(
                    provider,
                    &selection,
                    &request.region,
                    environment,
                    &request.architecture_name,
                ),
            ),
            GeneratedDocument::new(
                OUTPUTS_FILENAME,
                OutputsBuilder::build(provider, &selection, &request.architecture_name),
            ),
        ];

        if selection.has_resources() {
            documents.push(GeneratedDocument::new(RESOURCES_FILENAME, blocks.render()));
        }

        documents.push(GeneratedDocument::new(
            NARRATIVE_FILENAME,
            narrative::render(
                &request.architecture_name,
                provider,
                &request.region,
                environment,
                &selection,
                &request.services,
                slug.as_str(),
                selection.has_resources(),
            ),
        ));

        Ok(GenerationResult::from_documents(
            documents,
            provider.as_str(),
            &request.region,
            environment.as_str(),
        ))
    }
}

/// Build the bootstrap document: terraform settings, required providers,
/// the slug-keyed state backend and the provider block.
fn bootstrap_document(
    provider: CloudProvider,
    slug: &ProjectSlug,
    region: &str,
    environment: Environment,
    selection: &ComponentSelection,
) -> String {
    let p = slug.as_str();

    let mut required = format!(
        r#"    {name} = {{
      source  = "{source}"
      version = "{version}"
    }}"#,
        name = provider.terraform_provider_name(),
        source = provider.terraform_source(),
        version = provider.terraform_version(),
    );
    // The random provider backs the generated database credential.
    if selection.relational_db {
        required.push_str(
            r#"
    random = {
      source  = "hashicorp/random"
      version = "~> 3.6"
    }"#,
        );
    }

    let backend = match provider {
        CloudProvider::Aws => format!(
            r#"  backend "s3" {{
    bucket  = "{p}-terraform-state"
    key     = "{environment}/terraform.tfstate"
    region  = "{region}"
    encrypt = true
  }}"#
        ),
        CloudProvider::Gcp => format!(
            r#"  backend "gcs" {{
    bucket = "{p}-terraform-state"
    prefix = "{environment}"
  }}"#
        ),
        CloudProvider::Azure => format!(
            r#"  backend "azurerm" {{
    resource_group_name  = "{p}-tfstate-rg"
    storage_account_name = "{condensed}tfstate"
    container_name       = "tfstate"
    key                  = "{p}-{environment}.terraform.tfstate"
  }}"#,
            condensed = slug.condensed(),
        ),
    };

    let provider_block = match provider {
        CloudProvider::Aws => format!(
            r#"provider "aws" {{
  region = var.region

  default_tags {{
    tags = {{
      Project     = "{p}"
      Environment = var.environment
      ManagedBy   = "terraform"
    }}
  }}
}}"#
        ),
        CloudProvider::Gcp => r#"provider "google" {
  project = var.project_id
  region  = var.region
}"#
        .to_string(),
        CloudProvider::Azure => r#"provider "azurerm" {
  features {}
}"#
        .to_string(),
    };

    format!(
        r#"# Terraform bootstrap for {p} ({environment}).

terraform {{
  required_version = ">= 1.6.0"

  required_providers {{
{required}
  }}

{backend}
}}

{provider_block}
"#
    )
}
