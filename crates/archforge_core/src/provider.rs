//! Cloud provider definitions.

use serde::{Deserialize, Serialize};

/// Supported cloud providers.
///
/// Provider dispatch is an exhaustive match everywhere; an unrecognized
/// provider string is rejected up front rather than falling through to a
/// default code path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudProvider {
    Aws,
    Gcp,
    Azure,
}

impl CloudProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "aws",
            CloudProvider::Gcp => "gcp",
            CloudProvider::Azure => "azure",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "aws" => Some(CloudProvider::Aws),
            "gcp" => Some(CloudProvider::Gcp),
            "azure" => Some(CloudProvider::Azure),
            _ => None,
        }
    }

    pub fn all() -> Vec<Self> {
        vec![CloudProvider::Aws, CloudProvider::Gcp, CloudProvider::Azure]
    }

    /// Human-readable provider label for narrative documents.
    pub fn label(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "Amazon Web Services",
            CloudProvider::Gcp => "Google Cloud Platform",
            CloudProvider::Azure => "Microsoft Azure",
        }
    }

    /// Get the Terraform provider name.
    pub fn terraform_provider_name(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "aws",
            CloudProvider::Gcp => "google",
            CloudProvider::Azure => "azurerm",
        }
    }

    /// Get the Terraform registry source for the provider plugin.
    pub fn terraform_source(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "hashicorp/aws",
            CloudProvider::Gcp => "hashicorp/google",
            CloudProvider::Azure => "hashicorp/azurerm",
        }
    }

    /// Get the provider plugin version constraint.
    pub fn terraform_version(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "~> 5.0",
            CloudProvider::Gcp => "~> 5.0",
            CloudProvider::Azure => "~> 3.0",
        }
    }

    /// Name of the worker-node sizing variable for this provider.
    ///
    /// Centralized so synthesizer references and variable declarations
    /// cannot drift apart.
    pub fn node_size_variable(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "node_instance_type",
            CloudProvider::Gcp => "node_machine_type",
            CloudProvider::Azure => "node_vm_size",
        }
    }

    pub fn node_size_default(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "t3.medium",
            CloudProvider::Gcp => "e2-standard-2",
            CloudProvider::Azure => "Standard_D2s_v3",
        }
    }

    /// Name of the database sizing variable for this provider.
    pub fn db_size_variable(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "db_instance_class",
            CloudProvider::Gcp => "db_tier",
            CloudProvider::Azure => "db_sku_name",
        }
    }

    pub fn db_size_default(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "db.t3.medium",
            CloudProvider::Gcp => "db-custom-2-7680",
            CloudProvider::Azure => "GP_Standard_D2s_v3",
        }
    }

    pub fn db_engine_version_default(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "16.3",
            CloudProvider::Gcp => "POSTGRES_16",
            CloudProvider::Azure => "16",
        }
    }

    /// Terraform address of the private network resource.
    pub fn network_address(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "aws_vpc.main",
            CloudProvider::Gcp => "google_compute_network.main",
            CloudProvider::Azure => "azurerm_virtual_network.main",
        }
    }

    /// Terraform address of the managed cluster resource.
    pub fn cluster_address(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "aws_eks_cluster.main",
            CloudProvider::Gcp => "google_container_cluster.main",
            CloudProvider::Azure => "azurerm_kubernetes_cluster.main",
        }
    }

    /// Terraform address of the relational database resource.
    pub fn database_address(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "aws_db_instance.main",
            CloudProvider::Gcp => "google_sql_database_instance.main",
            CloudProvider::Azure => "azurerm_postgresql_flexible_server.main",
        }
    }
}

impl std::fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_recognizes_all_providers() {
        assert_eq!(CloudProvider::from_str("aws"), Some(CloudProvider::Aws));
        assert_eq!(CloudProvider::from_str("GCP"), Some(CloudProvider::Gcp));
        assert_eq!(CloudProvider::from_str("Azure"), Some(CloudProvider::Azure));
    }

    #[test]
    fn test_from_str_rejects_unknown_provider() {
        assert_eq!(CloudProvider::from_str("digitalocean"), None);
        assert_eq!(CloudProvider::from_str(""), None);
    }

    #[test]
    fn test_terraform_provider_names() {
        assert_eq!(CloudProvider::Aws.terraform_provider_name(), "aws");
        assert_eq!(CloudProvider::Gcp.terraform_provider_name(), "google");
        assert_eq!(CloudProvider::Azure.terraform_provider_name(), "azurerm");
    }
}
