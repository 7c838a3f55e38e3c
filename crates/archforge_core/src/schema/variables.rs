//! Variables document builder.

use std::fmt::Write;

use crate::provider::CloudProvider;
use crate::request::{ComponentSelection, Environment};

/// Builds the variables document.
///
/// A fixed baseline group is always declared. The kubernetes and database
/// parameter groups are declared only when their component is enabled, so
/// every parameter a synthesized resource references has a matching
/// declaration.
pub struct VariablesBuilder;

impl VariablesBuilder {
    pub fn build(
        provider: CloudProvider,
        selection: &ComponentSelection,
        region: &str,
        environment: Environment,
        display_name: &str,
    ) -> String {
        let mut doc = format!("# Input variables for {display_name}.\n");

        Self::baseline(&mut doc, provider, region, environment);

        if selection.kubernetes {
            Self::kubernetes_group(&mut doc, provider);
        }

        if selection.relational_db {
            Self::database_group(&mut doc, provider);
        }

        doc
    }

    fn baseline(doc: &mut String, provider: CloudProvider, region: &str, environment: Environment) {
        write!(
            doc,
            r#"
variable "region" {{
  description = "Cloud provider region"
  type        = string
  default     = "{region}"
}}

variable "environment" {{
  description = "Deployment environment (development, staging, production)"
  type        = string
  default     = "{environment}"

  validation {{
    condition     = contains(["development", "staging", "production"], var.environment)
    error_message = "Environment must be development, staging, or production."
  }}
}}

variable "vpc_cidr" {{
  description = "Base address range for the private network"
  type        = string
  default     = "10.0.0.0/16"
}}
"#
        )
        .expect("writing to String cannot fail");

        if provider == CloudProvider::Gcp {
            doc.push_str(
                r#"
variable "project_id" {
  description = "Google Cloud project ID"
  type        = string
}
"#,
            );
        }
    }

    fn kubernetes_group(doc: &mut String, provider: CloudProvider) {
        write!(
            doc,
            r#"
variable "cluster_version" {{
  description = "Kubernetes control plane version"
  type        = string
  default     = "1.29"
}}

variable "{node_size}" {{
  description = "Worker node size"
  type        = string
  default     = "{node_size_default}"
}}

variable "node_desired_count" {{
  description = "Desired number of worker nodes"
  type        = number
  default     = 2
}}

variable "node_min_count" {{
  description = "Minimum number of worker nodes"
  type        = number
  default     = 1
}}

variable "node_max_count" {{
  description = "Maximum number of worker nodes"
  type        = number
  default     = 5
}}
"#,
            node_size = provider.node_size_variable(),
            node_size_default = provider.node_size_default(),
        )
        .expect("writing to String cannot fail");
    }

    fn database_group(doc: &mut String, provider: CloudProvider) {
        write!(
            doc,
            r#"
variable "{db_size}" {{
  description = "Database instance size"
  type        = string
  default     = "{db_size_default}"
}}

variable "db_storage_gb" {{
  description = "Database storage size in GB"
  type        = number
  default     = 50
}}

variable "db_engine_version" {{
  description = "Database engine version"
  type        = string
  default     = "{db_engine_version}"
}}

variable "db_backup_retention_days" {{
  description = "Number of days to retain database backups"
  type        = number
  default     = 7
}}
"#,
            db_size = provider.db_size_variable(),
            db_size_default = provider.db_size_default(),
            db_engine_version = provider.db_engine_version_default(),
        )
        .expect("writing to String cannot fail");
    }
}
