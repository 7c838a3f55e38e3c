//! Outputs document builder.

use std::fmt::Write;

use crate::provider::CloudProvider;
use crate::request::ComponentSelection;

/// Builds the outputs document.
///
/// Each output group is gated by the same flag as the resource blocks it
/// references, so every value expression resolves against a resource the
/// synthesizer emitted for the same request.
pub struct OutputsBuilder;

impl OutputsBuilder {
    pub fn build(
        provider: CloudProvider,
        selection: &ComponentSelection,
        display_name: &str,
    ) -> String {
        let mut doc = format!("# Output values for {display_name}.\n");

        if selection.vpc {
            Self::networking_group(&mut doc, provider);
        }

        if selection.kubernetes {
            Self::cluster_group(&mut doc, provider);
        }

        if selection.relational_db {
            Self::database_group(&mut doc, provider);
        }

        doc
    }

    fn emit(doc: &mut String, name: &str, description: &str, value: &str) {
        write!(
            doc,
            r#"
output "{name}" {{
  description = "{description}"
  value       = {value}
}}
"#
        )
        .expect("writing to String cannot fail");
    }

    fn networking_group(doc: &mut String, provider: CloudProvider) {
        match provider {
            CloudProvider::Aws => {
                Self::emit(doc, "vpc_id", "ID of the VPC", "aws_vpc.main.id");
                Self::emit(
                    doc,
                    "public_subnet_ids",
                    "IDs of the public subnets",
                    "aws_subnet.public[*].id",
                );
                Self::emit(
                    doc,
                    "private_subnet_ids",
                    "IDs of the private subnets",
                    "aws_subnet.private[*].id",
                );
            }
            CloudProvider::Gcp => {
                Self::emit(
                    doc,
                    "network_id",
                    "ID of the VPC network",
                    "google_compute_network.main.id",
                );
                Self::emit(
                    doc,
                    "public_subnetwork_id",
                    "ID of the public subnetwork",
                    "google_compute_subnetwork.public.id",
                );
                Self::emit(
                    doc,
                    "private_subnetwork_id",
                    "ID of the private subnetwork",
                    "google_compute_subnetwork.private.id",
                );
            }
            CloudProvider::Azure => {
                Self::emit(
                    doc,
                    "virtual_network_id",
                    "ID of the virtual network",
                    "azurerm_virtual_network.main.id",
                );
                Self::emit(
                    doc,
                    "public_subnet_id",
                    "ID of the public subnet",
                    "azurerm_subnet.public.id",
                );
                Self::emit(
                    doc,
                    "private_subnet_id",
                    "ID of the private subnet",
                    "azurerm_subnet.private.id",
                );
            }
        }
    }

    fn cluster_group(doc: &mut String, provider: CloudProvider) {
        let cluster = provider.cluster_address();
        Self::emit(
            doc,
            "cluster_name",
            "Name of the managed cluster",
            &format!("{cluster}.name"),
        );
        let endpoint = match provider {
            CloudProvider::Aws => format!("{cluster}.endpoint"),
            CloudProvider::Gcp => format!("{cluster}.endpoint"),
            CloudProvider::Azure => format!("{cluster}.fqdn"),
        };
        Self::emit(
            doc,
            "cluster_endpoint",
            "Endpoint of the managed cluster",
            &endpoint,
        );
    }

    fn database_group(doc: &mut String, provider: CloudProvider) {
        let database = provider.database_address();
        let endpoint = match provider {
            CloudProvider::Aws => format!("{database}.endpoint"),
            CloudProvider::Gcp => format!("{database}.connection_name"),
            CloudProvider::Azure => format!("{database}.fqdn"),
        };
        Self::emit(
            doc,
            "database_endpoint",
            "Connection endpoint of the database",
            &endpoint,
        );

        let secret = match provider {
            CloudProvider::Aws => "aws_secretsmanager_secret.db.arn",
            CloudProvider::Gcp => "google_secret_manager_secret.db.id",
            CloudProvider::Azure => "azurerm_key_vault_secret.db.id",
        };
        Self::emit(
            doc,
            "database_secret_ref",
            "Reference to the generated database credential",
            secret,
        );
    }
}
