//! Narrative usage document generation.

use std::fmt::Write;

use chrono::{Datelike, Utc};

use crate::provider::CloudProvider;
use crate::request::{ComponentSelection, Environment, Service};

fn component_label(name: &str) -> &'static str {
    match name {
        "vpc" => "Private network (VPC)",
        "nat_gateway" => "NAT egress gateway",
        "kubernetes" => "Managed Kubernetes cluster",
        "node_pools" => "Autoscaled worker node pool",
        "relational_db" => "Managed relational database",
        "security_groups" => "Perimeter security rules",
        "logging" => "Cluster logging",
        "metrics" => "Cluster metrics",
        _ => "Component",
    }
}

/// Render the human-readable usage guide.
///
/// The copyright year is the only part of the whole result that may differ
/// between identical requests.
pub fn render(
    display_name: &str,
    provider: CloudProvider,
    region: &str,
    environment: Environment,
    selection: &ComponentSelection,
    services: &[Service],
    slug: &str,
    has_resources: bool,
) -> String {
    let mut doc = format!(
        "# {display_name} Infrastructure\n\n\
         Terraform configuration for **{display_name}** ({environment}) on \
         {label}, region `{region}`.\n\n",
        label = provider.label(),
    );

    doc.push_str("## Components\n\n");
    let enabled = selection.enabled();
    if enabled.is_empty() {
        doc.push_str("No infrastructure components are enabled.\n");
    } else {
        for name in &enabled {
            writeln!(doc, "- {} (`{}`)", component_label(name), name)
                .expect("writing to String cannot fail");
        }
    }

    doc.push_str("\n## Services\n\n");
    if services.is_empty() {
        doc.push_str("No services declared.\n");
    } else {
        for service in services {
            let kind = service.service_type.as_deref().unwrap_or("service");
            match &service.description {
                Some(desc) => writeln!(doc, "- **{}** ({kind}): {desc}", service.name),
                None => writeln!(doc, "- **{}** ({kind})", service.name),
            }
            .expect("writing to String cannot fail");
        }
    }

    doc.push_str("\n## Files\n\n");
    doc.push_str("| File | Purpose |\n|------|---------|\n");
    doc.push_str("| `main.tf` | Terraform settings, state backend and provider configuration |\n");
    doc.push_str("| `variables.tf` | Input variable declarations |\n");
    doc.push_str("| `outputs.tf` | Output value declarations |\n");
    if has_resources {
        doc.push_str("| `resources.tf` | Provider resource definitions |\n");
    }

    write!(
        doc,
        "\n## Usage\n\n\
         ```sh\n\
         terraform init\n\
         terraform plan -input=false -out=tfplan\n\
         terraform apply tfplan\n\
         ```\n\n\
         Remote state is kept under the `{slug}-terraform-state` backend; make\n\
         sure it exists before running `terraform init`.\n"
    )
    .expect("writing to String cannot fail");

    if environment.is_production() {
        doc.push_str(
            "\nThis is a production configuration: the database runs with\n\
             multi-zone redundancy and deletion protection, and teardown takes\n\
             a final snapshot.\n",
        );
    }

    write!(
        doc,
        "\n---\n\u{a9} {year} {display_name}. Generated configuration; edit by\n\
         regenerating rather than by hand.\n",
        year = Utc::now().year()
    )
    .expect("writing to String cannot fail");

    doc
}
