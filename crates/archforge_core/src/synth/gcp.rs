//! GCP resource synthesis.

use crate::block::BlockSet;

use super::{ProviderSynthesizer, SynthContext};

/// Synthesizer for the Google Cloud provider dialect.
///
/// Networking is a custom-mode VPC network with one public and one private
/// subnetwork; NAT egress goes through a Cloud Router. Compute is GKE with
/// a dedicated service account and project IAM bindings as the identity
/// mechanism. Generated database credentials land in Secret Manager.
pub struct GcpSynthesizer;

impl ProviderSynthesizer for GcpSynthesizer {
    fn synthesize(&self, ctx: &SynthContext<'_>) -> BlockSet {
        let sel = ctx.selection;
        let mut blocks = BlockSet::new();

        blocks.push_if(sel.vpc, "networking", networking(ctx));
        blocks.push_if(sel.vpc && sel.nat_gateway, "nat_gateway", nat_gateway(ctx));
        blocks.push_if(
            sel.vpc && sel.security_groups,
            "security_groups",
            firewall(ctx),
        );
        blocks.push_if(sel.kubernetes, "kubernetes", cluster(ctx));
        blocks.push_if(
            sel.kubernetes && sel.node_pools,
            "node_pools",
            node_pool(ctx),
        );
        blocks.push_if(sel.relational_db, "relational_db", database(ctx));

        blocks
    }
}

fn networking(ctx: &SynthContext<'_>) -> String {
    let p = ctx.slug.as_str();
    format!(
        r#"resource "google_compute_network" "main" {{
  name                    = "{p}-network"
  auto_create_subnetworks = false
}}

resource "google_compute_subnetwork" "public" {{
  name          = "{p}-public"
  ip_cidr_range = cidrsubnet(var.vpc_cidr, 4, 0)
  region        = var.region
  network       = google_compute_network.main.id
}}

resource "google_compute_subnetwork" "private" {{
  name                     = "{p}-private"
  ip_cidr_range            = cidrsubnet(var.vpc_cidr, 4, 1)
  region                   = var.region
  network                  = google_compute_network.main.id
  private_ip_google_access = true

  secondary_ip_range {{
    range_name    = "{p}-pods"
    ip_cidr_range = "10.100.0.0/16"
  }}

  secondary_ip_range {{
    range_name    = "{p}-services"
    ip_cidr_range = "10.101.0.0/20"
  }}
}}"#
    )
}

fn nat_gateway(ctx: &SynthContext<'_>) -> String {
    let p = ctx.slug.as_str();
    format!(
        r#"resource "google_compute_router" "main" {{
  name    = "{p}-router"
  region  = var.region
  network = google_compute_network.main.id
}}

resource "google_compute_router_nat" "main" {{
  name                               = "{p}-nat"
  router                             = google_compute_router.main.name
  region                             = var.region
  nat_ip_allocate_option             = "AUTO_ONLY"
  source_subnetwork_ip_ranges_to_nat = "ALL_SUBNETWORKS_ALL_IP_RANGES"
}}"#
    )
}

fn firewall(ctx: &SynthContext<'_>) -> String {
    let p = ctx.slug.as_str();
    format!(
        r#"resource "google_compute_firewall" "allow_internal" {{
  name    = "{p}-allow-internal"
  network = google_compute_network.main.name

  allow {{
    protocol = "tcp"
    ports    = ["0-65535"]
  }}

  allow {{
    protocol = "udp"
    ports    = ["0-65535"]
  }}

  source_ranges = [var.vpc_cidr]
}}

resource "google_compute_firewall" "allow_https" {{
  name    = "{p}-allow-https"
  network = google_compute_network.main.name

  allow {{
    protocol = "tcp"
    ports    = ["443"]
  }}

  source_ranges = ["0.0.0.0/0"]
  target_tags   = ["{p}-web"]
}}"#
    )
}

fn cluster(ctx: &SynthContext<'_>) -> String {
    let p = ctx.slug.as_str();
    let sel = ctx.selection;
    let display = ctx.display_name;

    let network_attachment = if sel.vpc {
        format!(
            r#"
  network    = google_compute_network.main.id
  subnetwork = google_compute_subnetwork.private.id

  ip_allocation_policy {{
    cluster_secondary_range_name  = "{p}-pods"
    services_secondary_range_name = "{p}-services"
  }}
"#
        )
    } else {
        String::new()
    };

    let logging_service = if sel.logging {
        "logging.googleapis.com/kubernetes"
    } else {
        "none"
    };
    let monitoring_service = if sel.metrics {
        "monitoring.googleapis.com/kubernetes"
    } else {
        "none"
    };

    let mut iam_bindings = String::new();
    if sel.logging {
        iam_bindings.push_str(
            r#"
resource "google_project_iam_member" "cluster_logging" {
  project = var.project_id
  role    = "roles/logging.logWriter"
  member  = "serviceAccount:${google_service_account.cluster.email}"
}
"#,
        );
    }
    if sel.metrics {
        iam_bindings.push_str(
            r#"
resource "google_project_iam_member" "cluster_metrics" {
  project = var.project_id
  role    = "roles/monitoring.metricWriter"
  member  = "serviceAccount:${google_service_account.cluster.email}"
}
"#,
        );
    }

    format!(
        r#"resource "google_service_account" "cluster" {{
  account_id   = "{p}-cluster"
  display_name = "{display} cluster nodes"
}}
{iam_bindings}
resource "google_container_cluster" "main" {{
  name               = "{p}-cluster"
  location           = var.region
  min_master_version = var.cluster_version

  remove_default_node_pool = true
  initial_node_count       = 1
{network_attachment}
  logging_service    = "{logging_service}"
  monitoring_service = "{monitoring_service}"

  resource_labels = {{
    project     = "{p}"
    environment = var.environment
  }}
}}"#
    )
}

fn node_pool(ctx: &SynthContext<'_>) -> String {
    let p = ctx.slug.as_str();
    format!(
        r#"resource "google_container_node_pool" "main" {{
  name               = "{p}-workers"
  location           = var.region
  cluster            = google_container_cluster.main.name
  initial_node_count = var.node_desired_count

  autoscaling {{
    min_node_count = var.node_min_count
    max_node_count = var.node_max_count
  }}

  node_config {{
    machine_type    = var.node_machine_type
    service_account = google_service_account.cluster.email
    oauth_scopes    = ["https://www.googleapis.com/auth/cloud-platform"]

    labels = {{
      project = "{p}"
    }}
  }}
}}"#
    )
}

fn database(ctx: &SynthContext<'_>) -> String {
    let p = ctx.slug.as_str();
    let db_name = ctx.slug.underscored();
    let sel = ctx.selection;

    let network_attachment = if sel.vpc {
        format!(
            r#"resource "google_compute_global_address" "db" {{
  name          = "{p}-db-range"
  purpose       = "VPC_PEERING"
  address_type  = "INTERNAL"
  prefix_length = 16
  network       = google_compute_network.main.id
}}

resource "google_service_networking_connection" "db" {{
  network                 = google_compute_network.main.id
  service                 = "servicenetworking.googleapis.com"
  reserved_peering_ranges = [google_compute_global_address.db.name]
}}

"#
        )
    } else {
        String::new()
    };

    let ip_configuration = if sel.vpc {
        r#"
    ip_configuration {
      ipv4_enabled    = false
      private_network = google_compute_network.main.id
    }
"#
    } else {
        "\n"
    };

    let depends_on = if sel.vpc {
        "\n  depends_on = [google_service_networking_connection.db]\n"
    } else {
        "\n"
    };

    let (availability_type, deletion_protection) = if ctx.environment.is_production() {
        ("REGIONAL", "true")
    } else {
        ("ZONAL", "false")
    };

    format!(
        r#"resource "random_password" "db" {{
  length  = 32
  special = false
}}

resource "google_secret_manager_secret" "db" {{
  secret_id = "{p}-db-credentials"

  replication {{
    auto {{}}
  }}
}}

resource "google_secret_manager_secret_version" "db" {{
  secret      = google_secret_manager_secret.db.id
  secret_data = random_password.db.result
}}

{network_attachment}resource "google_sql_database_instance" "main" {{
  name             = "{p}-db"
  database_version = var.db_engine_version
  region           = var.region

  settings {{
    tier              = var.db_tier
    disk_size         = var.db_storage_gb
    availability_type = "{availability_type}"

    backup_configuration {{
      enabled = true

      backup_retention_settings {{
        retained_backups = var.db_backup_retention_days
      }}
    }}
{ip_configuration}
    user_labels = {{
      project     = "{p}"
      environment = var.environment
    }}
  }}

  deletion_protection = {deletion_protection}
{depends_on}}}

resource "google_sql_database" "main" {{
  name     = "{db_name}"
  instance = google_sql_database_instance.main.name
}}

resource "google_sql_user" "main" {{
  name     = "{db_name}_admin"
  instance = google_sql_database_instance.main.name
  password = random_password.db.result
}}"#
    )
}
