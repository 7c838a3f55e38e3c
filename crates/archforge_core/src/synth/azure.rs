//! Azure resource synthesis.

use crate::block::BlockSet;

use super::{ProviderSynthesizer, SynthContext};

/// Synthesizer for the Azure provider dialect.
///
/// Everything hangs off a single resource group. Networking is a virtual
/// network with public and private subnets; compute is AKS with a
/// system-assigned managed identity and role assignments as the identity
/// mechanism. Generated database credentials land in Key Vault.
pub struct AzureSynthesizer;

impl ProviderSynthesizer for AzureSynthesizer {
    fn synthesize(&self, ctx: &SynthContext<'_>) -> BlockSet {
        let sel = ctx.selection;
        let mut blocks = BlockSet::new();

        // Every Azure resource needs the resource group.
        blocks.push_if(sel.has_resources(), "resource_group", resource_group(ctx));

        blocks.push_if(sel.vpc, "networking", networking(ctx));
        blocks.push_if(sel.vpc && sel.nat_gateway, "nat_gateway", nat_gateway(ctx));
        blocks.push_if(
            sel.vpc && sel.security_groups,
            "security_groups",
            network_security_group(ctx),
        );
        blocks.push_if(sel.kubernetes, "kubernetes", cluster(ctx));
        blocks.push_if(
            sel.kubernetes && sel.node_pools,
            "node_pools",
            node_pool(ctx),
        );
        blocks.push_if(sel.relational_db, "relational_db", database(ctx));
        blocks.push_if(
            sel.kubernetes && sel.relational_db,
            "secret_access",
            secret_access(ctx),
        );

        blocks
    }
}

fn resource_group(ctx: &SynthContext<'_>) -> String {
    let p = ctx.slug.as_str();
    format!(
        r#"resource "azurerm_resource_group" "main" {{
  name     = "{p}-rg"
  location = var.region

  tags = {{
    project     = "{p}"
    environment = var.environment
  }}
}}"#
    )
}

fn networking(ctx: &SynthContext<'_>) -> String {
    let p = ctx.slug.as_str();
    format!(
        r#"resource "azurerm_virtual_network" "main" {{
  name                = "{p}-vnet"
  location            = azurerm_resource_group.main.location
  resource_group_name = azurerm_resource_group.main.name
  address_space       = [var.vpc_cidr]

  tags = {{
    project     = "{p}"
    environment = var.environment
  }}
}}

resource "azurerm_subnet" "public" {{
  name                 = "{p}-public"
  resource_group_name  = azurerm_resource_group.main.name
  virtual_network_name = azurerm_virtual_network.main.name
  address_prefixes     = [cidrsubnet(var.vpc_cidr, 4, 0)]
}}

resource "azurerm_subnet" "private" {{
  name                 = "{p}-private"
  resource_group_name  = azurerm_resource_group.main.name
  virtual_network_name = azurerm_virtual_network.main.name
  address_prefixes     = [cidrsubnet(var.vpc_cidr, 4, 1)]
}}"#
    )
}

fn nat_gateway(ctx: &SynthContext<'_>) -> String {
    let p = ctx.slug.as_str();
    format!(
        r#"resource "azurerm_public_ip" "nat" {{
  name                = "{p}-nat-ip"
  location            = azurerm_resource_group.main.location
  resource_group_name = azurerm_resource_group.main.name
  allocation_method   = "Static"
  sku                 = "Standard"
}}

resource "azurerm_nat_gateway" "main" {{
  name                = "{p}-nat"
  location            = azurerm_resource_group.main.location
  resource_group_name = azurerm_resource_group.main.name
  sku_name            = "Standard"
}}

resource "azurerm_nat_gateway_public_ip_association" "main" {{
  nat_gateway_id       = azurerm_nat_gateway.main.id
  public_ip_address_id = azurerm_public_ip.nat.id
}}

resource "azurerm_subnet_nat_gateway_association" "private" {{
  subnet_id      = azurerm_subnet.private.id
  nat_gateway_id = azurerm_nat_gateway.main.id
}}"#
    )
}

fn network_security_group(ctx: &SynthContext<'_>) -> String {
    let p = ctx.slug.as_str();
    format!(
        r#"resource "azurerm_network_security_group" "main" {{
  name                = "{p}-nsg"
  location            = azurerm_resource_group.main.location
  resource_group_name = azurerm_resource_group.main.name

  security_rule {{
    name                       = "allow-https"
    priority                   = 100
    direction                  = "Inbound"
    access                     = "Allow"
    protocol                   = "Tcp"
    source_port_range          = "*"
    destination_port_range     = "443"
    source_address_prefix      = "*"
    destination_address_prefix = "*"
  }}

  security_rule {{
    name                       = "allow-internal"
    priority                   = 200
    direction                  = "Inbound"
    access                     = "Allow"
    protocol                   = "*"
    source_port_range          = "*"
    destination_port_range     = "*"
    source_address_prefix      = var.vpc_cidr
    destination_address_prefix = "*"
  }}

  security_rule {{
    name                       = "deny-all-inbound"
    priority                   = 4096
    direction                  = "Inbound"
    access                     = "Deny"
    protocol                   = "*"
    source_port_range          = "*"
    destination_port_range     = "*"
    source_address_prefix      = "*"
    destination_address_prefix = "*"
  }}

  tags = {{
    project = "{p}"
  }}
}}

resource "azurerm_subnet_network_security_group_association" "private" {{
  subnet_id                 = azurerm_subnet.private.id
  network_security_group_id = azurerm_network_security_group.main.id
}}"#
    )
}

fn cluster(ctx: &SynthContext<'_>) -> String {
    let p = ctx.slug.as_str();
    let sel = ctx.selection;

    let vnet_subnet = if sel.vpc {
        "\n    vnet_subnet_id = azurerm_subnet.private.id\n"
    } else {
        "\n"
    };

    // Observability settings live inside the cluster block; the workspace
    // backing them is part of the same gated contribution.
    let workspace = if sel.logging || sel.metrics {
        format!(
            r#"resource "azurerm_log_analytics_workspace" "main" {{
  name                = "{p}-logs"
  location            = azurerm_resource_group.main.location
  resource_group_name = azurerm_resource_group.main.name
  sku                 = "PerGB2018"
  retention_in_days   = 30
}}

"#
        )
    } else {
        String::new()
    };

    let mut observability = String::new();
    if sel.logging {
        observability.push_str(
            r#"
  oms_agent {
    log_analytics_workspace_id = azurerm_log_analytics_workspace.main.id
  }
"#,
        );
    }
    if sel.metrics {
        observability.push_str(
            r#"
  monitor_metrics {}
"#,
        );
    }

    format!(
        r#"{workspace}resource "azurerm_kubernetes_cluster" "main" {{
  name                = "{p}-aks"
  location            = azurerm_resource_group.main.location
  resource_group_name = azurerm_resource_group.main.name
  dns_prefix          = "{p}"
  kubernetes_version  = var.cluster_version

  default_node_pool {{
    name       = "system"
    node_count = var.node_desired_count
    vm_size    = var.node_vm_size
{vnet_subnet}  }}

  identity {{
    type = "SystemAssigned"
  }}
{observability}
  tags = {{
    project     = "{p}"
    environment = var.environment
  }}
}}"#
    )
}

fn node_pool(ctx: &SynthContext<'_>) -> String {
    let p = ctx.slug.as_str();

    let vnet_subnet = if ctx.selection.vpc {
        "\n  vnet_subnet_id = azurerm_subnet.private.id\n"
    } else {
        "\n"
    };

    format!(
        r#"resource "azurerm_kubernetes_cluster_node_pool" "workers" {{
  name                  = "workers"
  kubernetes_cluster_id = azurerm_kubernetes_cluster.main.id
  vm_size               = var.node_vm_size
  enable_auto_scaling   = true
  node_count            = var.node_desired_count
  min_count             = var.node_min_count
  max_count             = var.node_max_count
{vnet_subnet}
  tags = {{
    project = "{p}"
  }}
}}"#
    )
}

fn database(ctx: &SynthContext<'_>) -> String {
    let p = ctx.slug.as_str();
    let db_admin = format!("{}_admin", ctx.slug.underscored());
    let vault_name = format!("{}kv", ctx.slug.condensed());
    let sel = ctx.selection;

    let delegated_subnet = if sel.vpc {
        format!(
            r#"resource "azurerm_subnet" "db" {{
  name                 = "{p}-db"
  resource_group_name  = azurerm_resource_group.main.name
  virtual_network_name = azurerm_virtual_network.main.name
  address_prefixes     = [cidrsubnet(var.vpc_cidr, 4, 2)]

  delegation {{
    name = "db"

    service_delegation {{
      name = "Microsoft.DBforPostgreSQL/flexibleServers"
    }}
  }}
}}

"#
        )
    } else {
        String::new()
    };

    let delegated_subnet_ref = if sel.vpc {
        "\n  delegated_subnet_id = azurerm_subnet.db.id\n"
    } else {
        "\n"
    };

    let hardening = if ctx.environment.is_production() {
        r#"  geo_redundant_backup_enabled = true

  high_availability {
    mode = "ZoneRedundant"
  }

  lifecycle {
    prevent_destroy = true
  }"#
    } else {
        r#"  geo_redundant_backup_enabled = false
  zone                         = "1""#
    };

    format!(
        r#"resource "random_password" "db" {{
  length  = 32
  special = false
}}

data "azurerm_client_config" "current" {{}}

resource "azurerm_key_vault" "main" {{
  name                = "{vault_name}"
  location            = azurerm_resource_group.main.location
  resource_group_name = azurerm_resource_group.main.name
  tenant_id           = data.azurerm_client_config.current.tenant_id
  sku_name            = "standard"

  enable_rbac_authorization = true
}}

resource "azurerm_key_vault_secret" "db" {{
  name         = "{p}-db-password"
  value        = random_password.db.result
  key_vault_id = azurerm_key_vault.main.id
}}

{delegated_subnet}resource "azurerm_postgresql_flexible_server" "main" {{
  name                   = "{p}-db"
  location               = azurerm_resource_group.main.location
  resource_group_name    = azurerm_resource_group.main.name
  version                = var.db_engine_version
  sku_name               = var.db_sku_name
  storage_mb             = var.db_storage_gb * 1024
  administrator_login    = "{db_admin}"
  administrator_password = random_password.db.result
  backup_retention_days  = var.db_backup_retention_days
{delegated_subnet_ref}
{hardening}

  tags = {{
    project     = "{p}"
    environment = var.environment
  }}
}}"#
    )
}

fn secret_access(_ctx: &SynthContext<'_>) -> String {
    // Grant the cluster's managed identity read access to the vault.
    r#"resource "azurerm_role_assignment" "cluster_secrets" {
  scope                = azurerm_key_vault.main.id
  role_definition_name = "Key Vault Secrets User"
  principal_id         = azurerm_kubernetes_cluster.main.identity[0].principal_id
}"#
    .to_string()
}
