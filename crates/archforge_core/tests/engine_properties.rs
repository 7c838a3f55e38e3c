//! Integration tests for the generation engine.

use std::collections::BTreeMap;

use regex::Regex;

use archforge_core::{Engine, GenerateError, GenerationRequest, GenerationResult};

fn request(provider: &str, environment: &str, components: &[(&str, bool)]) -> GenerationRequest {
    GenerationRequest {
        architecture_id: "arch-42".to_string(),
        architecture_name: "My Shop".to_string(),
        services: Vec::new(),
        cloud_provider: provider.to_string(),
        region: match provider {
            "gcp" => "us-central1",
            "azure" => "eastus",
            _ => "us-east-1",
        }
        .to_string(),
        environment: environment.to_string(),
        components: components
            .iter()
            .map(|(name, enabled)| (name.to_string(), *enabled))
            .collect(),
    }
}

fn full_selection() -> Vec<(&'static str, bool)> {
    vec![
        ("vpc", true),
        ("nat_gateway", true),
        ("kubernetes", true),
        ("node_pools", true),
        ("relational_db", true),
        ("security_groups", true),
        ("logging", true),
        ("metrics", true),
    ]
}

fn generate(provider: &str, environment: &str, components: &[(&str, bool)]) -> GenerationResult {
    Engine::generate(&request(provider, environment, components)).unwrap()
}

#[test]
fn test_determinism_byte_identical_results() {
    for provider in ["aws", "gcp", "azure"] {
        let req = request(provider, "production", &full_selection());
        let first = Engine::generate(&req).unwrap();
        let second = Engine::generate(&req).unwrap();
        assert_eq!(first, second, "{provider} results differ between runs");
    }
}

#[test]
fn test_referential_integrity_of_outputs() {
    let reference = Regex::new(r"\b((?:aws|google|azurerm)_[a-z0-9_]+)\.([a-z0-9_]+)").unwrap();

    for provider in ["aws", "gcp", "azure"] {
        let result = generate(provider, "production", &full_selection());
        let outputs = &result.files["outputs.tf"];
        let resources = &result.files["resources.tf"];

        for capture in reference.captures_iter(outputs) {
            let declaration = format!("resource \"{}\" \"{}\"", &capture[1], &capture[2]);
            assert!(
                resources.contains(&declaration),
                "{provider}: output references {} which is not declared",
                &capture[0]
            );
        }
    }
}

#[test]
fn test_variable_completeness() {
    let var_ref = Regex::new(r"\bvar\.([a-z0-9_]+)").unwrap();

    let selections: Vec<Vec<(&str, bool)>> = vec![
        full_selection(),
        vec![("vpc", true)],
        vec![("relational_db", true)],
        vec![("kubernetes", true), ("node_pools", true)],
        vec![("vpc", true), ("nat_gateway", true), ("security_groups", true)],
    ];

    for provider in ["aws", "gcp", "azure"] {
        for selection in &selections {
            let result = generate(provider, "staging", selection);
            let variables = &result.files["variables.tf"];

            let mut scanned = result.files["main.tf"].clone();
            if let Some(resources) = result.files.get("resources.tf") {
                scanned.push_str(resources);
            }

            for capture in var_ref.captures_iter(&scanned) {
                let declaration = format!("variable \"{}\"", &capture[1]);
                assert!(
                    variables.contains(&declaration),
                    "{provider}: var.{} referenced but not declared for {selection:?}",
                    &capture[1]
                );
            }
        }
    }
}

#[test]
fn test_fail_soft_node_pools_without_kubernetes() {
    for provider in ["aws", "gcp", "azure"] {
        let result = generate(
            provider,
            "development",
            &[("vpc", true), ("node_pools", true), ("kubernetes", false)],
        );
        let resources = &result.files["resources.tf"];
        for marker in [
            "aws_eks_node_group",
            "google_container_node_pool",
            "azurerm_kubernetes_cluster_node_pool",
        ] {
            assert!(
                !resources.contains(marker),
                "{provider}: node pool block emitted without a cluster"
            );
        }
    }
}

#[test]
fn test_fail_soft_nat_and_perimeter_without_vpc() {
    for provider in ["aws", "gcp", "azure"] {
        let result = generate(
            provider,
            "development",
            &[
                ("vpc", false),
                ("nat_gateway", true),
                ("security_groups", true),
                ("kubernetes", true),
            ],
        );
        let resources = &result.files["resources.tf"];
        for marker in [
            "aws_nat_gateway",
            "aws_security_group",
            "google_compute_router_nat",
            "google_compute_firewall",
            "azurerm_nat_gateway",
            "azurerm_network_security_group",
        ] {
            assert!(
                !resources.contains(marker),
                "{provider}: {marker} emitted without its vpc prerequisite"
            );
        }
    }
}

#[test]
fn test_observability_flags_have_no_effect_without_kubernetes() {
    for provider in ["aws", "gcp", "azure"] {
        let with_flags = generate(
            provider,
            "development",
            &[("vpc", true), ("logging", true), ("metrics", true)],
        );
        let without_flags = generate(provider, "development", &[("vpc", true)]);
        assert_eq!(
            with_flags.files["resources.tf"], without_flags.files["resources.tf"],
            "{provider}: logging/metrics changed resources without a cluster"
        );
    }
}

#[test]
fn test_resources_document_emitted_conditionally() {
    for provider in ["aws", "gcp", "azure"] {
        // Only dependent flags set: no resource-bearing component.
        let none = generate(
            provider,
            "development",
            &[("nat_gateway", true), ("security_groups", true)],
        );
        assert!(!none.files.contains_key("resources.tf"));

        for component in ["vpc", "kubernetes", "relational_db"] {
            let some = generate(provider, "development", &[(component, true)]);
            assert!(
                some.files.contains_key("resources.tf"),
                "{provider}: resources.tf missing with {component} enabled"
            );
        }
    }
}

#[test]
fn test_slug_appears_in_every_project_named_file() {
    for provider in ["aws", "gcp", "azure"] {
        let result = generate(provider, "production", &full_selection());
        for file in ["main.tf", "resources.tf", "README.md"] {
            assert!(
                result.files[file].contains("my-shop"),
                "{provider}: slug missing from {file}"
            );
        }
        assert!(result.files["main.tf"].contains("my-shop-terraform-state"));
    }
}

#[test]
fn test_production_hardening_aws_concrete_case() {
    let result = generate("aws", "production", &full_selection());

    let bootstrap = &result.files["main.tf"];
    assert!(bootstrap.contains("bucket  = \"my-shop-terraform-state\""));

    let resources = &result.files["resources.tf"];
    assert!(resources.contains("resource \"aws_vpc\" \"main\""));
    assert!(resources.contains("resource \"aws_subnet\" \"public\""));
    assert!(resources.contains("resource \"aws_subnet\" \"private\""));
    assert!(resources.contains("count = 3"));
    assert!(resources.contains("resource \"aws_eks_cluster\" \"main\""));
    assert!(resources.contains("resource \"aws_eks_node_group\" \"main\""));
    assert!(resources.contains("resource \"aws_db_instance\" \"main\""));
    assert!(resources.contains("multi_az                  = true"));
    assert!(resources.contains("deletion_protection       = true"));
    assert!(resources.contains("skip_final_snapshot       = false"));
    assert!(resources.contains("final_snapshot_identifier = \"my-shop-db-final\""));

    let outputs = &result.files["outputs.tf"];
    assert!(outputs.contains("output \"vpc_id\""));
    assert!(outputs.contains("output \"cluster_endpoint\""));
    assert!(outputs.contains("output \"database_endpoint\""));
}

#[test]
fn test_non_production_database_is_disposable() {
    let result = generate("aws", "staging", &full_selection());
    let resources = &result.files["resources.tf"];
    assert!(resources.contains("multi_az            = false"));
    assert!(resources.contains("deletion_protection = false"));
    assert!(resources.contains("skip_final_snapshot = true"));
    assert!(!resources.contains("final_snapshot_identifier"));
}

#[test]
fn test_production_hardening_gcp_and_azure() {
    let gcp = generate("gcp", "production", &full_selection());
    let gcp_resources = &gcp.files["resources.tf"];
    assert!(gcp_resources.contains("availability_type = \"REGIONAL\""));
    assert!(gcp_resources.contains("deletion_protection = true"));

    let gcp_dev = generate("gcp", "development", &full_selection());
    assert!(gcp_dev.files["resources.tf"].contains("availability_type = \"ZONAL\""));

    let azure = generate("azure", "production", &full_selection());
    let azure_resources = &azure.files["resources.tf"];
    assert!(azure_resources.contains("mode = \"ZoneRedundant\""));
    assert!(azure_resources.contains("prevent_destroy = true"));
    assert!(azure_resources.contains("geo_redundant_backup_enabled = true"));

    let azure_dev = generate("azure", "development", &full_selection());
    assert!(!azure_dev.files["resources.tf"].contains("prevent_destroy"));
}

#[test]
fn test_empty_selection_produces_baseline_only() {
    for provider in ["aws", "gcp", "azure"] {
        let result = generate(provider, "development", &[]);

        assert!(!result.files.contains_key("resources.tf"));
        assert!(!result.files["outputs.tf"].contains("output \""));

        let variables = &result.files["variables.tf"];
        assert!(variables.contains("variable \"region\""));
        assert!(variables.contains("variable \"environment\""));
        assert!(variables.contains("variable \"vpc_cidr\""));
        assert!(!variables.contains("cluster_version"));
        assert!(!variables.contains("db_storage_gb"));

        // The guaranteed documents are always present.
        for file in ["main.tf", "variables.tf", "outputs.tf", "README.md"] {
            assert!(result.files.contains_key(file));
        }
    }
}

#[test]
fn test_result_echoes_request_context() {
    let result = generate("gcp", "staging", &[("vpc", true)]);
    assert_eq!(result.provider, "gcp");
    assert_eq!(result.region, "us-central1");
    assert_eq!(result.environment, "staging");
}

#[test]
fn test_generated_credential_is_deferred_to_apply_time() {
    for provider in ["aws", "gcp", "azure"] {
        let result = generate(provider, "production", &[("relational_db", true)]);
        let resources = &result.files["resources.tf"];
        assert!(resources.contains("resource \"random_password\" \"db\""));

        // The engine itself must not mint a secret value.
        assert!(resources.contains("random_password.db.result"));
        assert!(result.files["main.tf"].contains("hashicorp/random"));
    }
}

#[test]
fn test_unknown_provider_fails_closed() {
    let err = Engine::generate(&request("digitalocean", "production", &[])).unwrap_err();
    assert!(matches!(err, GenerateError::UnsupportedProvider(_)));
}

#[test]
fn test_empty_architecture_name_rejected() {
    let mut req = request("aws", "production", &[]);
    req.architecture_name = "   ".to_string();
    let err = Engine::generate(&req).unwrap_err();
    assert!(matches!(err, GenerateError::InvalidRequest(_)));
}

#[test]
fn test_unknown_environment_rejected() {
    let err = Engine::generate(&request("aws", "qa", &[])).unwrap_err();
    assert!(matches!(err, GenerateError::InvalidRequest(_)));
}

#[test]
fn test_unknown_component_rejected() {
    let err =
        Engine::generate(&request("aws", "production", &[("blockchain", true)])).unwrap_err();
    assert!(matches!(err, GenerateError::InvalidRequest(_)));
}

#[test]
fn test_services_surface_in_narrative_only() {
    let mut req = request("aws", "development", &[("vpc", true)]);
    req.services = vec![archforge_core::Service {
        name: "checkout-api".to_string(),
        service_type: Some("api".to_string()),
        description: Some("Order checkout".to_string()),
    }];

    let result = Engine::generate(&req).unwrap();
    assert!(result.files["README.md"].contains("checkout-api"));
    assert!(!result.files["resources.tf"].contains("checkout-api"));
    assert!(!result.files["main.tf"].contains("checkout-api"));
}
