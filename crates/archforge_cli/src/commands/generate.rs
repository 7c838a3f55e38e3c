//! Generate command - run the engine against a request document.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use archforge_core::{Engine, GenerationRequest, GenerationResult};

#[derive(Args)]
pub struct GenerateArgs {
    /// Path to the request document (.json, .yaml or .yml)
    #[arg(short, long)]
    request: PathBuf,

    /// Directory to write the generated files into
    #[arg(short, long, default_value = "./infrastructure")]
    out: PathBuf,

    /// Overwrite existing files in the output directory
    #[arg(long)]
    force: bool,
}

pub async fn execute(args: GenerateArgs) -> Result<()> {
    let request = load_request(&args.request)?;
    info!(
        "Generating configuration for '{}' on {}",
        request.architecture_name, request.cloud_provider
    );

    let result = Engine::generate(&request)?;

    write_files(&args.out, &result, args.force)?;

    println!(
        "✅ Generated {} files for '{}' ({} / {} / {})",
        result.files.len(),
        request.architecture_name,
        result.provider,
        result.region,
        result.environment
    );
    for filename in result.files.keys() {
        println!("   - {}", args.out.join(filename).display());
    }

    Ok(())
}

fn load_request(path: &Path) -> Result<GenerationRequest> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read request document {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();

    let request = match extension {
        "json" => serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON request in {}", path.display()))?,
        "yaml" | "yml" => serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid YAML request in {}", path.display()))?,
        other => anyhow::bail!("Unsupported request format: .{other} (expected .json or .yaml)"),
    };

    Ok(request)
}

fn write_files(out: &Path, result: &GenerationResult, force: bool) -> Result<()> {
    fs::create_dir_all(out)
        .with_context(|| format!("Failed to create output directory {}", out.display()))?;

    for (filename, content) in &result.files {
        let target = out.join(filename);
        if target.exists() && !force {
            anyhow::bail!(
                "{} already exists; pass --force to overwrite",
                target.display()
            );
        }
        fs::write(&target, content)
            .with_context(|| format!("Failed to write {}", target.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn sample_request() -> GenerationRequest {
        let mut components = BTreeMap::new();
        components.insert("vpc".to_string(), true);
        components.insert("kubernetes".to_string(), true);

        GenerationRequest {
            architecture_id: "arch-1".to_string(),
            architecture_name: "My Shop".to_string(),
            services: Vec::new(),
            cloud_provider: "aws".to_string(),
            region: "us-east-1".to_string(),
            environment: "development".to_string(),
            components,
        }
    }

    #[test]
    fn test_write_files_round_trip() {
        let dir = tempdir().unwrap();
        let result = Engine::generate(&sample_request()).unwrap();

        write_files(dir.path(), &result, false).unwrap();

        assert!(dir.path().join("main.tf").exists());
        assert!(dir.path().join("variables.tf").exists());
        assert!(dir.path().join("outputs.tf").exists());
        assert!(dir.path().join("resources.tf").exists());
        assert!(dir.path().join("README.md").exists());

        let written = fs::read_to_string(dir.path().join("main.tf")).unwrap();
        assert_eq!(&written, &result.files["main.tf"]);
    }

    #[test]
    fn test_write_files_refuses_overwrite_without_force() {
        let dir = tempdir().unwrap();
        let result = Engine::generate(&sample_request()).unwrap();

        write_files(dir.path(), &result, false).unwrap();
        assert!(write_files(dir.path(), &result, false).is_err());
        assert!(write_files(dir.path(), &result, true).is_ok());
    }

    #[test]
    fn test_load_request_json_and_yaml() {
        let dir = tempdir().unwrap();
        let request = sample_request();

        let json_path = dir.path().join("request.json");
        fs::write(&json_path, serde_json::to_string(&request).unwrap()).unwrap();
        let loaded = load_request(&json_path).unwrap();
        assert_eq!(loaded.architecture_name, "My Shop");

        let yaml_path = dir.path().join("request.yaml");
        fs::write(&yaml_path, serde_yaml::to_string(&request).unwrap()).unwrap();
        let loaded = load_request(&yaml_path).unwrap();
        assert_eq!(loaded.cloud_provider, "aws");
    }

    #[test]
    fn test_load_request_rejects_unknown_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("request.toml");
        fs::write(&path, "architecture_name = \"x\"").unwrap();
        assert!(load_request(&path).is_err());
    }
}
