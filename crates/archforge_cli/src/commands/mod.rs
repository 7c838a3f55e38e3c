//! CLI command definitions.

use clap::{Parser, Subcommand};

pub mod components;
pub mod generate;

/// archforge - infrastructure code generation from architecture descriptions
#[derive(Parser)]
#[command(name = "archforge")]
#[command(version, about = "Generate Terraform configuration from an architecture description")]
#[command(long_about = r#"
archforge turns an abstract architecture description (cloud provider, region,
deployment environment and a set of enabled infrastructure components) into a
complete, internally consistent set of Terraform documents.

WORKFLOWS:
  generate    → Generate configuration from a request document
  components  → List the known component flags and their prerequisites

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Validation failure
  5 - Generation error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate infrastructure configuration from a request document
    Generate(generate::GenerateArgs),

    /// List known components and their prerequisites
    Components(components::ComponentsArgs),
}
