//! Components command - list known component flags.

use anyhow::Result;
use clap::Args;

use archforge_core::{CloudProvider, ComponentSelection};

#[derive(Args)]
pub struct ComponentsArgs {
    /// Also list the supported cloud providers
    #[arg(long)]
    providers: bool,
}

pub async fn execute(args: ComponentsArgs) -> Result<()> {
    println!("📦 Known components:");
    for (name, prerequisites) in ComponentSelection::KNOWN {
        if prerequisites.is_empty() {
            println!("   - {name}");
        } else {
            println!("   - {name} (requires: {})", prerequisites.join(", "));
        }
    }

    if args.providers {
        println!();
        println!("☁️  Supported providers:");
        for provider in CloudProvider::all() {
            println!("   - {} ({})", provider, provider.label());
        }
    }

    Ok(())
}
