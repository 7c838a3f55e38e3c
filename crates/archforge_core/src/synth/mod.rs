//! Provider resource synthesizers.
//!
//! One pure synthesizer per provider dialect, selected by exhaustive enum
//! dispatch. Each maps a component selection plus naming and placement
//! context onto an ordered set of gated resource blocks covering four
//! domains: networking, compute, data and perimeter.

mod aws;
mod azure;
mod gcp;

pub use aws::AwsSynthesizer;
pub use azure::AzureSynthesizer;
pub use gcp::GcpSynthesizer;

use crate::block::BlockSet;
use crate::naming::ProjectSlug;
use crate::provider::CloudProvider;
use crate::request::{ComponentSelection, Environment};

/// Inputs shared by every synthesizer run.
#[derive(Debug, Clone, Copy)]
pub struct SynthContext<'a> {
    pub selection: &'a ComponentSelection,
    pub region: &'a str,
    pub environment: Environment,
    pub slug: &'a ProjectSlug,
    pub display_name: &'a str,
}

/// A pure mapping from selection context to provider resource blocks.
pub trait ProviderSynthesizer {
    fn synthesize(&self, ctx: &SynthContext<'_>) -> BlockSet;
}

/// Select the synthesizer for a provider.
pub fn synthesizer_for(provider: CloudProvider) -> Box<dyn ProviderSynthesizer> {
    match provider {
        CloudProvider::Aws => Box::new(AwsSynthesizer),
        CloudProvider::Gcp => Box::new(GcpSynthesizer),
        CloudProvider::Azure => Box::new(AzureSynthesizer),
    }
}
