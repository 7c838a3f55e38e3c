//! Variable and output schema derivation.
//!
//! The companion declaration documents are derived from the same selection
//! the synthesizer saw, so they stay consistent with whatever was actually
//! emitted.

mod outputs;
mod variables;

pub use outputs::OutputsBuilder;
pub use variables::VariablesBuilder;
