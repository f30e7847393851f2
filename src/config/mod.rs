//! JSON configuration for term builds and the demo runner.

pub mod demo;
pub mod terms;

pub use demo::{load_runtime_config, OutputConfig, RuntimeConfig, Variant};
pub use terms::{load_config, load_params, load_unwanted, TermConfig};
