//! CLI library components for the dataset linker.

pub mod inputs;
pub mod logging;
