//! Data model for linking datasets through a Gaussian copula.
//!
//! Plain types shared by the sampling core, the dataset joiner, and the CLI.
//! Nothing here performs numerical work beyond storage and ordering.

pub mod correlation;
pub mod draw;
pub mod error;
pub mod options;
pub mod sample;
pub mod value;

pub use correlation::CorrelationSpec;
pub use draw::{DrawResult, IndexColumn, SamplingStrategy};
pub use error::{LinkError, Result};
pub use options::DrawOptions;
pub use sample::SampleSize;
pub use value::{LinkValue, LinkingVariable};
