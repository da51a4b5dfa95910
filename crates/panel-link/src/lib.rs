//! Dataset-level linking on top of the sampling core.
//!
//! Reads one linking column per DataFrame, draws joint row indices, and binds
//! the resampled frames into one table. Also provides a plain cross join.

pub mod bind;
pub mod cross;
pub mod error;
pub mod joiner;

pub use bind::{bind_columns, make_unique, take_rows};
pub use cross::cross_join;
pub use error::{LinkDatasetError, Result};
pub use joiner::{
    LinkRequest, LinkedFrame, bind_draws, extract_linking_variables, link_datasets,
    link_datasets_default,
};
