//! Shared utilities for the panel linking crates.
//!
//! Polars cell conversions used when a DataFrame column becomes a
//! linking variable.

pub mod polars;

pub use polars::{any_to_f64, any_to_link_value, any_to_string, column_link_values, parse_f64};
