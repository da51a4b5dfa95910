//! Cartesian product of several DataFrames.

use panel_model::LinkError;
use polars::prelude::DataFrame;
use tracing::{debug, info_span};

use crate::bind::{bind_columns, take_rows};
use crate::error::{LinkDatasetError, Result};

/// Every combination of rows across `tables`, bound column-wise.
///
/// The first table varies slowest and the last fastest. Repeated column names
/// get the same `.1`, `.2` suffixes as [`crate::link_datasets`].
///
/// # Errors
///
/// - `InputCount` for fewer than two tables
/// - `ProductOverflow` if the row count does not fit in `usize`
pub fn cross_join(tables: &[DataFrame]) -> Result<DataFrame> {
    if tables.len() < 2 {
        return Err(LinkError::InputCount {
            found: tables.len(),
        }
        .into());
    }
    let span = info_span!("cross_join", tables = tables.len());
    let _guard = span.enter();

    let total = tables
        .iter()
        .try_fold(1usize, |acc, df| acc.checked_mul(df.height()))
        .ok_or(LinkDatasetError::ProductOverflow {
            tables: tables.len(),
        })?;
    debug!(rows = total, "cross join size");

    let mut repeat_each = total;
    let mut subsets = Vec::with_capacity(tables.len());
    for df in tables {
        let height = df.height();
        repeat_each = if height == 0 { 0 } else { repeat_each / height };
        let indices = product_indices(total, height, repeat_each);
        subsets.push(take_rows(df, &indices)?);
    }
    bind_columns(&subsets)
}

/// Row indices of one table within a product of `total` rows, where each of
/// its rows is repeated `repeat_each` times consecutively.
fn product_indices(total: usize, height: usize, repeat_each: usize) -> Vec<usize> {
    if total == 0 {
        return Vec::new();
    }
    (0..total).map(|row| (row / repeat_each) % height).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_indices_first_table_slowest() {
        assert_eq!(product_indices(6, 2, 3), vec![0, 0, 0, 1, 1, 1]);
        assert_eq!(product_indices(6, 3, 1), vec![0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn product_indices_empty_product() {
        assert!(product_indices(0, 0, 0).is_empty());
    }
}
