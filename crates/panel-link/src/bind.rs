//! Row subsetting and column binding.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::{Column, DataFrame, IdxCa, IdxSize};

use crate::error::{LinkDatasetError, Result};

/// Make names unique by appending `.1`, `.2`, ... to repeats.
///
/// The first occurrence keeps its name; later ones take the smallest free
/// suffix, skipping names already in use.
pub fn make_unique<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut seen: BTreeSet<String> = names
        .iter()
        .map(|name| name.as_ref().to_string())
        .collect();
    let mut used: BTreeSet<String> = BTreeSet::new();
    let mut next_suffix: BTreeMap<String, usize> = BTreeMap::new();
    let mut out = Vec::with_capacity(names.len());
    for name in names {
        let name = name.as_ref();
        if used.insert(name.to_string()) {
            out.push(name.to_string());
            continue;
        }
        let suffix = next_suffix.entry(name.to_string()).or_insert(1);
        let candidate = loop {
            let candidate = format!("{name}.{suffix}");
            *suffix += 1;
            if !seen.contains(&candidate) {
                break candidate;
            }
        };
        seen.insert(candidate.clone());
        used.insert(candidate.clone());
        out.push(candidate);
    }
    out
}

/// Select rows of `df` by 0-based indices; repeats are allowed.
pub fn take_rows(df: &DataFrame, indices: &[usize]) -> Result<DataFrame> {
    let idx = IdxCa::from_vec("idx".into(), to_idx(indices)?);
    Ok(df.take(&idx)?)
}

/// Convert row indices to polars' index type, rejecting any that do not fit.
fn to_idx(indices: &[usize]) -> Result<Vec<IdxSize>> {
    indices
        .iter()
        .map(|&index| {
            IdxSize::try_from(index).map_err(|_| LinkDatasetError::IndexOverflow { index })
        })
        .collect()
}

/// Concatenate equally tall frames column-wise, renaming repeated names.
pub fn bind_columns(frames: &[DataFrame]) -> Result<DataFrame> {
    let columns: Vec<&Column> = frames.iter().flat_map(DataFrame::get_columns).collect();
    let names: Vec<&str> = columns.iter().map(|column| column.name().as_str()).collect();
    let unique = make_unique(&names);
    let renamed: Vec<Column> = columns
        .into_iter()
        .zip(unique)
        .map(|(column, name)| column.clone().with_name(name.into()))
        .collect();
    Ok(DataFrame::new(renamed)?)
}
