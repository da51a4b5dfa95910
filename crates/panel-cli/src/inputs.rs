//! Parsing of dataset and correlation arguments, and CSV input/output.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use panel_common::parse_f64;
use panel_model::CorrelationSpec;
use polars::prelude::{CsvReadOptions, CsvWriter, DataFrame, SerReader, SerWriter};

/// A CSV path paired with the name of its linking column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetArg {
    pub path: PathBuf,
    pub column: String,
}

/// Parse `<CSV>:<COLUMN>`, splitting at the last colon.
pub fn parse_dataset_arg(raw: &str) -> std::result::Result<DatasetArg, String> {
    let Some((path, column)) = raw.rsplit_once(':') else {
        return Err(format!("expected <CSV>:<COLUMN>, got '{raw}'"));
    };
    if path.is_empty() || column.is_empty() {
        return Err(format!("expected <CSV>:<COLUMN>, got '{raw}'"));
    }
    Ok(DatasetArg {
        path: PathBuf::from(path),
        column: column.to_string(),
    })
}

/// Parse a matrix written as `1,0.5;0.5,1`.
///
/// Rows of different lengths are a `DimensionMismatch`; whether the matrix
/// fits the number of datasets is checked when the draw is validated.
pub fn parse_sigma(raw: &str) -> Result<CorrelationSpec> {
    let mut rows = Vec::new();
    for (row_idx, row) in raw.split(';').enumerate() {
        let row = row.trim();
        if row.is_empty() {
            bail!("correlation matrix row {} is empty", row_idx + 1);
        }
        let values = row
            .split(',')
            .map(|entry| {
                let entry = entry.trim();
                parse_f64(entry).with_context(|| {
                    format!("invalid correlation '{entry}' in row {}", row_idx + 1)
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(values);
    }
    Ok(CorrelationSpec::from_rows(&rows)?)
}

/// Resolve `--sigma` over `--rho`, defaulting to independence.
pub fn correlation_from_args(rho: Option<f64>, sigma: Option<&str>) -> Result<CorrelationSpec> {
    match (sigma, rho) {
        (Some(raw), _) => parse_sigma(raw),
        (None, Some(rho)) => Ok(CorrelationSpec::Scalar(rho)),
        (None, None) => Ok(CorrelationSpec::default()),
    }
}

/// Read a CSV file with a header row.
pub fn read_csv(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to create CSV reader: {}", path.display()))?
        .finish()
        .with_context(|| format!("Failed to read CSV: {}", path.display()))?;
    Ok(df)
}

/// Write a DataFrame as CSV with a header row.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("create output: {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("write CSV: {}", path.display()))?;
    Ok(())
}
