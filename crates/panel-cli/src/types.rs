use std::path::PathBuf;

use panel_model::{SampleSize, SamplingStrategy};
use polars::prelude::DataFrame;

#[derive(Debug)]
pub struct DatasetSummary {
    pub path: PathBuf,
    pub variable: String,
    pub rows: usize,
    pub distinct_drawn: usize,
}

#[derive(Debug)]
pub struct LinkOutcome {
    pub datasets: Vec<DatasetSummary>,
    pub sample_size: SampleSize,
    pub strategy: SamplingStrategy,
    pub seed: Option<u64>,
    pub output: Option<PathBuf>,
    pub indices_out: Option<PathBuf>,
    pub data: DataFrame,
}

#[derive(Debug)]
pub struct TableSummary {
    pub path: PathBuf,
    pub rows: usize,
    pub columns: usize,
}

#[derive(Debug)]
pub struct CrossOutcome {
    pub tables: Vec<TableSummary>,
    pub output: Option<PathBuf>,
    pub data: DataFrame,
}
