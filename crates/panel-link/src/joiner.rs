//! Link DataFrames by correlated joint draws.
//!
//! One linking column is taken from each dataset, the core draws joint row
//! indices, and each dataset is subset by its indices before the results are
//! bound side by side.

use panel_common::column_link_values;
use panel_core::{DrawObserver, TracingObserver, joint_draw};
use panel_model::{
    CorrelationSpec, DrawOptions, DrawResult, LinkError, LinkingVariable, SampleSize,
};
use polars::prelude::DataFrame;
use rand::RngCore;
use tracing::{debug, info, info_span};

use crate::bind::{bind_columns, take_rows};
use crate::error::{LinkDatasetError, Result};

/// Sample size, correlation, and sampler options for one linking call.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRequest {
    pub sample_size: SampleSize,
    pub correlation: CorrelationSpec,
    pub options: DrawOptions,
}

impl LinkRequest {
    /// Independent linking of `sample_size` rows with default options.
    pub fn new(sample_size: SampleSize) -> Self {
        Self {
            sample_size,
            correlation: CorrelationSpec::default(),
            options: DrawOptions::default(),
        }
    }

    pub fn with_rho(mut self, rho: f64) -> Self {
        self.correlation = CorrelationSpec::Scalar(rho);
        self
    }

    pub fn with_correlation(mut self, correlation: CorrelationSpec) -> Self {
        self.correlation = correlation;
        self
    }

    pub fn with_options(mut self, options: DrawOptions) -> Self {
        self.options = options;
        self
    }
}

/// Joined rows plus the draw that produced them.
#[derive(Debug, Clone)]
pub struct LinkedFrame {
    pub data: DataFrame,
    pub draw: DrawResult,
}

impl LinkedFrame {
    pub fn record_count(&self) -> usize {
        self.data.height()
    }
}

/// Check counts and read the named linking column from each dataset.
///
/// # Errors
///
/// - `InputCount` for fewer than two datasets
/// - `VariableMismatch` when dataset and variable counts differ
/// - `MissingColumn` when a dataset lacks its linking column
pub fn extract_linking_variables<S: AsRef<str>>(
    datasets: &[DataFrame],
    variables: &[S],
) -> Result<Vec<LinkingVariable>> {
    if datasets.len() < 2 {
        return Err(LinkError::InputCount {
            found: datasets.len(),
        }
        .into());
    }
    if datasets.len() != variables.len() {
        return Err(LinkError::VariableMismatch {
            datasets: datasets.len(),
            variables: variables.len(),
        }
        .into());
    }
    datasets
        .iter()
        .zip(variables)
        .enumerate()
        .map(|(idx, (df, name))| {
            let name = name.as_ref();
            let column = df
                .column(name)
                .map_err(|_| LinkDatasetError::missing_column(idx, name))?;
            Ok(LinkingVariable {
                name: name.to_string(),
                values: column_link_values(column)?,
            })
        })
        .collect()
}

/// Subset each dataset by its index column and bind the results.
///
/// `draw.columns` must line up with `datasets` by position.
pub fn bind_draws(datasets: &[DataFrame], draw: &DrawResult) -> Result<DataFrame> {
    let subsets = datasets
        .iter()
        .zip(&draw.columns)
        .map(|(df, column)| take_rows(df, &column.indices))
        .collect::<Result<Vec<_>>>()?;
    bind_columns(&subsets)
}

/// Link datasets so their linking variables follow the requested correlation.
///
/// Returns `sample_size` rows: each dataset contributes its resampled rows
/// (repeats allowed), bound column-wise with repeated names made unique.
pub fn link_datasets<S, R>(
    datasets: &[DataFrame],
    variables: &[S],
    request: &LinkRequest,
    observer: &dyn DrawObserver,
    rng: &mut R,
) -> Result<LinkedFrame>
where
    S: AsRef<str>,
    R: RngCore,
{
    let span = info_span!(
        "link_datasets",
        datasets = datasets.len(),
        n = request.sample_size.get()
    );
    let _guard = span.enter();

    let linking = extract_linking_variables(datasets, variables)?;
    for (idx, variable) in linking.iter().enumerate() {
        debug!(
            dataset = idx,
            variable = %variable.name,
            rows = variable.len(),
            "linking variable"
        );
    }
    let draw = joint_draw(
        &linking,
        request.sample_size,
        &request.correlation,
        &request.options,
        observer,
        rng,
    )?;
    let data = bind_draws(datasets, &draw)?;
    info!(
        rows = data.height(),
        columns = data.width(),
        strategy = %draw.strategy,
        "datasets linked"
    );
    Ok(LinkedFrame { data, draw })
}

/// [`link_datasets`] with the tracing observer and the thread-local generator.
pub fn link_datasets_default<S: AsRef<str>>(
    datasets: &[DataFrame],
    variables: &[S],
    request: &LinkRequest,
) -> Result<LinkedFrame> {
    link_datasets(
        datasets,
        variables,
        request,
        &TracingObserver,
        &mut rand::rng(),
    )
}
