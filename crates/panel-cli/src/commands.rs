use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, info_span};

use panel_cli::inputs::{correlation_from_args, read_csv, write_csv};
use panel_core::TracingObserver;
use panel_link::{LinkRequest, LinkedFrame, cross_join, link_datasets};
use panel_model::{DrawOptions, DrawResult};

use crate::cli::{CrossArgs, LinkArgs};
use crate::types::{CrossOutcome, DatasetSummary, LinkOutcome, TableSummary};

pub fn run_link(args: &LinkArgs) -> Result<LinkOutcome> {
    let span = info_span!("link", datasets = args.data.len(), n = args.sample_size.get());
    let _guard = span.enter();
    let start = Instant::now();

    let datasets = args
        .data
        .iter()
        .map(|arg| read_csv(&arg.path))
        .collect::<Result<Vec<DataFrame>>>()?;
    let variables: Vec<&str> = args.data.iter().map(|arg| arg.column.as_str()).collect();

    let correlation = correlation_from_args(args.rho, args.sigma.as_deref())?;
    let options = DrawOptions::default()
        .with_fast_backend(!args.no_fast)
        .with_cores(args.cores);
    let request = LinkRequest::new(args.sample_size)
        .with_correlation(correlation)
        .with_options(options);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let LinkedFrame { mut data, draw } =
        link_datasets(&datasets, &variables, &request, &TracingObserver, &mut rng)
            .context("link datasets")?;

    if let Some(path) = &args.output {
        write_csv(&mut data, path)?;
        info!(path = %path.display(), rows = data.height(), "joined rows written");
    }
    if let Some(path) = &args.indices_out {
        write_indices(&draw, path)?;
        info!(path = %path.display(), "drawn indices written");
    }

    let summaries = args
        .data
        .iter()
        .zip(&datasets)
        .zip(&draw.columns)
        .map(|((arg, df), column)| DatasetSummary {
            path: arg.path.clone(),
            variable: arg.column.clone(),
            rows: df.height(),
            distinct_drawn: column.indices.iter().collect::<BTreeSet<_>>().len(),
        })
        .collect();

    info!(
        strategy = %draw.strategy,
        duration_ms = start.elapsed().as_millis(),
        "link complete"
    );
    Ok(LinkOutcome {
        datasets: summaries,
        sample_size: draw.sample_size,
        strategy: draw.strategy,
        seed: args.seed,
        output: args.output.clone(),
        indices_out: args.indices_out.clone(),
        data,
    })
}

pub fn run_cross(args: &CrossArgs) -> Result<CrossOutcome> {
    let span = info_span!("cross", tables = args.inputs.len());
    let _guard = span.enter();

    let tables = args
        .inputs
        .iter()
        .map(|path| read_csv(path))
        .collect::<Result<Vec<DataFrame>>>()?;
    let mut data = cross_join(&tables).context("cross join")?;
    if let Some(path) = &args.output {
        write_csv(&mut data, path)?;
        info!(path = %path.display(), rows = data.height(), "cross join written");
    }

    let summaries = args
        .inputs
        .iter()
        .zip(&tables)
        .map(|(path, df)| TableSummary {
            path: path.clone(),
            rows: df.height(),
            columns: df.width(),
        })
        .collect();
    Ok(CrossOutcome {
        tables: summaries,
        output: args.output.clone(),
        data,
    })
}

fn write_indices(draw: &DrawResult, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), draw)
        .with_context(|| format!("write indices: {}", path.display()))?;
    Ok(())
}
