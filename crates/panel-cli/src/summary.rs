use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use panel_model::SamplingStrategy;
use polars::prelude::DataFrame;

use crate::types::{CrossOutcome, LinkOutcome};

pub fn print_link_summary(outcome: &LinkOutcome, head: usize) {
    println!("Draws: {}", outcome.sample_size);
    println!("Sampler: {}", outcome.strategy);
    if let Some(seed) = outcome.seed {
        println!("Seed: {seed}");
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Variable"),
        header_cell("Rows"),
        header_cell("Distinct drawn"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for summary in &outcome.datasets {
        table.add_row(vec![
            Cell::new(summary.path.display()).fg(Color::Blue),
            Cell::new(&summary.variable).add_attribute(Attribute::Bold),
            Cell::new(summary.rows),
            coverage_cell(summary.distinct_drawn, summary.rows),
        ]);
    }
    println!("{table}");
    if outcome.strategy == SamplingStrategy::ParallelEigen {
        println!("Note: parallel sampler output differs from --no-fast for the same seed.");
    }
    if let Some(path) = &outcome.indices_out {
        println!("Indices: {}", path.display());
    }
    print_output(outcome.output.as_deref(), &outcome.data, head);
}

pub fn print_cross_summary(outcome: &CrossOutcome, head: usize) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Rows"),
        header_cell("Columns"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for summary in &outcome.tables {
        table.add_row(vec![
            Cell::new(summary.path.display()).fg(Color::Blue),
            Cell::new(summary.rows),
            Cell::new(summary.columns),
        ]);
    }
    table.add_row(vec![
        Cell::new("PRODUCT")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(outcome.data.height()).add_attribute(Attribute::Bold),
        Cell::new(outcome.data.width()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    print_output(outcome.output.as_deref(), &outcome.data, head);
}

fn print_output(output: Option<&std::path::Path>, data: &DataFrame, head: usize) {
    match output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("{}", data.head(Some(head))),
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

/// Distinct rows drawn, dimmed when every row was reached.
fn coverage_cell(distinct: usize, rows: usize) -> Cell {
    if distinct == rows {
        Cell::new(distinct).fg(Color::DarkGrey)
    } else {
        Cell::new(format!("{distinct} of {rows}"))
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
