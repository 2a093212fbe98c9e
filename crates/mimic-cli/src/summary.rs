use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use mimic_cli::types::{DatasetOutcome, RunResult};

pub fn print_summary(result: &RunResult) {
    println!("Input: {}", result.input_dir.display());
    println!("Output: {}", result.output_dir.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Dropped"),
        header_cell("Filled"),
        header_cell("Nulls kept"),
        header_cell("Output"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut total_rows = 0usize;
    for outcome in &result.datasets {
        table.add_row(outcome_row(outcome));
        if let Some(summary) = &outcome.summary {
            total_rows += summary.rows;
        }
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(format!(
            "{}/{} succeeded",
            result.succeeded(),
            result.datasets.len()
        ))
        .add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    let failures: Vec<&DatasetOutcome> = result
        .datasets
        .iter()
        .filter(|d| d.error.is_some())
        .collect();
    if !failures.is_empty() {
        eprintln!("Errors:");
        for outcome in failures {
            if let Some(error) = &outcome.error {
                eprintln!("- {}: {error}", outcome.dataset);
            }
        }
    }
}

fn outcome_row(outcome: &DatasetOutcome) -> Vec<Cell> {
    let name = Cell::new(&outcome.dataset)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold);
    match &outcome.summary {
        Some(summary) => vec![
            name,
            Cell::new(summary.rows),
            Cell::new(summary.columns),
            Cell::new(summary.dropped),
            Cell::new(summary.nulls_before.saturating_sub(summary.nulls_after)),
            Cell::new(summary.nulls_after),
            Cell::new(summary.output.display()).fg(Color::Green),
        ],
        None => vec![
            name,
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            Cell::new("failed").fg(Color::Red),
        ],
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
