//! Terminal rendering of mappings and profiles.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};
use polars::prelude::{AnyValue, DataFrame};

use tabprep_model::NameMapping;

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn apply_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn any_to_cell_text(value: AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(value) => value.to_string(),
        AnyValue::StringOwned(value) => value.to_string(),
        value => value.to_string(),
    }
}

/// Print the old->new mapping as a two-column table.
pub fn print_mapping(mapping: &NameMapping) {
    let mut table = Table::new();
    apply_style(&mut table);
    table.set_header(vec![header_cell("Original"), header_cell("Cleaned")]);
    for entry in mapping {
        table.add_row(vec![
            Cell::new(&entry.original),
            Cell::new(&entry.cleaned),
        ]);
    }
    println!("{table}");
}

/// Print a profile frame, one row per profiled column. Count and
/// percentage columns are right-aligned.
pub fn print_profile(summary: &DataFrame) {
    let mut table = Table::new();
    apply_style(&mut table);

    let names: Vec<String> = summary
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    table.set_header(names.iter().map(|name| header_cell(name)).collect::<Vec<_>>());

    let numeric = [
        "nunique",
        "missing",
        "missing_pct",
        "duplicates",
        "duplicates_pct",
        "min",
        "max",
        "mean",
    ];
    for (idx, name) in names.iter().enumerate() {
        if numeric.contains(&name.as_str())
            && let Some(column) = table.column_mut(idx)
        {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    let columns = summary.get_columns();
    for row in 0..summary.height() {
        let cells: Vec<Cell> = columns
            .iter()
            .map(|column| {
                let value = column
                    .as_materialized_series()
                    .get(row)
                    .unwrap_or(AnyValue::Null);
                Cell::new(any_to_cell_text(value))
            })
            .collect();
        table.add_row(cells);
    }
    println!("{table}");
}
