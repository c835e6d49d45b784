use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use pudo_cli::pipeline::{JoinRunResult, TableCounts};

pub fn print_summary(result: &JoinRunResult) {
    match &result.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run, nothing written)"),
    }
    println!("Threshold: {} km", result.threshold_km);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Rows"),
        header_cell("Kept"),
        header_cell("Missing id"),
        header_cell("Bad coordinates"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(table_row("Vendors", &result.vendors));
    table.add_row(table_row("PUDOs", &result.pudos));
    println!("{table}");

    let mut join_table = Table::new();
    join_table.set_header(vec![
        header_cell("Processed"),
        header_cell("Matched"),
        header_cell("Beyond threshold"),
    ]);
    apply_summary_table_style(&mut join_table);
    for index in 0..=2 {
        align_column(&mut join_table, index, CellAlignment::Right);
    }
    join_table.add_row(vec![
        Cell::new(result.stats.processed),
        Cell::new(result.stats.matched)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        count_cell(result.stats.discarded, Color::Yellow),
    ]);
    println!("{join_table}");
}

fn table_row(label: &str, counts: &TableCounts) -> Vec<Cell> {
    vec![
        Cell::new(label)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        Cell::new(counts.rows_read),
        Cell::new(counts.kept),
        count_cell(counts.dropped.missing_id, Color::Yellow),
        count_cell(counts.dropped.invalid_coordinate, Color::Yellow),
    ]
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
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
