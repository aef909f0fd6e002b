//! Plain stdout rendering for the `--dump` command. Uses the same
//! column descriptors as the interactive table, so the output matches
//! what the TUI shows.

use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use crossterm::style::Stylize;

use crate::table::ColumnSpec;

pub fn display_records<T>(records: &[T], columns: &[ColumnSpec<T>]) {
    if records.is_empty() {
        println!("{}", "No records found.".yellow());
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        columns
            .iter()
            .map(|column| Cell::new(&column.label).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    for record in records {
        table.add_row(columns.iter().map(|column| column.rendered(record)));
    }

    println!("{table}");
    println!("\n{}", format!("{} rows", records.len()).green());
}
