use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use eyre::Context;
use serde::Serialize;

pub fn table(titles: &[&str], rows: impl IntoIterator<Item = Vec<String>>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(titles.iter().map(|title| Cell::new(title).fg(Color::Cyan)));
    for row in rows {
        table.add_row(row);
    }
    table
}

pub fn print_table(titles: &[&str], rows: impl IntoIterator<Item = Vec<String>>) {
    println!("{}", table(titles, rows));
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> eyre::Result<()> {
    let json = serde_json::to_string_pretty(value).wrap_err("failed to encode output")?;
    println!("{json}");
    Ok(())
}
