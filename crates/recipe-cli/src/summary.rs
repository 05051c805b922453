use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use recipe_cli::types::{ExtractResult, LoadResult, SeedResult, ValidateResult};

/// Leading hex digits of a fingerprint shown in the console.
const FINGERPRINT_PREFIX: usize = 12;

pub fn print_seed_summary(result: &SeedResult) {
    println!("Source: {}", result.source_dir.display());
    let mut table = Table::new();
    table.set_header(vec![header_cell("Collection"), header_cell("Documents")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("users"), Cell::new(result.users)]);
    table.add_row(vec![Cell::new("recipes"), Cell::new(result.recipes)]);
    table.add_row(vec![Cell::new("interactions"), Cell::new(result.interactions)]);
    println!("{table}");
}

pub fn print_extract_summary(result: &ExtractResult) {
    println!("Bucket: {}", result.bucket);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("File"),
        header_cell("Rows"),
        header_cell("SHA-256"),
        header_cell("Changed"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    let mut total_rows = 0usize;
    for entry in &result.manifest.tables {
        total_rows += entry.rows;
        let changed = result
            .changed
            .as_ref()
            .map(|changed| changed.contains(&entry.table));
        table.add_row(vec![
            table_cell(entry.table.table_name()),
            Cell::new(&entry.file),
            Cell::new(entry.rows),
            dim_cell(fingerprint(&entry.sha256)),
            changed_cell(changed),
        ]);
    }
    table.add_row(vec![
        total_cell("TOTAL"),
        total_cell("All tables"),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");
}

pub fn print_load_summary(result: &LoadResult) {
    println!(
        "Dataset: {}.{}",
        result.dataset.project, result.dataset.dataset
    );
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table ID"),
        header_cell("Rows"),
        header_cell("Schema"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for loaded in &result.loaded {
        let schema = loaded
            .columns
            .iter()
            .map(|column| format!("{}:{}", column.name, column.data_type))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            table_cell(&loaded.table_id),
            Cell::new(loaded.rows),
            Cell::new(schema),
        ]);
    }
    println!("{table}");
    if !result.skipped.is_empty() {
        println!("Skipped: {}", result.skipped.join(", "));
    }
}

pub fn print_validation_summary(result: &ValidateResult) {
    println!("Input: {}", result.input.display());
    println!("Report: {}", result.report_path.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Records"),
        header_cell("Pass"),
        header_cell("Fail"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    let mut total_records = 0usize;
    let mut total_failures = 0usize;
    for summary in result.report.table_summaries() {
        total_records += summary.records;
        total_failures += summary.failures;
        table.add_row(vec![
            table_cell(summary.table.report_label()),
            Cell::new(summary.records),
            count_cell(summary.passes(), Color::Green),
            count_cell(summary.failures, Color::Red),
        ]);
    }
    table.add_row(vec![
        total_cell("TOTAL"),
        Cell::new(total_records).add_attribute(Attribute::Bold),
        count_cell(total_records - total_failures, Color::Green).add_attribute(Attribute::Bold),
        count_cell(total_failures, Color::Red).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    if total_failures == 0 {
        println!("SUCCESS: Data Quality is 100% Clean!");
    } else {
        println!("WARNING: Found {total_failures} total issues.");
        println!("Check '{}' for details.", result.report_path.display());
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn fingerprint(sha256: &str) -> &str {
    sha256.get(..FINGERPRINT_PREFIX).unwrap_or(sha256)
}

fn changed_cell(changed: Option<bool>) -> Cell {
    match changed {
        Some(true) => Cell::new("✓")
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold),
        Some(false) => dim_cell("-"),
        None => dim_cell("new"),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn table_cell(name: &str) -> Cell {
    Cell::new(name)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn total_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
