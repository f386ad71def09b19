use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use consolidator_cli::pipeline::RunOutcome;
use consolidator_model::{DateRange, Summary};

pub fn print_summary(outcome: &RunOutcome) {
    let summary = &outcome.summary;
    if outcome.written {
        println!("Output: {}", outcome.output_path.display());
    } else {
        println!("Output (dry run): {}", outcome.output_path.display());
    }
    println!("Dates: {}", date_range_label(&summary.date_range));
    if let Some(decision) = summary.decision {
        println!("Columns: {decision}");
    }
    println!("{}", file_table(summary));
    if let Some(note) = skip_note(summary) {
        println!("{note}");
    }
    if !summary.skipped_rows.is_empty() {
        println!();
        println!("Skipped rows:");
        println!("{}", skipped_row_table(summary));
    }
}

fn file_table(summary: &Summary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Status"),
        header_cell("Header line"),
        header_cell("Columns"),
        header_cell("Rows"),
        header_cell("Skipped rows"),
    ]);
    apply_table_style(&mut table);
    for index in 2..6 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    for file in &summary.loaded_files {
        let skipped = summary
            .skipped_rows
            .iter()
            .filter(|row| row.path == file.path)
            .count();
        table.add_row(vec![
            Cell::new(file_name(&file.path)),
            Cell::new("loaded").fg(Color::Green),
            Cell::new(file.header_line + 1),
            Cell::new(file.columns),
            Cell::new(file.rows),
            count_cell(skipped, Color::Yellow),
        ]);
    }
    for file in &summary.skipped_files {
        table.add_row(vec![
            Cell::new(file_name(&file.path)),
            Cell::new("skipped")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            Cell::new(&file.reason).fg(Color::DarkGrey),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!(
            "{}/{} loaded",
            summary.files_succeeded(),
            summary.files_attempted
        ))
        .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(summary.total_columns).add_attribute(Attribute::Bold),
        Cell::new(summary.total_rows).add_attribute(Attribute::Bold),
        count_cell(summary.rows_skipped(), Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    table
}

fn skipped_row_table(summary: &Summary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Line"),
        header_cell("Reason"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for row in &summary.skipped_rows {
        table.add_row(vec![
            Cell::new(file_name(&row.path)),
            Cell::new(row.line),
            Cell::new(&row.reason),
        ]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
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

fn date_range_label(range: &DateRange) -> String {
    match (range.earliest(), range.latest()) {
        (Some(earliest), Some(latest)) => format!("{earliest} to {latest}"),
        _ => "unknown".to_string(),
    }
}

fn skip_note(summary: &Summary) -> Option<String> {
    summary.has_skips().then(|| {
        format!(
            "Skipped {} file(s) and {} row(s); see the log for details.",
            summary.files_skipped(),
            summary.rows_skipped()
        )
    })
}

fn file_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
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
