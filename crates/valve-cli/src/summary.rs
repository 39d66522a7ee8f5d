use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use valve_cli::pipeline::ReportRun;
use valve_model::{CellValue, Section, Status};

pub fn print_summary(run: &ReportRun) {
    println!("Input: {}", run.source.display());
    if run.outputs.is_empty() {
        println!("Output: - (dry run)");
    } else {
        println!("Output: {}", run.output_dir.display());
        for path in &run.outputs {
            println!("  {}", path.display());
        }
    }
    println!("{}", run.report.generated_label);
    println!("Fingerprint: {}", run.fingerprint);
    if !run.missing_columns.is_empty() {
        eprintln!("Missing columns: {}", run.missing_columns.join(", "));
    }
    print_normalize_table(run);
    for section in &run.report.sections {
        println!();
        println!("{}", section.title);
        println!("{}", section_table(section));
    }
}

fn print_normalize_table(run: &ReportRun) {
    let summary = run.normalize;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Zeilen"),
        header_cell("Verworfen"),
        header_cell("Datensätze"),
        header_cell("Ungültige Zellen"),
        header_cell("Ohne Kategorie"),
        header_cell("Monate"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(summary.rows_seen),
        count_cell(summary.dropped, Color::Yellow),
        Cell::new(summary.records()).add_attribute(Attribute::Bold),
        count_cell(summary.coerced_cells, Color::Yellow),
        count_cell(summary.unclassified, Color::Yellow),
        Cell::new(run.report.months_elapsed),
    ]);
    println!("{table}");
}

fn section_table(section: &Section) -> Table {
    let mut table = Table::new();
    table.set_header(
        section
            .columns
            .iter()
            .map(|column| header_cell(column))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for index in 1..section.columns.len() {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for row in &section.rows {
        table.add_row(row.cells.iter().map(report_cell).collect::<Vec<_>>());
    }
    table
}

fn report_cell(cell: &valve_model::Cell) -> Cell {
    if cell.value == CellValue::Empty {
        return dim_cell("-");
    }
    let text = cell.value.to_string();
    match cell.status {
        Status::Neutral => Cell::new(text),
        Status::OnTarget => Cell::new(text).fg(Color::Green),
        Status::Warn => Cell::new(text).fg(Color::Yellow),
        Status::BelowTarget => Cell::new(text)
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
