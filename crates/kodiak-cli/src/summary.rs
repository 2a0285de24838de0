use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use kodiak_project::{ArchiveReport, InitReport};
use serde::Serialize;

use crate::cli::ReportFormatArg;

pub fn print_init_summary(report: &InitReport, format: ReportFormatArg) -> anyhow::Result<()> {
    if format == ReportFormatArg::Json {
        return print_json(report);
    }

    println!("Project: {}", report.root.display());
    println!("Archive: {}", report.archive);
    println!("Duplicates: {}", report.duplicates);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Student"),
        header_cell("Imported"),
        header_cell("Renamed"),
        header_cell("Skipped"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut renamed = 0;
    for (student, counts) in &report.students {
        renamed += counts.renamed;
        table.add_row(vec![
            Cell::new(student),
            Cell::new(counts.imported),
            count_cell(counts.renamed, Color::Yellow),
            count_cell(counts.skipped, Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.imported).add_attribute(Attribute::Bold),
        count_cell(renamed, Color::Yellow).add_attribute(Attribute::Bold),
        count_cell(report.skipped, Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    Ok(())
}

pub fn print_archive_summary(
    report: &ArchiveReport,
    format: ReportFormatArg,
) -> anyhow::Result<()> {
    if format == ReportFormatArg::Json {
        return print_json(report);
    }

    println!("Project: {}", report.root.display());
    let mut table = Table::new();
    table.set_header(vec![header_cell("Submissions"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Original"), Cell::new(report.originals)]);
    table.add_row(vec![Cell::new("Replaced"), Cell::new(report.replaced)]);
    table.add_row(vec![Cell::new("Re-archived"), Cell::new(report.repacked)]);
    table.add_row(vec![
        Cell::new("Missing"),
        count_cell(report.missing.len(), Color::Red),
    ]);
    println!("{table}");

    for target in &report.missing {
        eprintln!("missing: {target}");
    }
    if !report.archive_verified {
        eprintln!("warning: the original archive changed since the project was created");
    }
    println!("Upload: {}", report.output.display());
    Ok(())
}

fn print_json<T: Serialize>(report: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
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

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).fg(Color::DarkGrey)
    }
}
