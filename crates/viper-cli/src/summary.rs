use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{
    Attribute, Cell, CellAlignment, ColumnConstraint, ContentArrangement, Table, Width,
};

use viper_core::RunOutcome;

pub fn print_summary(outcome: &RunOutcome) {
    println!("Artifact: {}", outcome.artifact_path.display());

    let mut table = Table::new();
    table.set_header(vec![header_cell("Clients"), header_cell("Warnings")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new(outcome.total_clients).add_attribute(Attribute::Bold),
        warning_count_cell(outcome.warnings.len()),
    ]);
    println!("{table}");

    print_warning_table(&outcome.warnings);
}

fn print_warning_table(warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Warning")]);
    apply_warning_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, warning) in warnings.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1).fg(comfy_table::Color::DarkGrey),
            Cell::new(warning).fg(comfy_table::Color::Yellow),
        ]);
    }
    println!();
    println!("Warnings:");
    println!("{table}");
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(60);
}

fn apply_warning_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
    if table.column_count() >= 2 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(5)),
            ColumnConstraint::UpperBoundary(Width::Percentage(90)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn warning_count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
            .fg(comfy_table::Color::Yellow)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).fg(comfy_table::Color::DarkGrey)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(comfy_table::Color::Cyan)
        .add_attribute(Attribute::Bold)
}
