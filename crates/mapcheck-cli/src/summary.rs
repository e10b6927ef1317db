//! Tabular rendering of mapping reports.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use mapcheck_model::EntityMappingResult;

pub fn print_report(result: &EntityMappingResult) {
    if let Some(message) = &result.error_message {
        eprintln!("document error: {message}");
        return;
    }
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Type"),
        header_cell("Source"),
        header_cell("Kind"),
        header_cell("Value"),
        header_cell("Status"),
        header_cell("Reason"),
    ]);
    if let Some(column) = table.column_mut(5) {
        column.set_cell_alignment(CellAlignment::Center);
    }
    for field in &result.fields {
        table.add_row(vec![
            Cell::new(&field.property_name),
            Cell::new(&field.property_type),
            Cell::new(field.matched_source_name.as_deref().unwrap_or("-")),
            Cell::new(
                field
                    .source_kind
                    .map_or("-", mapcheck_model::ValueKind::label),
            ),
            Cell::new(field.source_preview.as_deref().unwrap_or("-")),
            status_cell(field.success),
            Cell::new(field.reason.as_deref().unwrap_or("")),
        ]);
    }
    println!("{table}");
    let verdict = if result.success { "OK" } else { "FAILED" };
    println!(
        "{verdict}: {}/{} fields matched",
        result.success_count, result.total_fields
    );
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn status_cell(success: bool) -> Cell {
    if success {
        Cell::new("ok").fg(Color::Green)
    } else {
        Cell::new("fail").fg(Color::Red).add_attribute(Attribute::Bold)
    }
}
