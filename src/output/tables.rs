//! Table rendering using comfy-table

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, ContentArrangement, Table};

/// Format a table with a bold header row
pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(h).add_attribute(Attribute::Bold).fg(Color::Cyan))
        .collect();
    table.set_header(header_cells);

    for row in rows {
        let cells: Vec<Cell> = row
            .iter()
            .map(|cell_text| {
                let mut cell = Cell::new(cell_text);
                if cell_text.contains("✓") {
                    cell = cell.fg(Color::Green);
                } else if cell_text.contains("✗") {
                    cell = cell.fg(Color::Red);
                }
                cell
            })
            .collect();
        table.add_row(cells);
    }

    table.to_string()
}

/// Print an indented table
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    for line in format_table(headers, rows).lines() {
        println!("    {}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_table_contains_cells() {
        let out = format_table(
            &["Domain", "Threshold"],
            &[vec!["example.com".to_string(), "5 days".to_string()]],
        );
        assert!(out.contains("Domain"));
        assert!(out.contains("example.com"));
        assert!(out.contains("5 days"));
    }
}
