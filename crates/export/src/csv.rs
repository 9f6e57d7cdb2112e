//! CSV blob builder for the currently visible table.

use chrono::Utc;

/// A built CSV export: the text blob and the suggested filename
/// (`<Entity>_<ISO-date>.csv`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

/// Build a CSV from the visible column set and row data.
///
/// Every field is quoted; embedded quotes are doubled. Row width follows
/// the header; short rows are padded with empty fields, long rows are
/// truncated.
pub fn csv_export(entity: &str, columns: &[&str], rows: &[Vec<String>]) -> CsvExport {
    let mut content = String::new();
    push_row(&mut content, columns.iter().map(|c| c.to_string()));
    for row in rows {
        let mut cells = row.clone();
        cells.resize(columns.len(), String::new());
        push_row(&mut content, cells.into_iter());
    }

    let entity_name = title_case(entity);
    let filename = format!("{}_{}.csv", entity_name, Utc::now().format("%Y-%m-%d"));
    CsvExport { filename, content }
}

fn push_row(out: &mut String, cells: impl Iterator<Item = String>) {
    let quoted: Vec<String> = cells
        .map(|cell| format!("\"{}\"", cell.replace('"', "\"\"")))
        .collect();
    out.push_str(&quoted.join(","));
    out.push('\n');
}

/// `work-shift` → `WorkShift`.
fn title_case(entity: &str) -> String {
    entity
        .split(['-', '_'])
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}
