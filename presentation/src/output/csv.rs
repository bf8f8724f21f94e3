//! CSV export of the flat agenda rows

use agenda_domain::{EventBrief, ExportRow};

/// Writes [`ExportRow`]s as CSV.
///
/// Every field is quoted and embedded quotes are doubled; lines are joined
/// with `\n` and there is no trailing newline.
pub struct CsvWriter;

impl CsvWriter {
    pub fn write(rows: &[ExportRow]) -> String {
        let mut lines = Vec::with_capacity(rows.len() + 1);
        lines.push(ExportRow::HEADERS.join(","));
        for row in rows {
            let fields: Vec<String> = row.fields().iter().map(|f| Self::quote(f)).collect();
            lines.push(fields.join(","));
        }
        lines.join("\n")
    }

    fn quote(field: &str) -> String {
        format!("\"{}\"", field.replace('"', "\"\""))
    }
}

/// `<event name>-agenda.csv`, or `event-agenda.csv` without a brief.
///
/// Path separators in the event name become `-`, so the file always lands
/// in the working directory.
pub fn default_filename(brief: Option<&EventBrief>) -> String {
    let event = brief.map(EventBrief::event_name).unwrap_or("event");
    format!("{}-agenda.csv", event.replace(['/', '\\'], "-"))
}
