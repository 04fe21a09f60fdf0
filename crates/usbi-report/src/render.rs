//! Table and JSON rendering

use serde::Serialize;
use tracing::debug;

use crate::error::ReportError;
use crate::record::{Describe, DisplayRecord};

/// Gap between table columns
const COLUMN_GAP: &str = "  ";

/// Which columns a table shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// The descriptor's compact column set
    #[default]
    Summary,
    /// Every display field
    Full,
}

/// Render items as a plain text table
///
/// The header row holds the record keys and is followed by a dash rule.
/// Headers are emitted even when `items` is empty.
pub fn render_table<D: Describe>(items: &[D], view: View) -> String {
    let fields = match view {
        View::Summary => D::summary_fields(),
        View::Full => D::fields(),
    };
    let rows: Vec<DisplayRecord> = items
        .iter()
        .map(|item| item.display_record().select(fields))
        .collect();

    let widths: Vec<usize> = fields
        .iter()
        .enumerate()
        .map(|(col, header)| {
            rows.iter()
                .filter_map(|row| row.values().nth(col))
                .map(|v| v.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_row(fields.iter().copied(), &widths));
    lines.push(format_row(widths.iter().map(|w| "-".repeat(*w)), &widths));
    for row in &rows {
        lines.push(format_row(row.values(), &widths));
    }

    debug!("Rendered table with {} row(s)", rows.len());
    lines.join("\n")
}

fn format_row<S: AsRef<str>>(cells: impl Iterator<Item = S>, widths: &[usize]) -> String {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = *width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    line.trim_end().to_string()
}

/// Render items as a JSON array with 4-space indentation
pub fn render_json<D: Describe>(items: &[D]) -> Result<String, ReportError> {
    let records: Vec<DisplayRecord> = items.iter().map(D::display_record).collect();
    to_pretty_json(&records)
}

/// Render a single item as a JSON object with 4-space indentation
pub fn render_json_one<D: Describe>(item: &D) -> Result<String, ReportError> {
    to_pretty_json(&item.display_record())
}

fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ReportError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}
