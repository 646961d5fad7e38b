//! Output formatting for exported rows (TSV, JSON, table).

use crate::config::OutputFormat;
use crate::records::Row;

const RULE_WIDTH: usize = 80;
const MAX_CELL_WIDTH: usize = 40;

/// Formats rows for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats rows in the configured format.
    pub fn format_rows(&self, rows: &[Row]) -> String {
        match self.format {
            OutputFormat::Tsv => Self::framed(&to_tsv(rows), rows.len()),
            OutputFormat::Json => Self::json_rows(rows),
            OutputFormat::Table => Self::table_rows(rows),
        }
    }

    // TSV framing

    /// Wraps a TSV block in rules so it is easy to select in a terminal.
    fn framed(tsv: &str, count: usize) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut lines = Vec::new();

        lines.push(rule.clone());
        lines.push("DATA FOR SPREADSHEET PASTE:".to_string());
        lines.push(rule.clone());
        lines.push(tsv.trim_end_matches('\n').to_string());
        lines.push(rule);
        lines.push(format!("Total rows: {}", count));

        lines.join("\n")
    }

    // JSON formatting

    fn json_rows(rows: &[Row]) -> String {
        serde_json::to_string_pretty(rows).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_rows(rows: &[Row]) -> String {
        let Some(first) = rows.first() else {
            return "No rows found.".to_string();
        };

        let headers: Vec<&str> = first.keys().collect();
        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|row| {
                headers
                    .iter()
                    .map(|h| truncate(&sanitize(row.get(h).unwrap_or_default()), MAX_CELL_WIDTH))
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                cells
                    .iter()
                    .map(|r| r[i].chars().count())
                    .chain(std::iter::once(h.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let render = |values: &[String]| -> String {
            values
                .iter()
                .zip(&widths)
                .map(|(v, w)| pad(v, *w))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut lines = Vec::new();
        let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        lines.push(render(&header_cells[..]));
        lines.push(widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  "));
        for row in &cells {
            lines.push(render(&row[..]));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} rows", rows.len()));

        lines.join("\n")
    }
}

/// Serializes rows as tab-separated text.
///
/// The keys of the first row are the header and define column order. Keys a
/// later row lacks become empty cells. Every line ends with `\n`; empty input
/// yields an empty string.
pub fn to_tsv(rows: &[Row]) -> String {
    let Some(first) = rows.first() else {
        return String::new();
    };

    let headers: Vec<&str> = first.keys().collect();
    let mut out = String::new();

    out.push_str(&headers.iter().map(|h| sanitize(h)).collect::<Vec<_>>().join("\t"));
    out.push('\n');

    for row in rows {
        let values: Vec<String> =
            headers.iter().map(|h| sanitize(row.get(h).unwrap_or_default())).collect();
        out.push_str(&values.join("\t"));
        out.push('\n');
    }

    out
}

/// Replaces cell-breaking characters so each row stays on one line.
pub fn sanitize(value: &str) -> String {
    value.replace(['\t', '\n', '\r'], " ")
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() > max {
        let head: String = value.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        value.to_string()
    }
}

fn pad(value: &str, width: usize) -> String {
    let len = value.chars().count();
    format!("{}{}", value, " ".repeat(width.saturating_sub(len)))
}
