//! Row layout for templates, parameters and credentials in text, table and json form.

use crate::capi::{Credential, Template, TemplateParameter};
use crate::error::ApiError;
use comfy_table::Table;
use serde::Serialize;
use std::io::Write;
use std::str::FromStr;

/// How list results are written to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One tab-separated line per record, header first.
    #[default]
    Text,
    /// Aligned table with borders.
    Table,
    /// Pretty-printed JSON array.
    Json,
}

impl FromStr for OutputFormat {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(ApiError::InvalidArgument(format!(
                "Invalid output format: {} (must be 'text', 'table', or 'json')",
                other
            ))),
        }
    }
}

/// A record with a fixed column layout. Every row yields exactly `HEADER.len()` cells.
pub trait Row: Serialize {
    const HEADER: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

impl Row for Template {
    const HEADER: &'static [&'static str] = &["NAME", "PROVIDER", "DESCRIPTION"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.provider.clone(),
            self.description.clone(),
        ]
    }
}

impl Row for TemplateParameter {
    const HEADER: &'static [&'static str] = &["NAME", "REQUIRED", "DESCRIPTION", "OPTIONS"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.required.to_string(),
            self.description.clone(),
            self.options
                .as_ref()
                .map(|options| options.join(", "))
                .unwrap_or_default(),
        ]
    }
}

impl Row for Credential {
    const HEADER: &'static [&'static str] = &["NAME", "INFRASTRUCTURE PROVIDER"];

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), self.provider.clone()]
    }
}

/// Write `rows` in `format`, or `empty_message` on its own line when there are none.
///
/// JSON output always writes an array, so an empty result is `[]`.
pub fn write_rows<T: Row>(
    w: &mut dyn Write,
    rows: &[T],
    format: OutputFormat,
    empty_message: &str,
) -> Result<(), ApiError> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *w, rows).map_err(std::io::Error::from)?;
            writeln!(w)?;
        }
        _ if rows.is_empty() => {
            writeln!(w, "{}", empty_message)?;
        }
        OutputFormat::Text => {
            writeln!(w, "{}", T::HEADER.join("\t"))?;
            for row in rows {
                let cells: Vec<String> = row.cells().iter().map(|c| text_cell(c)).collect();
                writeln!(w, "{}", cells.join("\t"))?;
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.set_header(T::HEADER.to_vec());
            for row in rows {
                table.add_row(row.cells());
            }
            writeln!(w, "{}", table)?;
        }
    }
    Ok(())
}

/// Fold column and line separators into spaces so a record stays on one line.
fn text_cell(cell: &str) -> String {
    cell.replace(['\t', '\r', '\n'], " ")
}
