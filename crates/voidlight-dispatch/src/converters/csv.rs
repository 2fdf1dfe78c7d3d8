//! CSV -> Markdown table. Specific-priority converter.

use std::io::Read;

use voidlight_protocol::{McpError, McpResult};
use voidlight_stream::{ConverterResult, StreamInfo};

use crate::registry::Converter;

pub struct CsvConverter;

impl Converter for CsvConverter {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn accepts(&self, head: &[u8], info: &StreamInfo) -> bool {
        if info.mimetype.as_deref() == Some("text/csv") {
            return true;
        }
        if info.extension.as_deref() == Some(".csv") {
            return true;
        }
        info.mimetype.is_none() && looks_like_csv(head)
    }

    fn convert(&self, stream: &mut dyn Read, _info: &StreamInfo) -> McpResult<ConverterResult> {
        let mut bytes = Vec::new();
        stream
            .read_to_end(&mut bytes)
            .map_err(|e| McpError::FileConversionError(e.to_string()))?;

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(bytes.as_slice());

        let headers = reader
            .headers()
            .map_err(|e| McpError::FileConversionError(e.to_string()))?
            .clone();

        let mut rows: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| McpError::FileConversionError(e.to_string()))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        if headers.is_empty() && rows.is_empty() {
            return Ok(ConverterResult::new(String::new()));
        }

        let header_cells: Vec<String> = headers.iter().map(str::to_string).collect();
        let column_count = header_cells.len().max(rows.iter().map(Vec::len).max().unwrap_or(0));

        let mut markdown = String::new();
        markdown.push_str(&render_row(&header_cells, column_count));
        markdown.push('\n');
        markdown.push_str(&render_separator(column_count));
        markdown.push('\n');
        for row in &rows {
            markdown.push_str(&render_row(row, column_count));
            markdown.push('\n');
        }

        Ok(ConverterResult::new(markdown.trim_end().to_string()))
    }
}

fn looks_like_csv(head: &[u8]) -> bool {
    let sample = String::from_utf8_lossy(head);
    let first_line = sample.lines().next().unwrap_or("");
    first_line.contains(',') && !first_line.trim_start().starts_with('<')
}

fn render_row(cells: &[String], column_count: usize) -> String {
    let mut padded: Vec<&str> = cells.iter().map(String::as_str).collect();
    while padded.len() < column_count {
        padded.push("");
    }
    format!("| {} |", padded.join(" | "))
}

fn render_separator(column_count: usize) -> String {
    let cells: Vec<&str> = (0..column_count).map(|_| "---").collect();
    format!("| {} |", cells.join(" | "))
}
