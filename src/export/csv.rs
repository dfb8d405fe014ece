//! CSV exporter
//!
//! Writes RFC-4180-style CSV: comma delimiter, double-quote quoting with
//! internal quotes doubled, `\n` record terminator. The header line is
//! written first, then one line per row.

use serde_json::Value;

use crate::export::{ExportError, ExportResult};

/// Exporter for tabular CSV output.
pub struct CsvExporter;

impl CsvExporter {
    /// Render a header and rows into CSV text.
    ///
    /// Scalar cells render bare (strings unquoted unless they contain the
    /// delimiter, a quote or a line break), null cells render empty, and
    /// composite cells render as compact JSON.
    ///
    /// # Errors
    ///
    /// Fails with [`ExportError::RowInsertion`] when a row's arity differs
    /// from the header's. No partial output is returned.
    ///
    /// # Example
    ///
    /// ```rust
    /// use data_record_sdk::CsvExporter;
    /// use serde_json::json;
    ///
    /// let header = vec!["a".to_string(), "b".to_string()];
    /// let rows = vec![vec![json!(1), json!(2)]];
    /// let result = CsvExporter::export(&header, &rows).unwrap();
    /// assert_eq!(result.content, "a,b\n1,2\n");
    /// ```
    pub fn export(header: &[String], rows: &[Vec<Value>]) -> Result<ExportResult, ExportError> {
        let mut content = String::new();
        content.push_str(&format_line(header));
        for (index, row) in rows.iter().enumerate() {
            if row.len() != header.len() {
                return Err(ExportError::RowInsertion(format!(
                    "row {} has {} fields, header has {}",
                    index,
                    row.len(),
                    header.len()
                )));
            }
            let fields = row
                .iter()
                .map(render_field)
                .collect::<Result<Vec<String>, ExportError>>()?;
            content.push_str(&format_line(&fields));
        }
        Ok(ExportResult {
            content,
            format: "csv".to_string(),
        })
    }
}

fn render_field(value: &Value) -> Result<String, ExportError> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s.clone()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        composite => serde_json::to_string(composite)
            .map_err(|err| ExportError::SerializationError(err.to_string())),
    }
}

fn format_line(fields: &[String]) -> String {
    let quoted: Vec<String> = fields.iter().map(|field| quote_field(field)).collect();
    let mut line = quoted.join(",");
    line.push('\n');
    line
}

fn quote_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
