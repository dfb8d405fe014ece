//! JSON exporter

use serde::Serialize;

use crate::export::{ExportError, ExportResult};

/// Exporter for structural JSON output.
pub struct JsonExporter;

impl JsonExporter {
    /// Serialize a view into JSON text.
    ///
    /// Works over any `Serialize` value; object views keep their key order
    /// end-to-end.
    ///
    /// # Example
    ///
    /// ```rust
    /// use data_record_sdk::JsonExporter;
    /// use serde_json::json;
    ///
    /// let result = JsonExporter::export(&json!({"name": "Ann", "age": 30})).unwrap();
    /// assert_eq!(result.content, r#"{"name":"Ann","age":30}"#);
    /// assert_eq!(result.format, "json");
    /// ```
    pub fn export<T: Serialize>(data: &T) -> Result<ExportResult, ExportError> {
        let content = serde_json::to_string(data)
            .map_err(|err| ExportError::SerializationError(err.to_string()))?;
        Ok(ExportResult {
            content,
            format: "json".to_string(),
        })
    }
}
