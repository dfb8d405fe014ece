//! Export engine
//!
//! Stateless exporters rendering a record's export view into text:
//! - JSON (structural serialization)
//! - XML (pretty-printed, optional declaration)
//! - CSV (RFC-4180 style)
//!
//! Export is all-or-nothing: on error no partial output is returned.

pub mod csv;
pub mod json;
pub mod xml;

/// Result of an export operation
#[derive(Debug)]
pub struct ExportResult {
    /// Exported content
    pub content: String,
    /// Format identifier
    pub format: String,
}

/// Error during export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Malformed structure: {0} is not a valid XML element name")]
    InvalidElementName(String),
    #[error("Row insertion error: {0}")]
    RowInsertion(String),
}

// Re-export for convenience
pub use csv::CsvExporter;
pub use json::JsonExporter;
pub use xml::XmlExporter;
