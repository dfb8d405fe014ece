//! Data Record SDK - schema-less record containers with multi-format export
//!
//! Provides:
//! - [`Record`]: a dynamic key/value container with presence/read/write/
//!   removal semantics and accessor-style dispatch
//! - Export engine: JSON, XML and CSV rendering of filtered record views
//! - [`RecordCollection`]: an ordered, optionally keyed aggregate of
//!   records with bulk export

pub mod collection;
pub mod export;
pub mod record;

// Re-export commonly used types
pub use collection::{CollectionError, RecordCollection};
pub use export::{CsvExporter, ExportError, ExportResult, JsonExporter, XmlExporter};
pub use record::naming::NameTransformer;
pub use record::{AccessorOp, Record, RecordError};

// The container's value model
pub use serde_json::{Map, Value};
