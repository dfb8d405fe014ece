//! XML exporter
//!
//! Renders an export view into a pretty-printed XML document wrapped in a
//! `<root>` element: mapping keys become element names, composite values
//! nest, scalar values become escaped text content. A list repeats its
//! parent element once per item; a top-level (key-stripped) list uses
//! `<item>` elements.

use once_cell::sync::Lazy;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use regex::Regex;
use serde_json::Value;

use crate::export::{ExportError, ExportResult};

/// Root element wrapping every exported document.
const ROOT_ELEMENT: &str = "root";
/// Element name for entries of a top-level list view.
const LIST_ITEM_ELEMENT: &str = "item";
/// Indent width of the pretty-printed output.
const INDENT_WIDTH: usize = 4;

static ELEMENT_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.\-]*$").unwrap());

/// Exporter for pretty-printed XML documents.
pub struct XmlExporter;

impl XmlExporter {
    /// Render a view into an XML document.
    ///
    /// The `<?xml version="1.0"?>` declaration is included or omitted per
    /// `use_xml_declaration`.
    ///
    /// # Errors
    ///
    /// Fails with [`ExportError::InvalidElementName`] when a mapping key
    /// cannot be used as an XML element name. No partial output is
    /// returned.
    pub fn export(value: &Value, use_xml_declaration: bool) -> Result<ExportResult, ExportError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_WIDTH);
        if use_xml_declaration {
            writer
                .write_event(Event::Decl(BytesDecl::new("1.0", None, None)))
                .map_err(write_error)?;
        }

        writer
            .write_event(Event::Start(BytesStart::new(ROOT_ELEMENT)))
            .map_err(write_error)?;
        match value {
            Value::Object(entries) => {
                for (key, nested) in entries {
                    write_element(&mut writer, key, nested)?;
                }
            }
            Value::Array(items) => {
                for item in items {
                    write_element(&mut writer, LIST_ITEM_ELEMENT, item)?;
                }
            }
            scalar => write_text(&mut writer, scalar)?,
        }
        writer
            .write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))
            .map_err(write_error)?;

        let content = String::from_utf8(writer.into_inner())
            .map_err(|err| ExportError::SerializationError(err.to_string()))?;
        Ok(ExportResult {
            content,
            format: "xml".to_string(),
        })
    }
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    value: &Value,
) -> Result<(), ExportError> {
    validate_element_name(name)?;
    match value {
        Value::Array(items) => {
            if items.is_empty() {
                writer
                    .write_event(Event::Empty(BytesStart::new(name)))
                    .map_err(write_error)?;
                return Ok(());
            }
            for item in items {
                write_element(writer, name, item)?;
            }
            Ok(())
        }
        Value::Object(entries) => {
            writer
                .write_event(Event::Start(BytesStart::new(name)))
                .map_err(write_error)?;
            for (key, nested) in entries {
                write_element(writer, key, nested)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new(name)))
                .map_err(write_error)?;
            Ok(())
        }
        Value::Null => {
            writer
                .write_event(Event::Empty(BytesStart::new(name)))
                .map_err(write_error)
        }
        scalar => {
            writer
                .write_event(Event::Start(BytesStart::new(name)))
                .map_err(write_error)?;
            write_text(writer, scalar)?;
            writer
                .write_event(Event::End(BytesEnd::new(name)))
                .map_err(write_error)?;
            Ok(())
        }
    }
}

fn write_text(writer: &mut Writer<Vec<u8>>, scalar: &Value) -> Result<(), ExportError> {
    let text = match scalar {
        Value::Null => return Ok(()),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        // Composite values never reach here; write_element handles them.
        other => other.to_string(),
    };
    writer
        .write_event(Event::Text(BytesText::new(&text)))
        .map_err(write_error)
}

fn validate_element_name(name: &str) -> Result<(), ExportError> {
    let reserved = name
        .get(..3)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("xml"));
    if reserved || !ELEMENT_NAME.is_match(name) {
        return Err(ExportError::InvalidElementName(name.to_string()));
    }
    Ok(())
}

fn write_error(err: impl std::fmt::Display) -> ExportError {
    ExportError::SerializationError(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_name_validation() {
        assert!(validate_element_name("person").is_ok());
        assert!(validate_element_name("_private").is_ok());
        assert!(validate_element_name("first-name.v2").is_ok());

        assert!(validate_element_name("bad key").is_err());
        assert!(validate_element_name("1starts_with_digit").is_err());
        assert!(validate_element_name("").is_err());
        assert!(validate_element_name("xmlThing").is_err());
        assert!(validate_element_name("XMLThing").is_err());
    }
}
