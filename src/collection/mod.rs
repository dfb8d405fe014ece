//! Record collection
//!
//! An ordered aggregate of [`Record`]s, optionally keyed by caller-supplied
//! unique identifiers, with bulk export batching every member's view into
//! one document.

use serde_json::Value;
use tracing::debug;

use crate::export::{CsvExporter, ExportError, JsonExporter, XmlExporter};
use crate::record::Record;

/// Error during collection operations
#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    #[error("Key {0} already in use")]
    DuplicateKey(String),
    #[error("Key {0} not found")]
    KeyNotFound(String),
}

#[derive(Debug, Clone)]
struct Entry {
    key: Option<String>,
    record: Record,
}

/// An ordered collection of records.
///
/// Members added under a key are addressable by that key and the key must
/// be unique; members added positionally are reachable through iteration
/// only. Insertion order is preserved across both kinds.
///
/// Unlike [`Record::get`], fetching an unused key here is an error: the
/// aggregate enforces key integrity while flat field access favors
/// ergonomic defaults.
#[derive(Debug, Clone, Default)]
pub struct RecordCollection {
    entries: Vec<Entry>,
}

impl RecordCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a record positionally; it will not be addressable by key.
    pub fn add(&mut self, record: Record) {
        self.entries.push(Entry { key: None, record });
    }

    /// Store a record under a unique key.
    ///
    /// # Errors
    ///
    /// Fails with [`CollectionError::DuplicateKey`] when `key` is already
    /// in use; the collection is unchanged on failure.
    pub fn add_keyed(
        &mut self,
        key: impl Into<String>,
        record: Record,
    ) -> Result<(), CollectionError> {
        let key = key.into();
        if self.contains_key(&key) {
            return Err(CollectionError::DuplicateKey(key));
        }
        self.entries.push(Entry {
            key: Some(key),
            record,
        });
        Ok(())
    }

    /// Whether a record is stored under `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.key.as_deref() == Some(key))
    }

    /// Fetch the record stored under `key`.
    ///
    /// # Errors
    ///
    /// Fails with [`CollectionError::KeyNotFound`] when the key is unused.
    pub fn get(&self, key: &str) -> Result<&Record, CollectionError> {
        self.entries
            .iter()
            .find(|entry| entry.key.as_deref() == Some(key))
            .map(|entry| &entry.record)
            .ok_or_else(|| CollectionError::KeyNotFound(key.to_string()))
    }

    /// Mutable variant of [`RecordCollection::get`].
    pub fn get_mut(&mut self, key: &str) -> Result<&mut Record, CollectionError> {
        self.entries
            .iter_mut()
            .find(|entry| entry.key.as_deref() == Some(key))
            .map(|entry| &mut entry.record)
            .ok_or_else(|| CollectionError::KeyNotFound(key.to_string()))
    }

    /// Remove the entry stored under `key`, preserving the order of the
    /// remaining entries; a no-op when the key is unused.
    pub fn delete(&mut self, key: &str) {
        match self
            .entries
            .iter()
            .position(|entry| entry.key.as_deref() == Some(key))
        {
            Some(index) => {
                self.entries.remove(index);
            }
            None => debug!(key, "delete on unused collection key"),
        }
    }

    /// Iterate over all members in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &Record> {
        self.entries.iter().map(|entry| &entry.record)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection holds no members.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render every member's export view into one JSON array.
    ///
    /// Each member contributes `to_value(keys, keys_to_ignore, strip_keys)`
    /// in insertion order.
    pub fn to_json(
        &self,
        keys: &[&str],
        keys_to_ignore: &[&str],
        strip_keys: bool,
    ) -> Result<String, ExportError> {
        let views = self.views(keys, keys_to_ignore, strip_keys);
        Ok(JsonExporter::export(&views)?.content)
    }

    /// Render every member's export view into one XML document, each view
    /// as an `<item>` element under the root.
    pub fn to_xml(
        &self,
        keys: &[&str],
        keys_to_ignore: &[&str],
        use_xml_declaration: bool,
    ) -> Result<String, ExportError> {
        let views = Value::Array(self.views(keys, keys_to_ignore, false));
        Ok(XmlExporter::export(&views, use_xml_declaration)?.content)
    }

    /// Render the collection as one CSV table.
    ///
    /// The header is the explicit `keys`, or the first member's visible
    /// keys when `keys` is empty. Every row is projected through the
    /// header so arity always matches; keys a member lacks render as empty
    /// cells.
    pub fn to_csv(&self, keys: &[&str], keys_to_ignore: &[&str]) -> Result<String, ExportError> {
        let header: Vec<String> = if keys.is_empty() {
            match self.entries.first() {
                Some(first) => first.record.all(keys_to_ignore).keys().cloned().collect(),
                None => Vec::new(),
            }
        } else {
            keys.iter().map(|key| key.to_string()).collect()
        };
        let rows: Vec<Vec<Value>> = self
            .entries
            .iter()
            .map(|entry| {
                header
                    .iter()
                    .map(|key| entry.record.get(key).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();
        Ok(CsvExporter::export(&header, &rows)?.content)
    }

    fn views(&self, keys: &[&str], keys_to_ignore: &[&str], strip_keys: bool) -> Vec<Value> {
        self.entries
            .iter()
            .map(|entry| entry.record.to_value(keys, keys_to_ignore, strip_keys))
            .collect()
    }
}
