//! Record container
//!
//! Provides [`Record`], a schema-less key/value container for loosely
//! structured data (storage rows, request payloads) with:
//! - existence, read, write and removal operations
//! - bulk replace/exchange/merge with an optional strict null-skip mode
//! - filtered projections for export (ignore lists, ordered allow lists,
//!   key stripping)
//! - accessor-style dispatch ("getFirstName" and friends, see
//!   [`accessor`])
//! - JSON/XML/CSV export delegating to the export engine

pub mod accessor;
pub mod naming;

use serde_json::{Map, Value};
use tracing::debug;

use crate::export::{CsvExporter, ExportError, JsonExporter, XmlExporter};
use naming::NameTransformer;

pub use accessor::AccessorOp;

/// Error during record operations
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("Unsupported accessor: {0} is not available on Record")]
    UnsupportedAccessor(String),
}

/// A schema-less attribute container.
///
/// Keys are unique strings in insertion order; values are arbitrary
/// [`serde_json::Value`]s (scalars, nested mappings, lists). A key is
/// present independently of its value being null: a key set to
/// `Value::Null` exists and `has` reports it.
///
/// Nested composite values are treated as exclusively owned by the record;
/// [`Record::remove`] and [`Record::flush`] tear them down recursively.
/// Do not hand the same composite value to two records and expect it to
/// survive removal from one of them.
///
/// # Example
///
/// ```rust
/// use data_record_sdk::Record;
/// use serde_json::json;
///
/// let mut record = Record::new();
/// record.set("first_name", "Ann");
/// record.set("age", 30);
///
/// assert!(record.has("first_name"));
/// assert_eq!(record.get("age"), Some(&json!(30)));
/// assert_eq!(record.keys(), vec!["first_name", "age"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Record {
    data: Map<String, Value>,
    transformer: NameTransformer,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self {
            data: Map::new(),
            transformer: NameTransformer::new(),
        }
    }

    /// Create a record seeded from a mapping.
    ///
    /// Seeding uses the same semantics as [`Record::merge`] in non-strict
    /// mode: every entry is set, null values included.
    pub fn from_map(data: Map<String, Value>) -> Self {
        let mut record = Self::new();
        record.merge(data, false);
        record
    }

    /// Borrow the full underlying mapping.
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> Vec<&str> {
        self.data.keys().map(String::as_str).collect()
    }

    /// Whether `key` is present, independent of its value being null.
    pub fn has(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Read a key. Absence is not an error: `None` means the key does not
    /// exist, `Some(&Value::Null)` means it exists with a null value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Mutable access to a present key's value.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.data.get_mut(key)
    }

    /// Insert or overwrite a key. Always succeeds.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key.into(), value.into());
    }

    /// Set a single key, skipping the write when `strict` is set and the
    /// value is null. The strict mode preserves required defaults during
    /// bulk loads.
    pub fn set_one(&mut self, key: impl Into<String>, value: impl Into<Value>, strict: bool) {
        let value = value.into();
        if strict && value.is_null() {
            return;
        }
        self.data.insert(key.into(), value);
    }

    /// Merge every entry of `data` into the record, in iteration order.
    /// With `strict` set, entries whose value is null are skipped and their
    /// key is not (re)created.
    pub fn merge(&mut self, data: Map<String, Value>, strict: bool) {
        for (key, value) in data {
            if strict && value.is_null() {
                continue;
            }
            self.data.insert(key, value);
        }
    }

    /// Delete a key; a no-op when absent. A present composite value is
    /// recursively cleared before the key is unset. Removal preserves the
    /// order of the remaining keys, and calling this twice is equivalent
    /// to calling it once.
    pub fn remove(&mut self, key: &str) {
        if let Some(value) = self.data.get_mut(key) {
            clear_nested(value);
            self.data.shift_remove(key);
        }
    }

    /// Recursively clear every nested composite value, then empty the
    /// record. Idempotent.
    pub fn flush(&mut self) {
        for (_, value) in self.data.iter_mut() {
            clear_nested(value);
        }
        self.data.clear();
    }

    /// Discard the current contents and become exactly `data`.
    ///
    /// This is a bulk swap: unlike [`Record::flush`], the old contents are
    /// not recursively torn down.
    pub fn replace(&mut self, data: Map<String, Value>) {
        debug!(entries = data.len(), "replacing record contents");
        self.data = data;
    }

    /// Flush, then re-populate from `data` via [`Record::merge`]. With
    /// `strict` set, null-valued source entries never (re)create their key.
    pub fn exchange(&mut self, data: Map<String, Value>, strict: bool) {
        self.flush();
        self.merge(data, strict);
    }

    /// Full data minus the ignored keys, as a fresh mapping.
    pub fn all(&self, keys_to_ignore: &[&str]) -> Map<String, Value> {
        self.data
            .iter()
            .filter(|(key, _)| !keys_to_ignore.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Build the export view.
    ///
    /// With `keys` empty this is [`Record::all`] as a `Value::Object`.
    /// Otherwise exactly the requested keys are projected, in the requested
    /// order, with absent keys yielding `Value::Null` rather than failing.
    /// With `strip_keys` set the result is a `Value::Array` of the values
    /// only, keys discarded.
    ///
    /// The view is a derived copy; the record is never mutated.
    pub fn to_value(&self, keys: &[&str], keys_to_ignore: &[&str], strip_keys: bool) -> Value {
        let entries = self.project(keys, keys_to_ignore);
        if strip_keys {
            Value::Array(entries.into_iter().map(|(_, value)| value).collect())
        } else {
            Value::Object(entries)
        }
    }

    /// Project a single key's value, stripped of its key.
    ///
    /// Equivalent to taking the only element of the stripped one-key view;
    /// an absent key yields `Value::Null`.
    pub fn as_values(&self, key: &str, keys_to_ignore: &[&str]) -> Value {
        match self.to_value(&[key], keys_to_ignore, true) {
            Value::Array(mut values) if !values.is_empty() => values.remove(0),
            _ => Value::Null,
        }
    }

    /// Render the export view as JSON text.
    pub fn to_json(
        &self,
        keys: &[&str],
        keys_to_ignore: &[&str],
        strip_keys: bool,
    ) -> Result<String, ExportError> {
        let view = self.to_value(keys, keys_to_ignore, strip_keys);
        Ok(JsonExporter::export(&view)?.content)
    }

    /// Render the export view as a pretty-printed XML document.
    ///
    /// # Errors
    ///
    /// Fails with [`ExportError::InvalidElementName`] when a key cannot be
    /// used as an XML element name.
    pub fn to_xml(
        &self,
        keys: &[&str],
        keys_to_ignore: &[&str],
        strip_keys: bool,
        use_xml_declaration: bool,
    ) -> Result<String, ExportError> {
        let view = self.to_value(keys, keys_to_ignore, strip_keys);
        Ok(XmlExporter::export(&view, use_xml_declaration)?.content)
    }

    /// Render the export view as CSV text: the view's keys become the
    /// header line, its values the single data row.
    pub fn to_csv(&self, keys: &[&str], keys_to_ignore: &[&str]) -> Result<String, ExportError> {
        let entries = self.project(keys, keys_to_ignore);
        let header: Vec<String> = entries.keys().cloned().collect();
        let row: Vec<Value> = entries.values().cloned().collect();
        Ok(CsvExporter::export(&header, &[row])?.content)
    }

    /// Number of present keys.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the record holds no keys.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order. Each call
    /// yields an independent cursor over the current state.
    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.data.iter()
    }

    fn project(&self, keys: &[&str], keys_to_ignore: &[&str]) -> Map<String, Value> {
        if keys.is_empty() {
            return self.all(keys_to_ignore);
        }
        keys.iter()
            .map(|&key| {
                (
                    key.to_string(),
                    self.get(key).cloned().unwrap_or(Value::Null),
                )
            })
            .collect()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        // The transformer memo table is derived state, not record state.
        self.data == other.data
    }
}

impl From<Map<String, Value>> for Record {
    fn from(data: Map<String, Value>) -> Self {
        Self::from_map(data)
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// Empty a composite value depth-first, leaving scalars untouched.
fn clear_nested(value: &mut Value) {
    match value {
        Value::Object(entries) => {
            for (_, nested) in entries.iter_mut() {
                clear_nested(nested);
            }
            entries.clear();
        }
        Value::Array(items) => {
            for nested in items.iter_mut() {
                clear_nested(nested);
            }
            items.clear();
        }
        _ => {}
    }
}
