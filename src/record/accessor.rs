//! Accessor dispatch
//!
//! Routes conventionally-named calls ("getFirstName", "setFirstName",
//! "hasFirstName", "unsetFirstName", "removeFirstName") onto key-based
//! record operations. The recognized prefixes form a fixed, statically
//! enumerable table; the remainder of the call name is canonicalized
//! through the record's [`NameTransformer`](super::naming::NameTransformer).
//!
//! Misnamed calls fail at call time, not at compile time. That is the
//! price of addressing arbitrary domain fields without declaring them
//! ahead of time.

use serde_json::Value;

use super::{Record, RecordError};

/// Operation selected by an accessor call name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorOp {
    /// `get` prefix: read a key; absent keys read as null.
    Get,
    /// `set` prefix: write a key.
    Set,
    /// `has` prefix: existence check.
    Has,
    /// `uns(et)` prefix: delete a key.
    Unset,
    /// `rem(ove)` prefix: delete a key.
    Remove,
}

impl AccessorOp {
    /// Split an accessor call name into its operation and field fragment.
    ///
    /// The first three characters select the operation, ASCII
    /// case-insensitively. `get`/`set`/`has` consume 3 characters before
    /// the fragment, `unset` consumes 5 and `remove` consumes 6. Returns
    /// `None` for an unrecognized prefix or a name too short to carry a
    /// fragment.
    pub fn parse(name: &str) -> Option<(AccessorOp, &str)> {
        let prefix = name.get(..3)?;
        let (op, consumed) = match prefix.to_ascii_lowercase().as_str() {
            "get" => (AccessorOp::Get, 3),
            "set" => (AccessorOp::Set, 3),
            "has" => (AccessorOp::Has, 3),
            "uns" => (AccessorOp::Unset, 5),
            "rem" => (AccessorOp::Remove, 6),
            _ => return None,
        };
        let fragment = name.get(consumed..)?;
        Some((op, fragment))
    }
}

impl Record {
    /// Dispatch a conventionally-named accessor call.
    ///
    /// Reads return `Some(value)` with `Value::Null` standing in for
    /// absent keys; `has` returns `Some(Value::Bool)`; writes and deletes
    /// return `None`. A `set` call with no argument writes null.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::UnsupportedAccessor`] naming the offending
    /// call when its prefix matches no recognized operation.
    ///
    /// # Example
    ///
    /// ```rust
    /// use data_record_sdk::Record;
    /// use serde_json::json;
    ///
    /// let mut record = Record::new();
    /// record.set("first_name", "Ann");
    ///
    /// let value = record.call("getFirstName", None).unwrap();
    /// assert_eq!(value, Some(json!("Ann")));
    ///
    /// record.call("setLastName", Some(json!("Lee"))).unwrap();
    /// assert!(record.has("last_name"));
    /// ```
    pub fn call(
        &mut self,
        name: &str,
        value: Option<Value>,
    ) -> Result<Option<Value>, RecordError> {
        let (op, fragment) = AccessorOp::parse(name)
            .ok_or_else(|| RecordError::UnsupportedAccessor(name.to_string()))?;
        let key = self.transformer.underscore(fragment);
        match op {
            AccessorOp::Get => Ok(Some(self.get(&key).cloned().unwrap_or(Value::Null))),
            AccessorOp::Set => {
                self.set(key, value.unwrap_or(Value::Null));
                Ok(None)
            }
            AccessorOp::Has => Ok(Some(Value::Bool(self.has(&key)))),
            AccessorOp::Unset | AccessorOp::Remove => {
                self.remove(&key);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prefix_table() {
        assert_eq!(
            AccessorOp::parse("getFirstName"),
            Some((AccessorOp::Get, "FirstName"))
        );
        assert_eq!(
            AccessorOp::parse("setFirstName"),
            Some((AccessorOp::Set, "FirstName"))
        );
        assert_eq!(
            AccessorOp::parse("hasFirstName"),
            Some((AccessorOp::Has, "FirstName"))
        );
        assert_eq!(
            AccessorOp::parse("unsetFirstName"),
            Some((AccessorOp::Unset, "FirstName"))
        );
        assert_eq!(
            AccessorOp::parse("removeFirstName"),
            Some((AccessorOp::Remove, "FirstName"))
        );
    }

    #[test]
    fn test_parse_rejects_unknown_and_short_names() {
        assert_eq!(AccessorOp::parse("zzzFoo"), None);
        assert_eq!(AccessorOp::parse(""), None);
        assert_eq!(AccessorOp::parse("ge"), None);
        // "uns"/"rem" prefixes match but leave no room for a fragment
        assert_eq!(AccessorOp::parse("uns"), None);
        assert_eq!(AccessorOp::parse("remov"), None);
    }

    #[test]
    fn test_parse_is_case_insensitive_on_prefix() {
        assert_eq!(
            AccessorOp::parse("GetFirstName"),
            Some((AccessorOp::Get, "FirstName"))
        );
    }
}
