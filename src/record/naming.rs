//! Accessor-name canonicalization
//!
//! Converts mixed-case accessor fragments ("FirstName") into the canonical
//! lowercase underscore-separated key form ("first_name") used by the
//! record container. Results are memoized per transformer instance.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

// The regex crate has no lookaround, so the conversion runs as two capture
// replacements: acronym tails first ("HTMLParser" -> "HTML_Parser"), then
// plain lower/digit-to-upper boundaries ("First_Name").
static ACRONYM_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").unwrap());
static WORD_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").unwrap());

/// Memoizing camel-case to underscore converter.
///
/// Each record owns one transformer; the memo table grows monotonically
/// with the accessor vocabulary of the calling code and is never
/// invalidated.
#[derive(Debug, Clone, Default)]
pub struct NameTransformer {
    cache: HashMap<String, String>,
}

impl NameTransformer {
    /// Create a new transformer with an empty memo table.
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Convert an accessor fragment to its canonical key form.
    ///
    /// `"FirstName"` becomes `"first_name"`, `"HTMLParser"` becomes
    /// `"html_parser"`. Characters outside the word-boundary rules pass
    /// through unchanged, so an already-canonical name maps to itself.
    /// Repeat calls with the same raw name return the memoized result.
    pub fn underscore(&mut self, name: &str) -> String {
        if let Some(key) = self.cache.get(name) {
            return key.clone();
        }
        let separated = ACRONYM_BOUNDARY.replace_all(name, "${1}_${2}");
        let separated = WORD_BOUNDARY.replace_all(&separated, "${1}_${2}");
        let key = separated.to_ascii_lowercase();
        self.cache.insert(name.to_string(), key.clone());
        key
    }

    /// Whether a raw name already has a memoized entry.
    pub fn is_cached(&self, name: &str) -> bool {
        self.cache.contains_key(name)
    }
}
