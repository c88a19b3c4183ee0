use std::collections::btree_map::Iter;
use std::collections::{BTreeMap, HashMap};
use std::io::{self, Read, Write};

use serde::Serialize;
use terrors::OneOf;

use crate::error::{DecodeError, IoError};
use crate::{parser, writer};

/// An ordered set of string properties, read from and written to
/// `.properties` text.
///
/// Keys are unique: loading or setting an existing key replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Properties {
    entries: BTreeMap<String, String>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `.properties` text into a fresh set.
    pub fn parse(input: &str) -> Result<Self, OneOf<(DecodeError,)>> {
        let mut props = Self::new();
        props.load_str(input)?;
        Ok(props)
    }

    /// Merge entries parsed from `input` into this set, replacing existing
    /// keys. On a malformed escape the entries before it stay loaded.
    pub fn load_str(&mut self, input: &str) -> Result<(), OneOf<(DecodeError,)>> {
        parser::parse(input, |key, value| {
            self.entries.insert(key, value);
        })
    }

    /// Read UTF-8 `.properties` text from `reader` and merge it in.
    pub fn load_from<R: Read>(&mut self, mut reader: R) -> Result<(), OneOf<(IoError, DecodeError)>> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| OneOf::new(IoError(e)))?;
        let text = std::str::from_utf8(&bytes).map_err(|e| OneOf::new(DecodeError::InvalidUtf8(e)))?;
        self.load_str(text).map_err(OneOf::broaden)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Get a value, or `default` when the key is missing.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Insert or replace a value, returning the previous one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries, sorted by key.
    pub fn iter(&self) -> Iter<'_, String, String> {
        self.entries.iter()
    }

    /// Merge another set into this one. Existing keys are overwritten.
    pub fn merge(&mut self, other: Properties) {
        self.entries.extend(other.entries);
    }

    /// Plain map view with trimmed keys, leaving out keys that start with `#`.
    pub fn to_map(&self) -> HashMap<String, String> {
        self.entries
            .iter()
            .map(|(key, value)| (key.trim(), value))
            .filter(|(key, _)| !key.starts_with('#'))
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    /// Serialize as `.properties` text: the header `comments` (if any), a
    /// timestamp comment, then one `key=value` line per entry.
    pub fn store<W: Write>(&self, writer: &mut W, comments: Option<&str>) -> io::Result<()> {
        writer::write_properties(
            writer,
            comments,
            self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        )
    }
}

impl<'a> IntoIterator for &'a Properties {
    type Item = (&'a String, &'a String);
    type IntoIter = Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<(String, String)> for Properties {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Properties {
            entries: iter.into_iter().collect(),
        }
    }
}
