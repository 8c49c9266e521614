//! Reflected configuration storage

use crate::dom::{parse_selector, HtmlDocument};
use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// Named string-valued configuration keys on the host element
pub trait ConfigStore {
    /// Read a key
    fn get(&self, key: &str) -> Option<String>;

    /// Write a key
    fn set(&mut self, key: &str, value: &str);

    /// Remove a key
    fn remove(&mut self, key: &str);

    /// Check whether a key is present
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// In-memory attribute set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    attrs: BTreeMap<String, String>,
}

impl AttributeMap {
    /// Create an empty attribute map
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an attribute map from key/value pairs
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            attrs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Seed from the attributes of the first element matching `selector`
    pub fn from_element(document: &HtmlDocument, selector: &str) -> Result<Self> {
        let parsed = parse_selector(selector)?;
        let host = document
            .select_first(&parsed)
            .ok_or_else(|| Error::config(format!("Host element '{selector}' not found")))?;
        Ok(Self::from_pairs(document.attrs(host)))
    }

    /// Iterate over all attributes in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Whether there are no attributes
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

impl ConfigStore for AttributeMap {
    fn get(&self, key: &str) -> Option<String> {
        self.attrs.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.attrs.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.attrs.remove(key);
    }
}
