use std::collections::HashMap;

use crate::types::{Injectable, Resolved};

/// Values supplied up front, keyed by requirement key
///
/// A requirement whose key is prefilled is never resolved and never cached.
/// Entries no requirement asks for are ignored.
#[derive(Debug, Clone, Default)]
pub struct Prefills {
    values: HashMap<String, Resolved>,
}

impl Prefills {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value, for chaining
    pub fn with<T: Injectable>(mut self, key: impl Into<String>, value: T) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds a value, returns the value previously stored under the key
    pub fn insert<T: Injectable>(&mut self, key: impl Into<String>, value: T) -> Option<Resolved> {
        self.insert_resolved(key, Resolved::new(value))
    }

    pub fn insert_resolved(&mut self, key: impl Into<String>, value: Resolved) -> Option<Resolved> {
        self.values.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&Resolved> {
        self.values.get(key)
    }

    /// Like [Prefills::get], also returning the stored key
    pub fn get_key_value(&self, key: &str) -> Option<(&str, &Resolved)> {
        self.values
            .get_key_value(key)
            .map(|(key, value)| (key.as_str(), value))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Resolved)> for Prefills {
    fn from_iter<I: IntoIterator<Item = (K, Resolved)>>(iter: I) -> Self {
        Prefills {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<K: Into<String>> Extend<(K, Resolved)> for Prefills {
    fn extend<I: IntoIterator<Item = (K, Resolved)>>(&mut self, iter: I) {
        self.values.extend(iter.into_iter().map(|(k, v)| (k.into(), v)));
    }
}
