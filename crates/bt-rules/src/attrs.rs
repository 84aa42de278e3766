//! Attributes extracted while categorizing.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Attribute name to set of values.
///
/// Values come from named capture groups and from static rule attributes.
/// Empty strings are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, BTreeSet<String>>);

impl Attributes {
    /// Create an empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value. Empty values are ignored.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            return;
        }
        self.0.entry(key.into()).or_default().insert(value);
    }

    /// Replace all values for `key`. An empty set removes the key.
    pub fn replace<I, S>(&mut self, key: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = values
            .into_iter()
            .map(Into::into)
            .filter(|v: &String| !v.is_empty())
            .collect();
        let key = key.into();
        if set.is_empty() {
            self.0.remove(&key);
        } else {
            self.0.insert(key, set);
        }
    }

    /// Remove a key and return its values.
    pub fn remove(&mut self, key: &str) -> Option<BTreeSet<String>> {
        self.0.remove(key)
    }

    /// All values for `key`.
    pub fn get(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.0.get(key)
    }

    /// Iterate the values for `key` (empty if absent).
    pub fn values<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .get(key)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// The value for `key` when exactly one exists.
    ///
    /// Scalar attributes such as `actor` are read this way.
    pub fn single(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(set) if set.len() == 1 => set.iter().next().map(String::as_str),
            _ => None,
        }
    }

    /// True if `key` has at least one value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no attributes were extracted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate keys and their value sets.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Drop empty values and keys left without values.
    ///
    /// Hooks may edit the sets directly through [`Attributes::replace`]; this
    /// restores the no-empties invariant after they run.
    pub fn finalize(&mut self) {
        for values in self.0.values_mut() {
            values.retain(|v| !v.trim().is_empty());
        }
        self.0.retain(|_, values| !values.is_empty());
    }
}
