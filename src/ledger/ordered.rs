//! Insertion-ordered keyed buckets.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Maps category names to buckets while remembering first-seen order.
///
/// Keys are compared exactly; [`OrderedGroups::find_ignore_case`] offers the
/// case-insensitive lookup used by name-based queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<(String, V)>", into = "Vec<(String, V)>")]
pub struct OrderedGroups<V: Clone> {
    keys: Vec<String>,
    values: Vec<V>,
    index: HashMap<String, usize>,
}

impl<V: Clone> Default for OrderedGroups<V> {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<V: Clone> OrderedGroups<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the bucket for `key`, appending a fresh one when first seen.
    pub fn entry_or_insert_with<F>(&mut self, key: &str, make: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let position = match self.index.get(key) {
            Some(position) => *position,
            None => {
                let position = self.keys.len();
                self.keys.push(key.to_string());
                self.values.push(make());
                self.index.insert(key.to_string(), position);
                position
            }
        };
        &mut self.values[position]
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|position| &self.values[*position])
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        match self.index.get(key) {
            Some(position) => self.values.get_mut(*position),
            None => None,
        }
    }

    /// Returns every bucket whose key matches `key` ignoring ASCII case.
    pub fn find_ignore_case<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a V> + 'a {
        self.iter()
            .filter(move |(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value)
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [V] {
        &mut self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.keys
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Rebuilds the structure with each bucket transformed, preserving order.
    pub fn map_values<U: Clone, F>(&self, mut f: F) -> OrderedGroups<U>
    where
        F: FnMut(&V) -> U,
    {
        let mut mapped = OrderedGroups::new();
        for (key, value) in self.iter() {
            let converted = f(value);
            mapped.entry_or_insert_with(key, || converted);
        }
        mapped
    }
}

impl<V: Clone> From<Vec<(String, V)>> for OrderedGroups<V> {
    fn from(pairs: Vec<(String, V)>) -> Self {
        let mut groups = OrderedGroups::new();
        for (key, value) in pairs {
            // Later duplicates overwrite earlier values but keep the first position.
            let slot = groups.entry_or_insert_with(&key, || value.clone());
            *slot = value;
        }
        groups
    }
}

impl<V: Clone> From<OrderedGroups<V>> for Vec<(String, V)> {
    fn from(groups: OrderedGroups<V>) -> Self {
        groups.keys.into_iter().zip(groups.values).collect()
    }
}

impl<V: Clone> IntoIterator for OrderedGroups<V> {
    type Item = (String, V);
    type IntoIter = std::iter::Zip<std::vec::IntoIter<String>, std::vec::IntoIter<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.into_iter().zip(self.values)
    }
}
