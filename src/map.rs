//! Ordered map type for TOPS mappings.
//!
//! [`Mapping`] wraps an [`IndexMap`] so that entries keep the order in which
//! their keys were first inserted. Pretty-printing walks entries in that order,
//! which keeps re-serialization deterministic.
//!
//! Inserting a key that is already present replaces the value but keeps the
//! entry where it was:
//!
//! ```rust
//! use tops::{Mapping, Value};
//!
//! let mut map = Mapping::new();
//! map.insert("host".to_string(), Value::from("localhost"));
//! map.insert("port".to_string(), Value::from("80"));
//! map.insert("host".to_string(), Value::from("example.com"));
//!
//! let keys: Vec<_> = map.keys().cloned().collect();
//! assert_eq!(keys, vec!["host", "port"]);
//! assert_eq!(map.get("host").and_then(|v| v.as_str().ok()), Some("example.com"));
//! ```

use crate::Value;
use indexmap::IndexMap;

/// An insertion-ordered map of unique string keys to TOPS values.
///
/// Equality is order-sensitive: two mappings are equal when they hold the
/// same keys, in the same order, with equal values.
#[derive(Debug, Clone, Default)]
pub struct Mapping(IndexMap<String, Value>);

impl Mapping {
    /// Creates an empty `Mapping`.
    #[must_use]
    pub fn new() -> Self {
        Mapping(IndexMap::new())
    }

    /// Creates an empty `Mapping` with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Mapping(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair.
    ///
    /// If the key was already present its value is replaced in place (the
    /// entry keeps its position) and the previous value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tops::{Mapping, Value};
    ///
    /// let mut map = Mapping::new();
    /// assert!(map.insert("a".to_string(), Value::from("1")).is_none());
    /// assert!(map.insert("a".to_string(), Value::from("2")).is_some());
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    /// Returns the value under `key`, inserting an empty value named after
    /// the key first if there is none.
    ///
    /// ```rust
    /// use tops::Mapping;
    ///
    /// let mut map = Mapping::new();
    /// map.entry("tags").push("a".into()).unwrap();
    /// map.entry("tags").push("b".into()).unwrap();
    /// assert_eq!(map.get("tags").unwrap().as_sequence().unwrap().len(), 2);
    /// ```
    pub fn entry(&mut self, key: &str) -> &mut Value {
        self.0
            .entry(key.to_string())
            .or_insert_with(|| Value::new().with_name(key))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Returns the entry at `index` in insertion order.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<(&String, &Value)> {
        self.0.get_index(index)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes `key`, shifting later entries down so the remaining order is kept.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Returns an iterator over the keys, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    pub fn values_mut(&mut self) -> indexmap::map::ValuesMut<'_, String, Value> {
        self.0.values_mut()
    }

    /// Returns an iterator over the key-value pairs, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, String, Value> {
        self.0.iter_mut()
    }
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|((ka, va), (kb, vb))| ka == kb && va == vb)
    }
}

impl IntoIterator for Mapping {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Mapping {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for Mapping {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        let mut map = Mapping::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(entries: &[(&str, &str)]) -> Mapping {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), Value::from(*v)))
            .collect()
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut map = mapping(&[("a", "1"), ("b", "2")]);
        let old = map.insert("a".to_string(), Value::from("3"));

        assert_eq!(old, Some(Value::from("1")));
        assert_eq!(map.get_index(0).map(|(k, _)| k.as_str()), Some("a"));
        assert_eq!(map.get("a"), Some(&Value::from("3")));
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let ab = mapping(&[("a", "1"), ("b", "2")]);
        let ba = mapping(&[("b", "2"), ("a", "1")]);

        assert_ne!(ab, ba);
        assert_eq!(ab, mapping(&[("a", "1"), ("b", "2")]));
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut map = mapping(&[("a", "1"), ("b", "2"), ("c", "3")]);
        map.remove("a");

        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "c"]);
    }

    #[test]
    fn test_entry_names_new_values() {
        let mut map = Mapping::new();
        let value = map.entry("server");
        assert!(value.is_empty());
        assert_eq!(value.name(), Some("server"));
    }
}
