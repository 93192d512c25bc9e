//! Ordered attribute storage.
//!
//! Attributes keep the order they were written in, so that re-rendering a
//! tree reproduces them as authored. Lookups are linear; elements rarely
//! carry more than a handful of attributes.

use std::slice;

/// A single `name="value"` pair on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Lowercased attribute name.
    pub name: String,
    /// Attribute value. A bare attribute (`<input disabled>`) has the value `"true"`.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// Attributes of an element, unique by name, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<Attribute>,
}

impl Attributes {
    /// Create an empty attribute list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value of the attribute called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Whether an attribute called `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|attr| attr.name == name)
    }

    /// Set `name` to `value`.
    ///
    /// An existing attribute keeps its position and has its value replaced;
    /// the previous value is returned. A new attribute is appended.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        if let Some(existing) = self.entries.iter_mut().find(|attr| attr.name == name) {
            return Some(std::mem::replace(&mut existing.value, value));
        }
        self.entries.push(Attribute::new(name, value));
        None
    }

    /// Remove the attribute called `name`, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.entries.iter().position(|attr| attr.name == name)?;
        Some(self.entries.remove(index).value)
    }

    /// Iterate over the attributes in order.
    pub fn iter(&self) -> slice::Iter<'_, Attribute> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (name, value) in iter {
            let _ = attrs.insert(name, value);
        }
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_position() {
        let mut attrs = Attributes::new();
        assert_eq!(attrs.insert("a", "1"), None);
        assert_eq!(attrs.insert("b", "2"), None);
        assert_eq!(attrs.insert("a", "3"), Some("1".to_string()));

        let pairs: Vec<(&str, &str)> = attrs
            .iter()
            .map(|attr| (attr.name.as_str(), attr.value.as_str()))
            .collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_remove() {
        let mut attrs: Attributes = [("id", "x"), ("class", "y")].into_iter().collect();
        assert_eq!(attrs.remove("id"), Some("x".to_string()));
        assert_eq!(attrs.remove("id"), None);
        assert_eq!(attrs.len(), 1);
        assert!(attrs.contains("class"));
    }
}
