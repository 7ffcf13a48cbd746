//! Element Attributes
//!
//! Attribute manipulation: get, set, remove, has.
//! Names are ASCII-lowercased on the way in, as for HTML elements.

use std::collections::HashMap;

/// Named node map (attribute collection), insertion ordered
#[derive(Debug, Clone, Default)]
pub struct NamedNodeMap {
    attributes: Vec<Attr>,
    by_name: HashMap<String, usize>,
}

/// Single attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

impl Attr {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            value: value.into(),
        }
    }

    /// `data-*` attribute
    pub fn is_data(&self) -> bool {
        self.name.starts_with("data-")
    }
}

impl NamedNodeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Attribute by index
    pub fn item(&self, index: usize) -> Option<&Attr> {
        self.attributes.get(index)
    }

    /// Attribute by name
    pub fn get_named_item(&self, name: &str) -> Option<&Attr> {
        self.by_name
            .get(name.to_ascii_lowercase().as_str())
            .and_then(|&i| self.attributes.get(i))
    }

    /// Attribute value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_named_item(name).map(|a| a.value.as_str())
    }

    /// Set attribute, returning the replaced one
    pub fn set_named_item(&mut self, attr: Attr) -> Option<Attr> {
        if let Some(&index) = self.by_name.get(&attr.name) {
            Some(std::mem::replace(&mut self.attributes[index], attr))
        } else {
            self.by_name.insert(attr.name.clone(), self.attributes.len());
            self.attributes.push(attr);
            None
        }
    }

    /// Set attribute by name/value
    pub fn set(&mut self, name: &str, value: &str) {
        self.set_named_item(Attr::new(name, value));
    }

    /// Remove attribute by name
    pub fn remove(&mut self, name: &str) -> Option<Attr> {
        let index = self.by_name.remove(name.to_ascii_lowercase().as_str())?;
        for idx in self.by_name.values_mut() {
            if *idx > index {
                *idx -= 1;
            }
        }
        Some(self.attributes.remove(index))
    }

    /// Check if attribute exists
    pub fn has(&self, name: &str) -> bool {
        self.by_name.contains_key(name.to_ascii_lowercase().as_str())
    }

    /// Toggle a boolean attribute
    pub fn toggle(&mut self, name: &str, force: Option<bool>) -> bool {
        let on = force.unwrap_or(!self.has(name));
        if on {
            if !self.has(name) {
                self.set(name, "");
            }
        } else {
            self.remove(name);
        }
        on
    }

    /// Attribute names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|a| a.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attr> {
        self.attributes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_attribute() {
        let mut attrs = NamedNodeMap::new();
        attrs.set("data-placeholder", "Type here");
        attrs.set("contenteditable", "true");

        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("data-placeholder"), Some("Type here"));
        assert_eq!(attrs.get("CONTENTEDITABLE"), Some("true"));
    }

    #[test]
    fn test_replace_keeps_order() {
        let mut attrs = NamedNodeMap::new();
        attrs.set("id", "a");
        attrs.set("class", "b");
        let old = attrs.set_named_item(Attr::new("id", "c"));

        assert_eq!(old.map(|a| a.value), Some("a".to_string()));
        assert_eq!(attrs.names().collect::<Vec<_>>(), vec!["id", "class"]);
    }

    #[test]
    fn test_remove_reindexes() {
        let mut attrs = NamedNodeMap::new();
        attrs.set("a", "1");
        attrs.set("b", "2");
        attrs.set("c", "3");

        assert!(attrs.remove("a").is_some());
        assert!(attrs.remove("a").is_none());
        assert_eq!(attrs.get("c"), Some("3"));
        assert_eq!(attrs.item(0).map(|a| a.name.as_str()), Some("b"));
    }

    #[test]
    fn test_toggle_attribute() {
        let mut attrs = NamedNodeMap::new();

        assert!(attrs.toggle("disabled", None));
        assert!(attrs.has("disabled"));
        assert!(!attrs.toggle("disabled", None));
        assert!(!attrs.has("disabled"));
        assert!(attrs.toggle("hidden", Some(true)));
        assert!(attrs.toggle("hidden", Some(true)));
    }
}
