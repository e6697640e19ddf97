//! Dataset
//!
//! `data-*` attribute storage. Keys are stored camelCased and can be
//! looked up either way, so `highres-image` and `highresImage` name the
//! same entry.

use std::collections::HashMap;

/// Custom data attached to an element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    data: HashMap<String, String>,
}

impl Dataset {
    /// Create empty dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the `data-*` entries out of raw attribute pairs
    pub fn from_attributes<'a>(attrs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut dataset = Self::new();
        for (name, value) in attrs {
            if let Some(key) = name.strip_prefix("data-") {
                dataset.set(key, value);
            }
        }
        dataset
    }

    /// Get value by kebab-case or camelCase key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(&to_camel_case(key)).map(|s| s.as_str())
    }

    /// Set value by kebab-case or camelCase key
    pub fn set(&mut self, key: &str, value: &str) {
        self.data.insert(to_camel_case(key), value.to_string());
    }

    /// Delete by key
    pub fn delete(&mut self, key: &str) -> bool {
        self.data.remove(&to_camel_case(key)).is_some()
    }

    /// Check if key exists
    pub fn has(&self, key: &str) -> bool {
        self.data.contains_key(&to_camel_case(key))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Convert key to attribute name
    pub fn to_attribute_name(key: &str) -> String {
        format!("data-{}", to_kebab_case(key))
    }
}

/// Convert kebab-case to camelCase
fn to_camel_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = false;

    for c in s.chars() {
        if c == '-' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Convert camelCase to kebab-case
fn to_kebab_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);

    for c in s.chars() {
        if c.is_ascii_uppercase() {
            result.push('-');
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }

    result
}
