//! Class list
//!
//! Ordered, duplicate-free set of CSS class tokens on an element.

/// Space-separated class tokens (the element's `class` attribute)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    tokens: Vec<String>,
}

impl ClassList {
    /// Create empty class list
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a `class` attribute value
    pub fn from_string(s: &str) -> Self {
        let mut list = Self::new();
        for token in s.split_whitespace() {
            list.add(token);
        }
        list
    }

    /// Number of classes
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Check if class is present
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Add a class, returns false if it was already present
    pub fn add(&mut self, token: &str) -> bool {
        if token.is_empty() || self.contains(token) {
            return false;
        }
        self.tokens.push(token.to_string());
        true
    }

    /// Remove a class, returns true if it was present
    pub fn remove(&mut self, token: &str) -> bool {
        let before = self.tokens.len();
        self.tokens.retain(|t| t != token);
        self.tokens.len() != before
    }

    /// Toggle class, returns new state
    pub fn toggle(&mut self, token: &str, force: Option<bool>) -> bool {
        match force {
            Some(true) => {
                self.add(token);
                true
            }
            Some(false) => {
                self.remove(token);
                false
            }
            None => {
                if !self.remove(token) {
                    self.add(token);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Serialized attribute value
    pub fn value(&self) -> String {
        self.tokens.join(" ")
    }

    /// Iterate over classes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|s| s.as_str())
    }
}

impl std::fmt::Display for ClassList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_string() {
        let list = ClassList::from_string("gallery-item  state-zoom gallery-item");
        assert_eq!(list.len(), 2);
        assert!(list.contains("gallery-item"));
        assert!(list.contains("state-zoom"));
        assert_eq!(list.to_string(), "gallery-item state-zoom");
    }

    #[test]
    fn test_add_remove() {
        let mut list = ClassList::new();
        assert!(list.add("state-inactive"));
        assert!(!list.add("state-inactive"));
        assert!(!list.add(""));
        assert_eq!(list.len(), 1);

        assert!(list.remove("state-inactive"));
        assert!(!list.remove("state-inactive"));
        assert!(list.is_empty());
    }

    #[test]
    fn test_toggle() {
        let mut list = ClassList::new();

        assert!(list.toggle("image-zoomed", None));
        assert!(list.contains("image-zoomed"));

        assert!(!list.toggle("image-zoomed", None));
        assert!(!list.contains("image-zoomed"));

        assert!(list.toggle("image-zoomed", Some(true)));
        assert!(list.toggle("image-zoomed", Some(true)));
        assert_eq!(list.len(), 1);
    }
}
