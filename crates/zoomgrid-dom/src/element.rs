//! Element Query Methods
//!
//! querySelector, querySelectorAll, matches and ancestor lookup over a
//! small selector grammar: compound selectors (`tag`, `#id`, `.class`,
//! `*`) joined by the descendant combinator, and comma separated groups.

use crate::{DomError, DomResult, DomTree, ElementData, NodeId};

/// Element query trait
pub trait ElementQuery {
    /// Query first descendant of `scope` matching the selector
    fn query_selector(&self, scope: NodeId, selector: &str) -> DomResult<Option<NodeId>>;

    /// Query all descendants of `scope` matching the selector, in document order
    fn query_selector_all(&self, scope: NodeId, selector: &str) -> DomResult<Vec<NodeId>>;

    /// Find the nearest strict ancestor matching the selector
    fn closest_ancestor(&self, element: NodeId, selector: &str) -> DomResult<Option<NodeId>>;

    /// Check if element matches selector
    fn matches(&self, element: NodeId, selector: &str) -> DomResult<bool>;
}

/// Simple selector for matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    Tag(String),
    Class(String),
    Id(String),
    Universal,
}

impl SimpleSelector {
    /// Check a single element against this selector
    pub fn matches(&self, elem: &ElementData) -> bool {
        match self {
            SimpleSelector::Universal => true,
            SimpleSelector::Tag(tag) => elem.tag.eq_ignore_ascii_case(tag),
            SimpleSelector::Id(id) => elem.id.as_deref() == Some(id.as_str()),
            SimpleSelector::Class(class) => elem.classes.contains(class),
        }
    }
}

/// Compound selector: every simple selector must match the same element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelector(pub Vec<SimpleSelector>);

impl CompoundSelector {
    /// Parse a compound such as `div.gallery-item#picture2`
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = Vec::new();
        let mut chars = s.chars().peekable();

        while let Some(&c) = chars.peek() {
            let kind = match c {
                '*' => {
                    chars.next();
                    parts.push(SimpleSelector::Universal);
                    continue;
                }
                '#' | '.' => {
                    chars.next();
                    Some(c)
                }
                _ => None,
            };

            let mut ident = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    ident.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            if ident.is_empty() {
                return None;
            }

            parts.push(match kind {
                Some('#') => SimpleSelector::Id(ident),
                Some(_) => SimpleSelector::Class(ident),
                None => SimpleSelector::Tag(ident.to_ascii_lowercase()),
            });
        }

        if parts.is_empty() { None } else { Some(Self(parts)) }
    }

    pub fn matches(&self, elem: &ElementData) -> bool {
        self.0.iter().all(|s| s.matches(elem))
    }
}

/// Parsed selector list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// Each group is a chain of compounds, outermost first
    groups: Vec<Vec<CompoundSelector>>,
}

impl Selector {
    /// Parse a selector string
    pub fn parse(s: &str) -> DomResult<Self> {
        let invalid = || DomError::InvalidSelector(s.to_string());

        let mut groups = Vec::new();
        for group in s.split(',') {
            let chain = group
                .split_whitespace()
                .map(CompoundSelector::parse)
                .collect::<Option<Vec<_>>>()
                .ok_or_else(invalid)?;
            if chain.is_empty() {
                return Err(invalid());
            }
            groups.push(chain);
        }

        Ok(Self { groups })
    }

    /// Check whether `node` matches any group of this selector
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        self.groups.iter().any(|chain| Self::matches_chain(tree, node, chain))
    }

    fn matches_chain(tree: &DomTree, node: NodeId, chain: &[CompoundSelector]) -> bool {
        let Some((last, outer)) = chain.split_last() else {
            return false;
        };
        if !tree.element(node).is_some_and(|e| last.matches(e)) {
            return false;
        }

        // Descendant combinators only, so the nearest matching ancestor
        // is always the right one to continue from.
        let mut pending = outer.iter().rev().peekable();
        for ancestor in tree.ancestors(node) {
            let Some(compound) = pending.peek() else {
                break;
            };
            if tree.element(ancestor).is_some_and(|e| compound.matches(e)) {
                pending.next();
            }
        }
        pending.peek().is_none()
    }
}

impl ElementQuery for DomTree {
    fn query_selector(&self, scope: NodeId, selector: &str) -> DomResult<Option<NodeId>> {
        let selector = Selector::parse(selector)?;
        self.check(scope)?;
        Ok(self.descendants(scope).find(|&id| selector.matches(self, id)))
    }

    fn query_selector_all(&self, scope: NodeId, selector: &str) -> DomResult<Vec<NodeId>> {
        let selector = Selector::parse(selector)?;
        self.check(scope)?;
        Ok(self
            .descendants(scope)
            .filter(|&id| selector.matches(self, id))
            .collect())
    }

    fn closest_ancestor(&self, element: NodeId, selector: &str) -> DomResult<Option<NodeId>> {
        let selector = Selector::parse(selector)?;
        self.check(element)?;
        Ok(self.ancestors(element).find(|&id| selector.matches(self, id)))
    }

    fn matches(&self, element: NodeId, selector: &str) -> DomResult<bool> {
        let selector = Selector::parse(selector)?;
        self.check(element)?;
        Ok(selector.matches(self, element))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compound_parse() {
        assert_eq!(
            CompoundSelector::parse("li.gallery-item#picture2"),
            Some(CompoundSelector(vec![
                SimpleSelector::Tag("li".to_string()),
                SimpleSelector::Class("gallery-item".to_string()),
                SimpleSelector::Id("picture2".to_string()),
            ]))
        );
        assert_eq!(
            CompoundSelector::parse("*"),
            Some(CompoundSelector(vec![SimpleSelector::Universal]))
        );
        assert_eq!(CompoundSelector::parse("."), None);
        assert_eq!(CompoundSelector::parse("a>b"), None);
    }

    #[test]
    fn test_selector_parse_errors() {
        assert!(Selector::parse("#picture2 .image-zoom").is_ok());
        assert!(Selector::parse("img, .thumb").is_ok());
        assert!(matches!(Selector::parse(""), Err(DomError::InvalidSelector(_))));
        assert!(matches!(Selector::parse("a,,b"), Err(DomError::InvalidSelector(_))));
        assert!(matches!(Selector::parse("ul > li"), Err(DomError::InvalidSelector(_))));
        assert!(matches!(Selector::parse("img[data-src]"), Err(DomError::InvalidSelector(_))));
    }

    #[test]
    fn test_element_matches() {
        let mut elem = ElementData::new("div");
        elem.set_attr("id", "main");
        elem.set_attr("class", "container active");

        assert!(SimpleSelector::Tag("DIV".to_string()).matches(&elem));
        assert!(SimpleSelector::Id("main".to_string()).matches(&elem));
        assert!(SimpleSelector::Class("container".to_string()).matches(&elem));
        assert!(SimpleSelector::Universal.matches(&elem));
        assert!(!SimpleSelector::Class("hidden".to_string()).matches(&elem));
    }

    fn gallery_tree() -> (DomTree, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let root = tree.root();
        let grid = tree.create_element("ul");
        tree.set_attr(grid, "class", "gallery-items").unwrap();
        let item = tree.create_element("li");
        tree.set_attr(item, "id", "picture2").unwrap();
        tree.set_attr(item, "class", "gallery-item").unwrap();
        let link = tree.create_element("a");
        tree.set_attr(link, "class", "gallery-image image-zoom").unwrap();
        tree.append_child(root, grid).unwrap();
        tree.append_child(grid, item).unwrap();
        tree.append_child(item, link).unwrap();
        (tree, grid, item, link)
    }

    #[test]
    fn test_descendant_combinator() {
        let (tree, grid, item, link) = gallery_tree();
        let root = tree.root();

        assert_eq!(tree.query_selector(root, "#picture2 .image-zoom").unwrap(), Some(link));
        assert_eq!(tree.query_selector(root, ".gallery-items a").unwrap(), Some(link));
        assert_eq!(tree.query_selector(root, "#picture3 .image-zoom").unwrap(), None);
        assert_eq!(tree.query_selector_all(root, "ul, li").unwrap(), vec![grid, item]);
        assert!(tree.matches(link, "li a.image-zoom").unwrap());
        assert!(!tree.matches(link, "a li").unwrap());
    }

    #[test]
    fn test_query_scope_excludes_self() {
        let (tree, _grid, item, _link) = gallery_tree();
        assert_eq!(tree.query_selector(item, ".gallery-item").unwrap(), None);
    }

    #[test]
    fn test_closest_ancestor() {
        let (tree, grid, item, link) = gallery_tree();

        assert_eq!(tree.closest_ancestor(link, ".gallery-item").unwrap(), Some(item));
        assert_eq!(tree.closest_ancestor(link, "ul").unwrap(), Some(grid));
        assert_eq!(tree.closest_ancestor(item, ".gallery-item").unwrap(), None);
    }
}
