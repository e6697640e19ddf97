//! DOM Node
//!
//! Nodes live in the tree arena and link to each other through `NodeId`s
//! instead of pointers.

use crate::{ClassList, Dataset, ElementGeometry, EventType, Listener, ListenerId, NodeId};

/// DOM Node - Core structure
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(tag: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Self::with_data(NodeData::Text(content.to_string()))
    }

    /// Create a comment node
    pub fn comment(content: &str) -> Self {
        Self::with_data(NodeData::Comment(content.to_string()))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    /// Copy of this node's payload with all tree links cleared
    pub(crate) fn detached_copy(&self) -> Self {
        let mut data = self.data.clone();
        if let NodeData::Element(elem) = &mut data {
            elem.listeners.clear();
        }
        Self::with_data(data)
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
}

/// Element-specific data
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    /// Lowercased tag name
    pub tag: String,
    /// Cached id attribute
    pub id: Option<String>,
    /// Class list
    pub classes: ClassList,
    /// Remaining plain attributes, in source order
    pub attrs: Vec<Attribute>,
    /// `data-*` attributes
    pub dataset: Dataset,
    /// Inline style declarations, in insertion order
    pub style: Vec<(String, String)>,
    /// Laid-out box
    pub geometry: ElementGeometry,
    /// Registered event listeners
    pub listeners: Vec<Listener>,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<String> {
        match name {
            "id" => self.id.clone(),
            "class" => Some(self.classes.value()),
            "style" if !self.style.is_empty() => Some(self.style_value()),
            _ => {
                if let Some(key) = name.strip_prefix("data-") {
                    return self.dataset.get(key).map(str::to_string);
                }
                self.attrs
                    .iter()
                    .find(|a| a.name == name)
                    .map(|a| a.value.clone())
            }
        }
    }

    /// Set an attribute, keeping id / class / data / style caches in sync
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match name {
            "id" => self.id = Some(value.to_string()),
            "class" => self.classes = ClassList::from_string(value),
            "style" => {
                self.style.clear();
                for decl in value.split(';') {
                    if let Some((prop, val)) = decl.split_once(':') {
                        self.set_style(prop.trim(), val.trim());
                    }
                }
            }
            _ => {
                if let Some(key) = name.strip_prefix("data-") {
                    self.dataset.set(key, value);
                    return;
                }
                // Check if attribute already exists
                if let Some(attr) = self.attrs.iter_mut().find(|a| a.name == name) {
                    attr.value = value.to_string();
                    return;
                }
                self.attrs.push(Attribute {
                    name: name.to_string(),
                    value: value.to_string(),
                });
            }
        }
    }

    /// Get an inline style property
    pub fn get_style(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Set an inline style property
    pub fn set_style(&mut self, property: &str, value: &str) {
        if let Some(decl) = self.style.iter_mut().find(|(p, _)| p == property) {
            decl.1 = value.to_string();
        } else {
            self.style.push((property.to_string(), value.to_string()));
        }
    }

    /// Serialized `style` attribute
    pub fn style_value(&self) -> String {
        self.style
            .iter()
            .map(|(p, v)| format!("{p}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Listener tokens registered for an event type
    pub fn listeners_for(&self, event_type: EventType) -> impl Iterator<Item = ListenerId> + '_ {
        self.listeners
            .iter()
            .filter(move |l| l.event_type == event_type)
            .map(|l| l.id)
    }
}

/// Attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attr_routes_special_names() {
        let mut elem = ElementData::new("IMG");
        elem.set_attr("id", "picture1");
        elem.set_attr("class", "gallery-image thumb");
        elem.set_attr("data-highres-image", "full/1.jpg");
        elem.set_attr("src", "thumb/1.jpg");
        elem.set_attr("src", "thumb/1b.jpg");

        assert_eq!(elem.tag, "img");
        assert_eq!(elem.id.as_deref(), Some("picture1"));
        assert!(elem.classes.contains("thumb"));
        assert_eq!(elem.dataset.get("highres-image"), Some("full/1.jpg"));
        assert_eq!(elem.get_attr("data-highres-image").as_deref(), Some("full/1.jpg"));
        assert_eq!(elem.get_attr("src").as_deref(), Some("thumb/1b.jpg"));
        assert_eq!(elem.attrs.len(), 1);
    }

    #[test]
    fn test_style_attribute() {
        let mut elem = ElementData::new("div");
        elem.set_attr("style", "top: 10px; left:0px");
        elem.set_style("top", "20px");

        assert_eq!(elem.get_style("top"), Some("20px"));
        assert_eq!(elem.get_style("left"), Some("0px"));
        assert_eq!(elem.get_attr("style").as_deref(), Some("top: 20px; left: 0px;"));
    }

    #[test]
    fn test_detached_copy_drops_listeners() {
        let mut node = Node::element("li");
        if let Some(elem) = node.as_element_mut() {
            elem.listeners.push(Listener { event_type: EventType::Click, id: ListenerId(3) });
            elem.set_attr("data-highres-image", "a.jpg");
        }
        node.parent = NodeId(2);

        let copy = node.detached_copy();
        let elem = copy.as_element().expect("element");
        assert!(elem.listeners.is_empty());
        assert_eq!(elem.dataset.get("highres-image"), Some("a.jpg"));
        assert_eq!(copy.parent, NodeId::NONE);
    }
}
