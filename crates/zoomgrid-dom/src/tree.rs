//! DOM Tree (arena-based allocation)
//!
//! Detaching a node only unlinks it, so a detached `NodeId` stays valid
//! and can be re-inserted later. `remove_subtree` frees the slots of a
//! detached subtree; freed slots are handed out again by later
//! allocations.

use crate::{
    DomError, DomRect, DomResult, ElementData, ElementGeometry, EventType, Listener, ListenerId,
    Node, NodeId,
};

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Option<Node>>,
    free_list: Vec<u32>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(Node::document())],
            free_list: Vec::new(),
        }
    }

    /// Document node
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index()?)?.as_ref()
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index()?)?.as_mut()
    }

    /// Element data of a node, if it is an element
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id)?.as_element()
    }

    /// Number of live nodes (attached or not)
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    /// Check if tree holds anything besides the document node
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    pub(crate) fn check(&self, id: NodeId) -> DomResult<()> {
        self.get(id).map(|_| ()).ok_or(DomError::NotFound(id))
    }

    fn element_mut(&mut self, id: NodeId) -> DomResult<&mut ElementData> {
        self.get_mut(id)
            .ok_or(DomError::NotFound(id))?
            .as_element_mut()
            .ok_or(DomError::InvalidNodeType(id))
    }

    fn element_ref(&self, id: NodeId) -> DomResult<&ElementData> {
        self.get(id)
            .ok_or(DomError::NotFound(id))?
            .as_element()
            .ok_or(DomError::InvalidNodeType(id))
    }

    fn push(&mut self, node: Node) -> NodeId {
        if let Some(index) = self.free_list.pop() {
            self.nodes[index as usize] = Some(node);
            return NodeId(index);
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Some(node));
        id
    }

    // --- construction -----------------------------------------------------

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content))
    }

    /// Append `child` as last child of `parent`, moving it if it is
    /// already attached somewhere.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.check(parent)?;
        self.check(child)?;
        if child == NodeId::ROOT || parent == child || self.ancestors(parent).any(|a| a == child) {
            return Err(DomError::HierarchyRequest { parent, child });
        }

        self.detach(child)?;

        let last = self.get(parent).map_or(NodeId::NONE, |n| n.last_child);
        if let Some(node) = self.get_mut(child) {
            node.parent = parent;
            node.prev_sibling = last;
        }
        match self.get_mut(last) {
            Some(prev) => prev.next_sibling = child,
            None => self.set_link(parent, |n| n.first_child = child),
        }
        self.set_link(parent, |n| n.last_child = child);
        Ok(child)
    }

    /// Unlink a node from its parent; the subtree stays intact.
    /// Detaching an unattached node is a no-op.
    pub fn detach(&mut self, id: NodeId) -> DomResult<()> {
        let (parent, prev, next) = {
            let node = self.get(id).ok_or(DomError::NotFound(id))?;
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        if !parent.is_valid() {
            return Ok(());
        }

        match self.get_mut(prev) {
            Some(p) => p.next_sibling = next,
            None => self.set_link(parent, |n| n.first_child = next),
        }
        match self.get_mut(next) {
            Some(n) => n.prev_sibling = prev,
            None => self.set_link(parent, |n| n.last_child = prev),
        }

        self.set_link(id, |node| {
            node.parent = NodeId::NONE;
            node.prev_sibling = NodeId::NONE;
            node.next_sibling = NodeId::NONE;
        });
        Ok(())
    }

    fn set_link(&mut self, id: NodeId, update: impl FnOnce(&mut Node)) {
        if let Some(node) = self.get_mut(id) {
            update(node);
        }
    }

    /// Detach a node and free it together with all of its descendants.
    /// Their IDs become invalid and may be reused. Returns how many
    /// nodes were freed.
    pub fn remove_subtree(&mut self, id: NodeId) -> DomResult<usize> {
        if id == NodeId::ROOT {
            return Err(DomError::InvalidNodeType(id));
        }
        self.detach(id)?;

        let doomed: Vec<NodeId> = std::iter::once(id).chain(self.descendants(id)).collect();
        for &node in &doomed {
            self.nodes[node.0 as usize] = None;
            self.free_list.push(node.0);
        }
        tracing::trace!("Freed {} nodes under {:?}", doomed.len(), id);
        Ok(doomed.len())
    }

    /// Clone a node (and its subtree when `deep`). Data, classes,
    /// attributes, style and geometry are copied; listeners are not.
    /// The clone starts detached.
    pub fn clone_node(&mut self, id: NodeId, deep: bool) -> DomResult<NodeId> {
        let copy = self.get(id).ok_or(DomError::NotFound(id))?.detached_copy();
        let clone = self.push(copy);
        if deep {
            let children: Vec<NodeId> = self.children(id).collect();
            for child in children {
                let child_clone = self.clone_node(child, true)?;
                self.append_child(clone, child_clone)?;
            }
        }
        tracing::trace!("Cloned {:?} into {:?} (deep: {})", id, clone, deep);
        Ok(clone)
    }

    // --- traversal --------------------------------------------------------

    /// Parent of a node (None if detached or the document)
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_valid())
    }

    /// Direct children in order
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let first = self.get(id).map_or(NodeId::NONE, |n| n.first_child);
        std::iter::successors(Some(first).filter(|c| c.is_valid()), move |&c| {
            self.get(c).map(|n| n.next_sibling).filter(|s| s.is_valid())
        })
    }

    /// Strict ancestors, nearest first
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
    }

    /// Strict descendants in document (pre-)order
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).collect();
        stack.reverse();
        Descendants { tree: self, stack }
    }

    /// Check whether a node is reachable from the document node
    pub fn is_attached(&self, id: NodeId) -> bool {
        id == NodeId::ROOT || self.ancestors(id).any(|a| a == NodeId::ROOT)
    }

    /// Text content of a subtree
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(text) = self.get(id).and_then(Node::as_text) {
            out.push_str(text);
        }
        for d in self.descendants(id) {
            if let Some(text) = self.get(d).and_then(Node::as_text) {
                out.push_str(text);
            }
        }
        out
    }

    // --- element state ----------------------------------------------------

    pub fn get_attr(&self, id: NodeId, name: &str) -> Option<String> {
        self.element(id)?.get_attr(name)
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.element_mut(id)?.set_attr(name, value);
        Ok(())
    }

    /// Read a `data-*` value by kebab-case or camelCase key
    pub fn data(&self, id: NodeId, key: &str) -> Option<&str> {
        self.element(id)?.dataset.get(key)
    }

    pub fn set_data(&mut self, id: NodeId, key: &str, value: &str) -> DomResult<()> {
        self.element_mut(id)?.dataset.set(key, value);
        Ok(())
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.classes.contains(class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> DomResult<()> {
        self.element_mut(id)?.classes.add(class);
        Ok(())
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) -> DomResult<()> {
        self.element_mut(id)?.classes.remove(class);
        Ok(())
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.element(id)?.get_style(property)
    }

    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) -> DomResult<()> {
        self.element_mut(id)?.set_style(property, value);
        Ok(())
    }

    // --- geometry ---------------------------------------------------------

    pub fn set_geometry(&mut self, id: NodeId, geometry: ElementGeometry) -> DomResult<()> {
        self.element_mut(id)?.geometry = geometry;
        Ok(())
    }

    /// `(left, top)` in document coordinates: parent-relative offsets
    /// are summed up the ancestor chain.
    pub fn document_offset(&self, id: NodeId) -> DomResult<(f64, f64)> {
        let geometry = self.element_ref(id)?.geometry;
        let (mut x, mut y) = (geometry.offset_left, geometry.offset_top);
        for ancestor in self.ancestors(id) {
            if let Some(elem) = self.element(ancestor) {
                x += elem.geometry.offset_left;
                y += elem.geometry.offset_top;
            }
        }
        Ok((x, y))
    }

    /// Rendered width
    pub fn width(&self, id: NodeId) -> DomResult<f64> {
        Ok(self.element_ref(id)?.geometry.width)
    }

    /// Border box in document coordinates
    pub fn document_rect(&self, id: NodeId) -> DomResult<DomRect> {
        let geometry = self.element_ref(id)?.geometry;
        let (x, y) = self.document_offset(id)?;
        Ok(DomRect::from_xywh(x, y, geometry.width, geometry.height))
    }

    // --- listeners --------------------------------------------------------

    pub fn add_listener(
        &mut self,
        id: NodeId,
        event_type: EventType,
        listener: ListenerId,
    ) -> DomResult<()> {
        self.element_mut(id)?.listeners.push(Listener { event_type, id: listener });
        Ok(())
    }

    /// Drop every listener of `event_type` on a node, returns how many
    pub fn remove_listeners(&mut self, id: NodeId, event_type: EventType) -> DomResult<usize> {
        let listeners = &mut self.element_mut(id)?.listeners;
        let before = listeners.len();
        listeners.retain(|l| l.event_type != event_type);
        Ok(before - listeners.len())
    }

    pub fn listeners(&self, id: NodeId, event_type: EventType) -> Vec<ListenerId> {
        self.element(id)
            .map(|e| e.listeners_for(event_type).collect())
            .unwrap_or_default()
    }

    /// Nodes an event on `target` visits: the target, then its ancestors
    pub fn propagation_path(&self, target: NodeId) -> Vec<NodeId> {
        std::iter::once(target).chain(self.ancestors(target)).collect()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Pre-order descendant iterator
pub struct Descendants<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        let start = self.stack.len();
        self.stack.extend(self.tree.children(id));
        self.stack[start..].reverse();
        Some(id)
    }
}
