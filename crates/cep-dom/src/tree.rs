//! DOM Tree (arena-based allocation)
//!
//! Node 0 is always the document node. Removed nodes stay in the arena,
//! detached, so ids handed out earlier never dangle.

use crate::{Dataset, DomError, DomResult, ElementData, Node, NodeData, NodeId};

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
        }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the arena (attached or not)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.push(Node::element(tag_name))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content))
    }

    fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.get(id).ok_or(DomError::NotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> DomResult<&mut Node> {
        self.get_mut(id).ok_or(DomError::NotFound(id))
    }

    /// Element data of a node
    pub fn element(&self, id: NodeId) -> DomResult<&ElementData> {
        self.node(id)?.as_element().ok_or(DomError::NotAnElement(id))
    }

    pub fn element_mut(&mut self, id: NodeId) -> DomResult<&mut ElementData> {
        self.node_mut(id)?
            .as_element_mut()
            .ok_or(DomError::NotAnElement(id))
    }

    /// Check whether `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = node;
        while current.is_valid() {
            if current == ancestor {
                return true;
            }
            current = self.get(current).map_or(NodeId::NONE, |n| n.parent);
        }
        false
    }

    /// Append a child, detaching it from any previous parent first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.node(parent)?;
        let child_node = self.node(child)?;
        if child_node.is_document() || self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        if matches!(self.node(parent)?.data, NodeData::Text(_) | NodeData::Comment(_)) {
            return Err(DomError::HierarchyRequest { parent, child });
        }

        let old_parent = child_node.parent;
        if old_parent.is_valid() {
            self.remove_child(old_parent, child)?;
        }

        let last = self.node(parent)?.last_child;
        if last.is_valid() {
            self.node_mut(last)?.next_sibling = child;
        } else {
            self.node_mut(parent)?.first_child = child;
        }
        let node = self.node_mut(child)?;
        node.parent = parent;
        node.prev_sibling = last;
        node.next_sibling = NodeId::NONE;
        self.node_mut(parent)?.last_child = child;

        Ok(child)
    }

    /// Detach a child from its parent
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        let (node_parent, prev, next) = {
            let node = self.node(child)?;
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        if node_parent != parent {
            return Err(DomError::NotAChild { parent, child });
        }

        if prev.is_valid() {
            self.node_mut(prev)?.next_sibling = next;
        } else {
            self.node_mut(parent)?.first_child = next;
        }
        if next.is_valid() {
            self.node_mut(next)?.prev_sibling = prev;
        } else {
            self.node_mut(parent)?.last_child = prev;
        }

        let node = self.node_mut(child)?;
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
        Ok(child)
    }

    /// Iterate over direct children
    pub fn children(&self, parent: NodeId) -> ChildIter<'_> {
        let current = self.get(parent).map_or(NodeId::NONE, |n| n.first_child);
        ChildIter { tree: self, current }
    }

    /// All descendants in document (pre-)order, excluding `root`
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).map(|(id, _)| id).collect();
        stack.reverse();

        while let Some(id) = stack.pop() {
            out.push(id);
            let mark = stack.len();
            stack.extend(self.children(id).map(|(child, _)| child));
            stack[mark..].reverse();
        }
        out
    }

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).ok()?.attrs.get(name)
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.element_mut(id)?.attrs.set(name, value);
        Ok(())
    }

    /// Returns whether the attribute was present
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<bool> {
        Ok(self.element_mut(id)?.attrs.remove(name).is_some())
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.get_attribute(id, name).is_some()
    }

    /// Snapshot of `data-*` attributes
    pub fn dataset(&self, id: NodeId) -> DomResult<Dataset> {
        Ok(Dataset::from_attributes(&self.element(id)?.attrs))
    }

    /// `element.dataset[key]`
    pub fn dataset_get(&self, id: NodeId, key: &str) -> Option<&str> {
        self.get_attribute(id, &Dataset::attribute_name(key))
    }

    /// `element.dataset[key] = value`
    pub fn dataset_set(&mut self, id: NodeId, key: &str, value: &str) -> DomResult<()> {
        self.set_attribute(id, &Dataset::attribute_name(key), value)
    }

    /// `delete element.dataset[key]`; returns whether the key was present
    pub fn dataset_delete(&mut self, id: NodeId, key: &str) -> DomResult<bool> {
        self.remove_attribute(id, &Dataset::attribute_name(key))
    }

    /// Concatenated descendant text
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.get(id).and_then(Node::as_text) {
            return text.to_string();
        }
        self.descendants(id)
            .into_iter()
            .filter_map(|d| self.get(d).and_then(Node::as_text))
            .collect()
    }

    /// Rendered text: like `text_content`, with `<br>` producing a newline
    pub fn inner_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        for d in self.descendants(id) {
            let Some(node) = self.get(d) else { continue };
            match &node.data {
                NodeData::Text(text) => out.push_str(text),
                NodeData::Element(elem) if elem.tag_name == "br" => out.push('\n'),
                _ => {}
            }
        }
        out
    }

    /// Replace all children with a single text node (none for empty text)
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> DomResult<()> {
        let children: Vec<NodeId> = self.children(id).map(|(child, _)| child).collect();
        for child in children {
            self.remove_child(id, child)?;
        }
        if !text.is_empty() {
            let node = self.create_text(text);
            self.append_child(id, node)?;
        }
        Ok(())
    }

    /// `contenteditable` state, inherited from the nearest ancestor that sets it
    pub fn is_content_editable(&self, id: NodeId) -> bool {
        let mut current = id;
        while current.is_valid() {
            if let Some(value) = self.get_attribute(current, "contenteditable") {
                return !value.eq_ignore_ascii_case("false");
            }
            current = self.get(current).map_or(NodeId::NONE, |n| n.parent);
        }
        false
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a node's children
pub struct ChildIter<'a> {
    tree: &'a DomTree,
    current: NodeId,
}

impl<'a> Iterator for ChildIter<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current;
        let node = self.tree.get(id)?;
        self.current = node.next_sibling;
        Some((id, node))
    }
}
