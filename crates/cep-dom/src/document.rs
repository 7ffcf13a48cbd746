//! Document - High-level document API
//!
//! Owns the tree and the listener registry, and dispatches events.
//! Dispatch is synchronous: listener lists are snapshotted per node before
//! they run, so a listener may freely add/remove listeners or fire nested
//! events.

use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{
    DomError, DomEvent, DomResult, DomTree, EventListenerRegistry, EventName, EventType,
    ListenerId, NodeId, SelectorList,
};

/// Listener callback. Receives the document and the event, whose
/// `current_target` is the node the listener was attached to.
pub type ListenerFn = Rc<dyn Fn(&mut Document, &mut DomEvent)>;

static NEXT_DOCUMENT_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique document identity. `NodeId`s and `ListenerId`s are only
/// meaningful together with the document they came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(u64);

impl DocumentId {
    fn next() -> Self {
        Self(NEXT_DOCUMENT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// HTML Document
#[derive(Debug)]
pub struct Document {
    id: DocumentId,
    /// Dropped with the document; see `Document::liveness`
    alive: Rc<()>,
    tree: DomTree,
    listeners: EventListenerRegistry,
    html_element: NodeId,
    body_element: NodeId,
}

impl Document {
    /// Create a document with `<html><body></body></html>`
    pub fn new() -> Self {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        let body = tree.create_element("body");
        let root = tree.root();
        // Fresh nodes under the document node cannot violate hierarchy rules.
        let _ = tree.append_child(root, html);
        let _ = tree.append_child(html, body);

        Self {
            id: DocumentId::next(),
            alive: Rc::new(()),
            tree,
            listeners: EventListenerRegistry::new(),
            html_element: html,
            body_element: body,
        }
    }

    /// Document without any elements
    pub fn empty() -> Self {
        Self {
            id: DocumentId::next(),
            alive: Rc::new(()),
            tree: DomTree::new(),
            listeners: EventListenerRegistry::new(),
            html_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// Handle that stops upgrading once the document is dropped
    pub fn liveness(&self) -> Weak<()> {
        Rc::downgrade(&self.alive)
    }

    /// Whether `node` is in this document's tree
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.tree.is_inclusive_ancestor(self.tree.root(), node)
    }

    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    pub fn body(&self) -> NodeId {
        self.body_element
    }

    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    pub fn listeners(&self) -> &EventListenerRegistry {
        &self.listeners
    }

    /// Create an element and append it to `parent`
    pub fn append_element(&mut self, parent: NodeId, tag_name: &str) -> DomResult<NodeId> {
        let id = self.tree.create_element(tag_name);
        self.tree.append_child(parent, id)
    }

    /// All elements matching `selector`, in document order
    pub fn query_selector_all(&self, selector: &str) -> DomResult<Vec<NodeId>> {
        Ok(SelectorList::parse(selector)?.query_all(&self.tree, self.tree.root()))
    }

    /// First element matching `selector`
    pub fn query_selector(&self, selector: &str) -> DomResult<Option<NodeId>> {
        Ok(SelectorList::parse(selector)?.query_first(&self.tree, self.tree.root()))
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .find(|&node| self.tree.element(node).is_ok_and(|e| e.id() == Some(id)))
    }

    /// Attach a single listener
    pub fn add_event_listener(
        &mut self,
        target: NodeId,
        event_type: EventType,
        namespaces: Vec<String>,
        callback: ListenerFn,
    ) -> DomResult<ListenerId> {
        self.tree.get(target).ok_or(DomError::NotFound(target))?;
        Ok(self
            .listeners
            .add_listener(target, event_type, namespaces, callback))
    }

    /// Detach a listener by handle
    pub fn remove_event_listener(&mut self, target: NodeId, id: ListenerId) -> bool {
        self.listeners.remove_listener(target, id)
    }

    /// Attach `callback` for each space separated `type.namespace` name.
    /// Names without a type are skipped.
    pub fn on<F>(&mut self, target: NodeId, events: &str, callback: F) -> DomResult<Vec<ListenerId>>
    where
        F: Fn(&mut Document, &mut DomEvent) + 'static,
    {
        let callback: ListenerFn = Rc::new(callback);
        let mut ids = Vec::new();
        for name in EventName::parse_list(events) {
            let Some(event_type) = name.event_type else {
                tracing::debug!("Ignoring event name without a type on {}", target);
                continue;
            };
            ids.push(self.add_event_listener(target, event_type, name.namespaces, callback.clone())?);
        }
        Ok(ids)
    }

    /// Detach listeners by space separated names: `input`, `input.ns` or
    /// `.ns`. Returns how many were removed.
    pub fn off(&mut self, target: NodeId, events: &str) -> usize {
        EventName::parse_list(events)
            .iter()
            .map(|name| self.listeners.remove_matching(target, name))
            .sum()
    }

    /// Fire an event at `target`, bubbling through ancestors for bubbling
    /// types. Returns the number of listeners invoked.
    pub fn dispatch(&mut self, target: NodeId, event: &str) -> DomResult<usize> {
        self.tree.get(target).ok_or(DomError::NotFound(target))?;
        let mut event = DomEvent::new(EventType::from_name(event), target);
        let mut invoked = 0;
        let mut current = target;

        while current.is_valid() {
            event.current_target = current;
            for callback in self.listeners.callbacks(current, &event.event_type) {
                callback(self, &mut event);
                invoked += 1;
            }
            if !event.bubbles || event.is_propagation_stopped() {
                break;
            }
            current = self.tree.get(current).map_or(NodeId::NONE, |n| n.parent);
        }

        tracing::trace!("Dispatched {} to {} ({} listeners)", event.event_type, target, invoked);
        Ok(invoked)
    }

    /// Fire an event on the document node itself
    pub fn trigger(&mut self, event: &str) -> usize {
        let root = self.tree.root();
        self.dispatch(root, event).unwrap_or_default()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    fn counter(doc: &mut Document, target: NodeId, events: &str) -> Rc<Cell<usize>> {
        let hits = Rc::new(Cell::new(0));
        let seen = hits.clone();
        doc.on(target, events, move |_, _| seen.set(seen.get() + 1))
            .unwrap();
        hits
    }

    #[test]
    fn test_new_document_structure() {
        let doc = Document::new();
        assert!(doc.body().is_valid());
        assert_eq!(doc.tree().get(doc.body()).unwrap().parent, doc.document_element());
    }

    #[test]
    fn test_on_off_namespaces() {
        let mut doc = Document::new();
        let div = doc.append_element(doc.body(), "div").unwrap();
        let mine = counter(&mut doc, div, "input.mine keydown.mine");
        let other = counter(&mut doc, div, "input");

        doc.dispatch(div, "input").unwrap();
        assert_eq!((mine.get(), other.get()), (1, 1));

        assert_eq!(doc.off(div, ".mine"), 2);
        doc.dispatch(div, "input").unwrap();
        doc.dispatch(div, "keydown").unwrap();
        assert_eq!((mine.get(), other.get()), (1, 2));
    }

    #[test]
    fn test_bubbling_and_current_target() {
        let mut doc = Document::new();
        let div = doc.append_element(doc.body(), "div").unwrap();
        let span = doc.append_element(div, "span").unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        doc.on(div, "input blur", move |_, event| {
            log.borrow_mut().push((event.target, event.current_target))
        })
        .unwrap();

        assert_eq!(doc.dispatch(span, "input").unwrap(), 1);
        assert_eq!(doc.dispatch(span, "blur").unwrap(), 0);
        assert_eq!(*seen.borrow(), vec![(span, div)]);
    }

    #[test]
    fn test_stop_propagation() {
        let mut doc = Document::new();
        let div = doc.append_element(doc.body(), "div").unwrap();
        let span = doc.append_element(div, "span").unwrap();
        doc.on(span, "input", |_, event| event.stop_propagation())
            .unwrap();
        let outer = counter(&mut doc, div, "input");

        doc.dispatch(span, "input").unwrap();
        assert_eq!(outer.get(), 0);
    }

    #[test]
    fn test_listener_may_remove_itself() {
        let mut doc = Document::new();
        let div = doc.append_element(doc.body(), "div").unwrap();
        let hits = Rc::new(Cell::new(0));
        let seen = hits.clone();
        doc.on(div, "click.once", move |doc, event| {
            seen.set(seen.get() + 1);
            doc.off(event.current_target, ".once");
        })
        .unwrap();

        doc.dispatch(div, "click").unwrap();
        doc.dispatch(div, "click").unwrap();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_trigger_on_document() {
        let mut doc = Document::new();
        let hits = counter(&mut doc, NodeId::ROOT, "placeholderactive");
        assert_eq!(doc.trigger("placeholderactive"), 1);
        assert_eq!(doc.trigger("other"), 0);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_query_selector_all() {
        let mut doc = Document::new();
        let a = doc.append_element(doc.body(), "div").unwrap();
        let b = doc.append_element(doc.body(), "div").unwrap();
        doc.tree_mut().set_attribute(a, "data-placeholder", "x").unwrap();
        doc.tree_mut().set_attribute(b, "id", "test").unwrap();

        assert_eq!(doc.query_selector_all("[data-placeholder]").unwrap(), vec![a]);
        assert_eq!(doc.query_selector("#test").unwrap(), Some(b));
        assert_eq!(doc.get_element_by_id("test"), Some(b));
        assert!(doc.query_selector_all("div:first-child").is_err());
    }

    #[test]
    fn test_document_identity() {
        let a = Document::new();
        let b = Document::new();
        assert_ne!(a.id(), b.id());

        let alive = b.liveness();
        assert!(alive.upgrade().is_some());
        drop(b);
        assert!(alive.upgrade().is_none());
    }

    #[test]
    fn test_is_connected() {
        let mut doc = Document::new();
        let div = doc.append_element(doc.body(), "div").unwrap();
        let loose = doc.tree_mut().create_element("p");
        assert!(doc.is_connected(div));
        assert!(!doc.is_connected(loose));

        let body = doc.body();
        doc.tree_mut().remove_child(body, div).unwrap();
        assert!(!doc.is_connected(div));
    }

    #[test]
    fn test_dispatch_unknown_node() {
        let mut doc = Document::empty();
        assert_eq!(
            doc.dispatch(NodeId(42), "input"),
            Err(DomError::NotFound(NodeId(42)))
        );
    }
}
