//! Edge case tests for cep-dom

use std::cell::Cell;
use std::rc::Rc;

use cep_dom::{Document, DomError, EventType, NodeId};

#[test]
fn test_empty_document() {
    let doc = Document::empty();
    assert_eq!(doc.body(), NodeId::NONE);
    assert!(doc.query_selector_all("div").unwrap().is_empty());
    assert_eq!(doc.query_selector("*").unwrap(), None);
}

#[test]
fn test_cycle_is_rejected() {
    let mut doc = Document::new();
    let outer = doc.append_element(doc.body(), "div").unwrap();
    let inner = doc.append_element(outer, "div").unwrap();

    let err = doc.tree_mut().append_child(inner, outer).unwrap_err();
    assert!(matches!(err, DomError::HierarchyRequest { .. }));
    let err = doc.tree_mut().append_child(outer, outer).unwrap_err();
    assert!(matches!(err, DomError::HierarchyRequest { .. }));
}

#[test]
fn test_text_nodes_cannot_have_children() {
    let mut doc = Document::new();
    let tree = doc.tree_mut();
    let text = tree.create_text("a");
    let span = tree.create_element("span");
    assert!(tree.append_child(text, span).is_err());
}

#[test]
fn test_remove_non_child() {
    let mut doc = Document::new();
    let a = doc.append_element(doc.body(), "a").unwrap();
    let b = doc.append_element(doc.body(), "b").unwrap();
    let err = doc.tree_mut().remove_child(a, b).unwrap_err();
    assert!(matches!(err, DomError::NotAChild { .. }));
}

#[test]
fn test_attribute_on_text_node() {
    let mut doc = Document::new();
    let text = doc.tree_mut().create_text("a");
    let err = doc.tree_mut().set_attribute(text, "id", "x").unwrap_err();
    assert_eq!(err, DomError::NotAnElement(text));
    assert_eq!(doc.tree().get_attribute(text, "id"), None);
}

#[test]
fn test_unknown_node() {
    let mut doc = Document::new();
    let missing = NodeId::NONE;
    assert!(doc.dispatch(missing, "input").is_err());
    assert!(doc.on(missing, "input", |_, _| {}).is_err());
    assert_eq!(doc.off(missing, "input"), 0);
    assert_eq!(doc.tree().inner_text(missing), "");
}

#[test]
fn test_detached_element_is_not_queried() {
    let mut doc = Document::new();
    let div = doc.tree_mut().create_element("div");
    doc.tree_mut().set_attribute(div, "data-placeholder", "x").unwrap();
    assert!(doc.query_selector_all("[data-placeholder]").unwrap().is_empty());
}

#[test]
fn test_on_skips_typeless_names() {
    let mut doc = Document::new();
    let div = doc.append_element(doc.body(), "div").unwrap();
    let ids = doc.on(div, ".only-namespace   input.ns", |_, _| {}).unwrap();
    assert_eq!(ids.len(), 1);
    assert_eq!(doc.listeners().count_in_namespace(div, "ns"), 1);
}

#[test]
fn test_off_requires_all_namespaces() {
    let mut doc = Document::new();
    let div = doc.append_element(doc.body(), "div").unwrap();
    doc.on(div, "input.a.b", |_, _| {}).unwrap();

    assert_eq!(doc.off(div, "input.a.c"), 0);
    assert_eq!(doc.off(div, ".b"), 1);
}

#[test]
fn test_listener_removed_during_dispatch_still_runs_once() {
    let mut doc = Document::new();
    let div = doc.append_element(doc.body(), "div").unwrap();
    let hits = Rc::new(Cell::new(0));

    let seen = hits.clone();
    doc.on(div, "input.first", move |doc, event| {
        seen.set(seen.get() + 1);
        doc.off(event.current_target, ".second");
    })
    .unwrap();
    let seen = hits.clone();
    doc.on(div, "input.second", move |_, _| seen.set(seen.get() + 1))
        .unwrap();

    assert_eq!(doc.dispatch(div, "input").unwrap(), 2);
    assert_eq!(hits.get(), 2);
    assert_eq!(doc.dispatch(div, "input").unwrap(), 1);
}

#[test]
fn test_listener_added_during_dispatch_waits() {
    let mut doc = Document::new();
    let div = doc.append_element(doc.body(), "div").unwrap();
    let hits = Rc::new(Cell::new(0));

    let seen = hits.clone();
    doc.on(div, "input", move |doc, event| {
        let inner = seen.clone();
        doc.on(event.current_target, "input", move |_, _| inner.set(inner.get() + 1))
            .unwrap();
    })
    .unwrap();

    doc.dispatch(div, "input").unwrap();
    assert_eq!(hits.get(), 0);
    assert_eq!(doc.listeners().count(div, &EventType::Input), 2);
}

#[test]
fn test_custom_event_names() {
    let custom = EventType::from_name("placeholderactive");
    assert_eq!(custom, EventType::Custom("placeholderactive".to_string()));
    assert_eq!(custom.to_string(), "placeholderactive");
    assert!(custom.bubbles());
    assert_eq!(EventType::from_name("blur"), EventType::Blur);
}

#[test]
fn test_node_id_display() {
    assert_eq!(NodeId::ROOT.to_string(), "#0");
    assert_eq!(NodeId::NONE.to_string(), "#none");
}
