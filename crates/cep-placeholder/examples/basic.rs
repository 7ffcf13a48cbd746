//! Basic placeholder example
//!
//! Builds a small page with two editors, registers the placeholder
//! controller and simulates a user typing, deleting and leaving the field.
//!
//! Run with `RUST_LOG=debug` to see the controller's log output.

use cep_dom::{Document, NodeId};
use cep_placeholder::{is_active, placeholder_text, set_placeholder, style, ConfigOverrides};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut doc = Document::new();
    let body = doc.body();
    let title = editor(&mut doc, body, "title", "Title");
    let notes = editor(&mut doc, body, "notes", "Write something...");

    for event in ["placeholderactive", "placeholderinactive"] {
        if let Err(err) = doc.on(NodeId::ROOT, event, move |_, _| println!("  <- {}", event)) {
            eprintln!("Cannot listen for {}: {}", event, err);
        }
    }

    println!("Add this rule to the page:\n  {}\n", style::recommended_stylesheet());

    println!("register()");
    let bound = set_placeholder(&mut doc, ConfigOverrides::new().active_event("blur"));
    println!("  bound {} elements", bound.len());
    show(&doc, &[title, notes]);

    println!("type 'Hi' into #title");
    doc.tree_mut().set_text_content(title, "Hi").ok();
    doc.dispatch(title, "input").ok();
    show(&doc, &[title, notes]);

    println!("delete everything and blur #title");
    doc.tree_mut().set_text_content(title, "").ok();
    doc.dispatch(title, "input").ok();
    doc.dispatch(title, "blur").ok();
    show(&doc, &[title, notes]);
}

fn editor(doc: &mut Document, parent: NodeId, id: &str, placeholder: &str) -> NodeId {
    let div = match doc.append_element(parent, "div") {
        Ok(div) => div,
        Err(err) => panic!("Cannot build page: {}", err),
    };
    let tree = doc.tree_mut();
    for (name, value) in [("id", id), ("contenteditable", "true"), ("data-placeholder", placeholder)] {
        tree.set_attribute(div, name, value).ok();
    }
    div
}

fn show(doc: &Document, elements: &[NodeId]) {
    for &element in elements {
        let text = doc.tree().inner_text(element);
        let shown = if is_active(doc, element) {
            placeholder_text(doc, element).unwrap_or("")
        } else {
            ""
        };
        println!("  {} text={:?} placeholder={:?}", element, text, shown);
    }
    println!();
}
