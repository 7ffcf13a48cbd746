//! Placeholder Controller
//!
//! Binds the show/hide handlers to target elements. Each controller owns its
//! configuration; handlers share it through an `Rc<RefCell<_>>`, so a later
//! merge (e.g. `isTrigger: false`) also applies to elements bound earlier.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use cep_dom::{Document, DocumentId, DomEvent, ListenerId, NodeId};
use serde_json::Value;

use crate::handlers::{self, ACTIVE_KEY};
use crate::namespace::ns;
use crate::{style, Config, ConfigOverrides};

/// Arguments of a registration call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registration {
    /// Target selector; the configured default when absent
    pub selector: Option<String>,
    pub overrides: ConfigOverrides,
}

impl Registration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Positional arguments as they arrive from a dynamic caller: a leading
    /// string is the selector and the next value the options; otherwise the
    /// second value is the options when present and non-null, else the first.
    pub fn from_args(args: &[Value]) -> Self {
        let first = args.first().unwrap_or(&Value::Null);
        let second = args.get(1).unwrap_or(&Value::Null);

        match first {
            Value::String(selector) => Self {
                selector: Some(selector.clone()),
                overrides: ConfigOverrides::from_value(second),
            },
            _ if !second.is_null() => Self {
                selector: None,
                overrides: ConfigOverrides::from_value(second),
            },
            _ => Self {
                selector: None,
                overrides: ConfigOverrides::from_value(first),
            },
        }
    }
}

impl From<&str> for Registration {
    fn from(selector: &str) -> Self {
        Self {
            selector: Some(selector.to_string()),
            overrides: ConfigOverrides::default(),
        }
    }
}

impl From<String> for Registration {
    fn from(selector: String) -> Self {
        Self {
            selector: Some(selector),
            overrides: ConfigOverrides::default(),
        }
    }
}

impl From<ConfigOverrides> for Registration {
    fn from(overrides: ConfigOverrides) -> Self {
        Self {
            selector: None,
            overrides,
        }
    }
}

impl From<(&str, ConfigOverrides)> for Registration {
    fn from((selector, overrides): (&str, ConfigOverrides)) -> Self {
        Self {
            selector: Some(selector.to_string()),
            overrides,
        }
    }
}

impl From<()> for Registration {
    fn from(_: ()) -> Self {
        Self::default()
    }
}

/// Listener handles attached to one document
#[derive(Debug)]
struct DocumentBindings {
    alive: Weak<()>,
    elements: HashMap<NodeId, Vec<ListenerId>>,
}

/// Shows `data-placeholder` text on empty elements
#[derive(Debug, Default)]
pub struct PlaceholderController {
    config: Rc<RefCell<Config>>,
    /// Handles are only valid in the document that issued them
    bindings: HashMap<DocumentId, DocumentBindings>,
}

impl PlaceholderController {
    pub fn new(config: Config) -> Self {
        Self {
            config: Rc::new(RefCell::new(config)),
            bindings: HashMap::new(),
        }
    }

    /// Snapshot of the effective configuration
    pub fn config(&self) -> Config {
        self.config.borrow().clone()
    }

    /// Merge overrides into the configuration (cumulative)
    pub fn configure(&mut self, overrides: &ConfigOverrides) {
        if !overrides.is_empty() {
            self.config.borrow_mut().merge(overrides);
            tracing::debug!("Placeholder config updated: {:?}", overrides);
        }
    }

    /// Elements of `doc` this controller currently has listeners on
    pub fn bound_elements(&self, doc: &Document) -> Vec<NodeId> {
        let mut elements: Vec<NodeId> = self
            .bindings
            .get(&doc.id())
            .map(|b| b.elements.keys().copied().collect())
            .unwrap_or_default();
        elements.sort();
        elements
    }

    pub fn is_bound(&self, doc: &Document, element: NodeId) -> bool {
        self.bindings
            .get(&doc.id())
            .is_some_and(|b| b.elements.contains_key(&element))
    }

    /// Number of documents with live bindings
    pub fn tracked_documents(&self) -> usize {
        self.bindings.len()
    }

    /// Merge the overrides, resolve the selector and bind every element it
    /// matches right now. Never fails: a bad selector binds nothing.
    pub fn register(&mut self, doc: &mut Document, registration: impl Into<Registration>) -> Vec<NodeId> {
        let Registration { selector, overrides } = registration.into();
        self.configure(&overrides);

        let selector = selector.unwrap_or_else(|| self.config.borrow().default_selector.clone());
        let elements = match doc.query_selector_all(&selector) {
            Ok(elements) => elements,
            Err(err) => {
                tracing::warn!("Placeholder registration ignored: {}", err);
                return Vec::new();
            }
        };

        if elements.is_empty() {
            tracing::debug!("No elements match '{}'", selector);
            return elements;
        }
        self.bind(doc, &elements);
        elements
    }

    /// Bind the handlers to each element, replacing earlier bindings, and
    /// seed each element's initial state. Returns `elements` unchanged.
    pub fn bind<'a>(&mut self, doc: &mut Document, elements: &'a [NodeId]) -> &'a [NodeId] {
        self.prune(doc);
        let (inactive, active, mode) = {
            let config = self.config.borrow();
            (config.inactive_event_names(), config.active_event.clone(), config.style_mode)
        };

        for &element in elements {
            self.detach(doc, element);

            let mut handles = Vec::new();
            let config = Rc::clone(&self.config);
            match doc.on(element, &ns(&inactive), move |doc: &mut Document, event: &mut DomEvent| {
                let trigger = config.borrow().is_trigger;
                handlers::deactivate(doc, event.current_target, trigger);
            }) {
                Ok(ids) => handles.extend(ids),
                Err(err) => {
                    tracing::warn!("Cannot bind placeholder to {}: {}", element, err);
                    continue;
                }
            }

            let config = Rc::clone(&self.config);
            match doc.on(element, &ns(&active), move |doc: &mut Document, event: &mut DomEvent| {
                let trigger = config.borrow().is_trigger;
                handlers::activate(doc, event.current_target, trigger);
            }) {
                Ok(ids) => handles.extend(ids),
                Err(err) => tracing::warn!("Cannot bind placeholder to {}: {}", element, err),
            }

            if !doc.tree().is_content_editable(element) {
                tracing::debug!("Placeholder bound to non-editable element {}", element);
            }
            tracing::debug!("Bound {} placeholder listeners to {}", handles.len(), element);
            self.document_bindings(doc).insert(element, handles);
        }

        style::apply(mode, elements);

        for &element in elements {
            if self.is_bound(doc, element) {
                let trigger = self.config.borrow().is_trigger;
                handlers::activate(doc, element, trigger);
            }
        }
        elements
    }

    /// Remove this controller's listeners and the marker from `elements`
    pub fn unbind(&mut self, doc: &mut Document, elements: &[NodeId]) {
        for &element in elements {
            self.detach(doc, element);
            // Non-element targets have no marker to clear.
            let _ = doc.tree_mut().dataset_delete(element, ACTIVE_KEY);
        }
        self.prune(doc);
    }

    fn document_bindings(&mut self, doc: &Document) -> &mut HashMap<NodeId, Vec<ListenerId>> {
        &mut self
            .bindings
            .entry(doc.id())
            .or_insert_with(|| DocumentBindings {
                alive: doc.liveness(),
                elements: HashMap::new(),
            })
            .elements
    }

    /// Forget dropped documents and elements no longer in `doc`'s tree
    fn prune(&mut self, doc: &Document) {
        self.bindings.retain(|_, b| b.alive.strong_count() > 0);
        if let Some(current) = self.bindings.get_mut(&doc.id()) {
            current.elements.retain(|&element, _| doc.is_connected(element));
            if current.elements.is_empty() {
                self.bindings.remove(&doc.id());
            }
        }
    }

    /// Drop our handles, then anything else left in the namespace
    fn detach(&mut self, doc: &mut Document, element: NodeId) {
        let mut removed = 0;
        let handles = self
            .bindings
            .get_mut(&doc.id())
            .and_then(|b| b.elements.remove(&element));
        if let Some(handles) = handles {
            removed += handles
                .into_iter()
                .filter(|&id| doc.remove_event_listener(element, id))
                .count();
        }
        removed += doc.off(element, &ns(""));
        if removed > 0 {
            tracing::debug!("Removed {} placeholder listeners from {}", removed, element);
        }
    }
}
