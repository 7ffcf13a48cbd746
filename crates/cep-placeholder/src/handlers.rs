//! Placeholder state handlers
//!
//! Both handlers are total: DOM errors (e.g. a non-element target) are
//! logged and reported as "no change".

use cep_dom::{Document, NodeId};

/// Dataset key holding the author's placeholder text
pub const PLACEHOLDER_KEY: &str = "placeholder";

/// Dataset key of the marker set while the placeholder shows
pub const ACTIVE_KEY: &str = "placeholderactive";

/// Notifications fired on the document when `is_trigger` is set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderEvent {
    Active,
    Inactive,
}

impl PlaceholderEvent {
    pub fn name(self) -> &'static str {
        match self {
            PlaceholderEvent::Active => "placeholderactive",
            PlaceholderEvent::Inactive => "placeholderinactive",
        }
    }

    fn emit(self, doc: &mut Document, trigger: bool) {
        if trigger {
            doc.trigger(self.name());
        }
    }
}

/// Hide the placeholder. Always notifies (when `trigger`), even if the
/// marker was already absent. Returns whether a marker was removed.
pub fn deactivate(doc: &mut Document, element: NodeId, trigger: bool) -> bool {
    let removed = match doc.tree_mut().dataset_delete(element, ACTIVE_KEY) {
        Ok(removed) => removed,
        Err(err) => {
            tracing::debug!("Placeholder deactivate skipped: {}", err);
            return false;
        }
    };
    if removed {
        tracing::debug!("Placeholder hidden on {}", element);
    }
    PlaceholderEvent::Inactive.emit(doc, trigger);
    removed
}

/// Show the placeholder if the element has no visible text.
/// Returns whether the marker was set.
pub fn activate(doc: &mut Document, element: NodeId, trigger: bool) -> bool {
    if !doc.tree().inner_text(element).is_empty() {
        return false;
    }
    if let Err(err) = doc.tree_mut().dataset_set(element, ACTIVE_KEY, "true") {
        tracing::debug!("Placeholder activate skipped: {}", err);
        return false;
    }
    tracing::debug!("Placeholder shown on {}", element);
    PlaceholderEvent::Active.emit(doc, trigger);
    true
}

/// Whether the marker is currently set
pub fn is_active(doc: &Document, element: NodeId) -> bool {
    doc.tree().dataset_get(element, ACTIVE_KEY) == Some("true")
}

/// The author supplied placeholder text, if any
pub fn placeholder_text(doc: &Document, element: NodeId) -> Option<&str> {
    doc.tree().dataset_get(element, PLACEHOLDER_KEY)
}
