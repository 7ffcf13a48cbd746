//! Process-wide entry point
//!
//! One controller per UI thread, living as long as the thread. Its
//! configuration accumulates across calls like any other controller's.

use std::cell::RefCell;

use cep_dom::{Document, NodeId};

use crate::{Config, PlaceholderController, Registration};

thread_local! {
    static CONTROLLER: RefCell<PlaceholderController> = RefCell::new(PlaceholderController::default());
}

/// Register placeholders on `doc` with the shared controller.
///
/// ```
/// use cep_dom::Document;
/// use cep_placeholder::{set_placeholder, ConfigOverrides};
///
/// let mut doc = Document::new();
/// set_placeholder(&mut doc, ());
/// set_placeholder(&mut doc, "#test");
/// set_placeholder(&mut doc, ("#test", ConfigOverrides::new().inactive_event("focus")));
/// ```
///
/// A call made from a notification listener while another registration is
/// running is refused with a warning and binds nothing.
pub fn set_placeholder(doc: &mut Document, registration: impl Into<Registration>) -> Vec<NodeId> {
    let registration = registration.into();
    CONTROLLER.with(|controller| match controller.try_borrow_mut() {
        Ok(mut controller) => controller.register(doc, registration),
        Err(_) => {
            tracing::warn!("Nested set_placeholder call ignored");
            Vec::new()
        }
    })
}

/// Snapshot of the shared controller's configuration
pub fn global_config() -> Config {
    CONTROLLER.with(|controller| match controller.try_borrow() {
        Ok(controller) => controller.config(),
        Err(_) => Config::default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigOverrides;

    #[test]
    fn test_overrides_accumulate_across_calls() {
        let mut doc = Document::new();
        set_placeholder(&mut doc, ConfigOverrides::new().is_trigger(false));
        set_placeholder(&mut doc, ConfigOverrides::new().active_event("focusout"));

        let config = global_config();
        assert!(!config.is_trigger);
        assert_eq!(config.active_event, "focusout");
    }

    #[test]
    fn test_nested_call_is_refused() {
        let mut doc = Document::new();
        let div = doc.append_element(doc.body(), "div").unwrap();
        doc.tree_mut().set_attribute(div, "data-placeholder", "x").unwrap();
        doc.on(NodeId::ROOT, "placeholderactive", |doc, _| {
            assert!(set_placeholder(doc, ()).is_empty());
        })
        .unwrap();

        assert_eq!(set_placeholder(&mut doc, ()), vec![div]);
    }
}
