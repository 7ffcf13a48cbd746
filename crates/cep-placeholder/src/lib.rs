//! cep Placeholder
//!
//! Shows `data-placeholder` text on empty contenteditable elements and hides
//! it once the user types.
//!
//! The controller keeps a `data-placeholderactive="true"` marker on each
//! target while it is empty; a page stylesheet renders the text:
//!
//! ```css
//! [data-placeholder][data-placeholderactive=true]::before {
//!   content: attr(data-placeholder);
//!   opacity: 0.5;
//! }
//! ```
//!
//! # Example
//! ```
//! use cep_dom::Document;
//! use cep_placeholder::{is_active, PlaceholderController};
//!
//! let mut doc = Document::new();
//! let div = doc.append_element(doc.body(), "div").unwrap();
//! doc.tree_mut().set_attribute(div, "data-placeholder", "Type here").unwrap();
//!
//! let mut controller = PlaceholderController::default();
//! controller.register(&mut doc, ());
//! assert!(is_active(&doc, div));
//!
//! doc.tree_mut().set_text_content(div, "x").unwrap();
//! doc.dispatch(div, "input").unwrap();
//! assert!(!is_active(&doc, div));
//! ```

mod config;
mod controller;
mod global;
pub mod handlers;
pub mod namespace;
pub mod style;

pub use config::{Config, ConfigError, ConfigOverrides};
pub use controller::{PlaceholderController, Registration};
pub use global::{global_config, set_placeholder};
pub use handlers::{is_active, placeholder_text, PlaceholderEvent};
pub use namespace::{ns, ns_tokens, NAMESPACE};
pub use style::{StyleMode, StyleSupport};
