//! cep DOM - Host Document Object Model
//!
//! Arena-backed DOM tree with just enough surface for the placeholder
//! controller: attributes, `data-*` access, text extraction, a selector
//! subset and namespaced event listeners.

mod attributes;
mod dataset;
mod document;
mod error;
mod events;
mod node;
mod selector;
mod tree;

pub use attributes::{Attr, NamedNodeMap};
pub use dataset::Dataset;
pub use document::{Document, DocumentId, ListenerFn};
pub use error::{DomError, DomResult};
pub use events::{DomEvent, EventListenerRegistry, EventName, EventType, ListenerId};
pub use node::{ElementData, Node, NodeData};
pub use selector::{
    AttributeMatcher, AttributeSelector, Combinator, ComplexSelector, CompoundSelector,
    SelectorList, SimpleSelector,
};
pub use tree::{ChildIter, DomTree};

use std::fmt;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Document node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Invalid/null node
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this is a real node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "#{}", self.0)
        } else {
            f.write_str("#none")
        }
    }
}
