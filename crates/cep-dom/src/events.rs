//! DOM Events
//!
//! Event types, jQuery-style namespaced event names and the per-node
//! listener registry.

use std::collections::HashMap;
use std::fmt;

use crate::{ListenerFn, NodeId};

/// Event type identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    KeyDown,
    KeyUp,
    KeyPress,
    Input,
    BeforeInput,
    Change,
    Focus,
    Blur,
    FocusIn,
    FocusOut,
    Paste,
    Cut,
    CompositionStart,
    CompositionEnd,
    /// Any other name, e.g. `placeholderactive`
    Custom(String),
}

impl EventType {
    /// Parse an event name; unknown names become `Custom`
    pub fn from_name(name: &str) -> Self {
        match name {
            "click" => Self::Click,
            "keydown" => Self::KeyDown,
            "keyup" => Self::KeyUp,
            "keypress" => Self::KeyPress,
            "input" => Self::Input,
            "beforeinput" => Self::BeforeInput,
            "change" => Self::Change,
            "focus" => Self::Focus,
            "blur" => Self::Blur,
            "focusin" => Self::FocusIn,
            "focusout" => Self::FocusOut,
            "paste" => Self::Paste,
            "cut" => Self::Cut,
            "compositionstart" => Self::CompositionStart,
            "compositionend" => Self::CompositionEnd,
            other => Self::Custom(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Click => "click",
            Self::KeyDown => "keydown",
            Self::KeyUp => "keyup",
            Self::KeyPress => "keypress",
            Self::Input => "input",
            Self::BeforeInput => "beforeinput",
            Self::Change => "change",
            Self::Focus => "focus",
            Self::Blur => "blur",
            Self::FocusIn => "focusin",
            Self::FocusOut => "focusout",
            Self::Paste => "paste",
            Self::Cut => "cut",
            Self::CompositionStart => "compositionstart",
            Self::CompositionEnd => "compositionend",
            Self::Custom(name) => name,
        }
    }

    /// Check if this event type bubbles
    pub fn bubbles(&self) -> bool {
        !matches!(self, Self::Focus | Self::Blur)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `type.ns1.ns2` as accepted by `Document::on` / `Document::off`.
/// `.ns` alone has no type and addresses every type in that namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventName {
    pub event_type: Option<EventType>,
    pub namespaces: Vec<String>,
}

impl EventName {
    pub fn parse(token: &str) -> Self {
        let mut parts = token.split('.');
        let event_type = parts
            .next()
            .filter(|name| !name.is_empty())
            .map(EventType::from_name);
        let namespaces = parts
            .filter(|ns| !ns.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            event_type,
            namespaces,
        }
    }

    /// Parse a space separated list of names
    pub fn parse_list(names: &str) -> Vec<Self> {
        names.split_whitespace().map(Self::parse).collect()
    }
}

/// Handle returned when a listener is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Event being dispatched
#[derive(Debug, Clone)]
pub struct DomEvent {
    pub event_type: EventType,
    /// Node the event was fired on
    pub target: NodeId,
    /// Node whose listeners are currently running
    pub current_target: NodeId,
    pub bubbles: bool,
    propagation_stopped: bool,
}

impl DomEvent {
    pub fn new(event_type: EventType, target: NodeId) -> Self {
        Self {
            bubbles: event_type.bubbles(),
            event_type,
            target,
            current_target: target,
            propagation_stopped: false,
        }
    }

    /// Stop bubbling after the current node's listeners ran
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

#[derive(Clone)]
struct Listener {
    id: ListenerId,
    event_type: EventType,
    namespaces: Vec<String>,
    callback: ListenerFn,
}

/// Listener storage: node -> listeners in registration order
#[derive(Default)]
pub struct EventListenerRegistry {
    listeners: HashMap<NodeId, Vec<Listener>>,
    next_id: u64,
}

impl EventListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener
    pub fn add_listener(
        &mut self,
        node: NodeId,
        event_type: EventType,
        namespaces: Vec<String>,
        callback: ListenerFn,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;

        self.listeners.entry(node).or_default().push(Listener {
            id,
            event_type,
            namespaces,
            callback,
        });
        id
    }

    /// Remove a listener by handle
    pub fn remove_listener(&mut self, node: NodeId, id: ListenerId) -> bool {
        self.remove_where(node, |l| l.id == id) > 0
    }

    /// Remove listeners matching a parsed name. A name with neither type
    /// nor namespace removes everything on the node.
    pub fn remove_matching(&mut self, node: NodeId, name: &EventName) -> usize {
        self.remove_where(node, |l| {
            name.event_type.as_ref().is_none_or(|t| *t == l.event_type)
                && name.namespaces.iter().all(|ns| l.namespaces.contains(ns))
        })
    }

    fn remove_where(&mut self, node: NodeId, pred: impl Fn(&Listener) -> bool) -> usize {
        let Some(list) = self.listeners.get_mut(&node) else {
            return 0;
        };
        let before = list.len();
        list.retain(|l| !pred(l));
        let removed = before - list.len();
        if list.is_empty() {
            self.listeners.remove(&node);
        }
        removed
    }

    /// Snapshot of callbacks for a node and event type
    pub fn callbacks(&self, node: NodeId, event_type: &EventType) -> Vec<ListenerFn> {
        self.listeners
            .get(&node)
            .map(|list| {
                list.iter()
                    .filter(|l| l.event_type == *event_type)
                    .map(|l| l.callback.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of listeners on a node for a type
    pub fn count(&self, node: NodeId, event_type: &EventType) -> usize {
        self.listeners
            .get(&node)
            .map_or(0, |list| list.iter().filter(|l| l.event_type == *event_type).count())
    }

    /// Number of listeners on a node carrying a namespace
    pub fn count_in_namespace(&self, node: NodeId, namespace: &str) -> usize {
        self.listeners.get(&node).map_or(0, |list| {
            list.iter()
                .filter(|l| l.namespaces.iter().any(|ns| ns == namespace))
                .count()
        })
    }

    /// Clear all listeners for a node
    pub fn clear_node(&mut self, node: NodeId) {
        self.listeners.remove(&node);
    }
}

impl fmt::Debug for EventListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListenerRegistry")
            .field("nodes", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
