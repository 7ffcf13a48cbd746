//! Event namespacing
//!
//! Every listener the controller attaches carries this namespace, so
//! `Document::off(el, ".contenteditableplaceholder")` removes exactly ours.

/// Private event namespace
pub const NAMESPACE: &str = "contenteditableplaceholder";

fn suffixed(event_name: &str) -> String {
    format!("{}.{}", event_name, NAMESPACE)
}

/// Namespace each whitespace separated event name, joined by one space.
/// Empty input yields the bare `.contenteditableplaceholder` marker.
pub fn ns(event_names: &str) -> String {
    ns_tokens(event_names).join(" ")
}

/// Same as [`ns`], one entry per event name
pub fn ns_tokens(event_names: &str) -> Vec<String> {
    let tokens: Vec<String> = event_names.split_whitespace().map(suffixed).collect();
    if tokens.is_empty() {
        vec![suffixed("")]
    } else {
        tokens
    }
}
