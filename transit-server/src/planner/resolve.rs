//! Stop lookup by caller-supplied identifier.
//!
//! Imported data stores stop identifiers as strings or integers, and callers
//! may pass either a stop's primary id or its public code. Resolution tries
//! each interpretation in a fixed order and takes the first hit.

use tracing::trace;

use crate::graph::{GraphStore, Label, NodeId, PropertyValue};

/// Resolve an identifier to a stop node.
///
/// Tries, in order: `stop_id` as string, `stop_id` as integer, `stop_code`
/// as string, `stop_code` as integer. Integer tiers are skipped when the
/// identifier does not parse as one. The identifier is matched exactly as
/// given, surrounding whitespace included.
pub fn lookup_stop<G: GraphStore>(graph: &G, identifier: &str) -> Option<NodeId> {
    if identifier.is_empty() {
        return None;
    }

    let as_string = PropertyValue::from(identifier);
    let as_int = identifier.parse::<i64>().ok().map(PropertyValue::Int);

    for attr in ["stop_id", "stop_code"] {
        if let Some(node) = graph.find_node(Label::Stop, attr, &as_string) {
            trace!(identifier, attr, "resolved stop by string");
            return Some(node);
        }
        if let Some(value) = &as_int
            && let Some(node) = graph.find_node(Label::Stop, attr, value)
        {
            trace!(identifier, attr, "resolved stop by integer");
            return Some(node);
        }
    }

    None
}
