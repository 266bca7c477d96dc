//! Turning a search result back into traversed segments.

use crate::domain::{Mode, Segment};
use crate::graph::{EdgeKind, GraphStore, NodeId};

use super::search::SearchOutcome;

const UNKNOWN_STOP: &str = "Unknown";

fn stop_name<G: GraphStore>(graph: &G, node: NodeId) -> String {
    graph
        .node_str(node, "stop_name")
        .unwrap_or(UNKNOWN_STOP)
        .to_string()
}

/// Walk the parent chain from the goal and emit one segment per edge,
/// in travel order.
///
/// Returns an empty list when the destination was not reached or the
/// source already was the destination.
pub fn segments<G: GraphStore>(graph: &G, outcome: &SearchOutcome) -> Vec<Segment> {
    let path = outcome.path();
    let mut segments = Vec::with_capacity(path.len().saturating_sub(1));

    for pair in path.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        let Some(hop) = next.via else {
            continue;
        };

        let mode = match hop.edge.kind {
            EdgeKind::Drive => Mode::Trip(
                graph
                    .edge_str(hop.edge.id, "trip_id")
                    .unwrap_or_default()
                    .to_string(),
            ),
            EdgeKind::Walk => Mode::Walk,
            EdgeKind::ValidOn => continue,
        };

        segments.push(Segment {
            start_name: stop_name(graph, prev.node),
            end_name: stop_name(graph, next.node),
            mode,
            departure: hop.departure,
            arrival: next.time,
            is_next_day: next.next_day,
        });
    }

    segments
}
