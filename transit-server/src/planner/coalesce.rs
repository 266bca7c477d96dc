//! Grouping segments into rider-facing legs.

use tracing::trace;

use crate::domain::{DomainError, Leg, Mode, Segment};
use crate::graph::{GraphStore, Label, PropertyValue};

use super::config::PlannerConfig;

/// Headsign of a trip: `Some("")` when the trip exists without one, `None`
/// when no trip node carries the id.
fn headsign<'g, G: GraphStore>(graph: &'g G, trip_id: &str) -> Option<&'g str> {
    let trip = graph.find_node(Label::Trip, "trip_id", &PropertyValue::from(trip_id))?;
    Some(graph.node_str(trip, "trip_headsign").unwrap_or_default())
}

/// Merge consecutive segments on the same trip into one leg each.
///
/// Every walk becomes its own leg. A trip boarded again after leaving it
/// starts a new leg.
pub fn coalesce<G: GraphStore>(
    graph: &G,
    config: &PlannerConfig,
    segments: &[Segment],
) -> Result<Vec<Leg>, DomainError> {
    segments
        .chunk_by(|a, b| a.mode.continues_with(&b.mode))
        .map(|run| {
            let line = match &run[0].mode {
                Mode::Trip(trip_id) => {
                    let headsign = headsign(graph, trip_id);
                    if headsign.is_none() {
                        trace!(trip_id, "no trip node for ridden trip");
                    }
                    config.line_label(trip_id, headsign)
                }
                Mode::Walk => config.walk_label.clone(),
            };
            Leg::from_run(line, run)
        })
        .collect()
}
