//! Service-calendar pre-pass.
//!
//! Before searching, every trip is checked once against its calendar so the
//! search loop can test trip activity with a set lookup.

use std::collections::HashSet;

use chrono::Weekday;
use tracing::debug;

use crate::domain::calendar_key;
use crate::graph::{EdgeKind, GraphStore, Label, PropertyValue};

/// Trip ids running on the query day and on the day after.
///
/// Immutable for the duration of a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveTrips {
    today: HashSet<String>,
    tomorrow: HashSet<String>,
}

impl ActiveTrips {
    /// Scan all trips and record which run on `today` and the following day.
    ///
    /// Trips without a `VALID_ON` calendar or without a `trip_id` are
    /// ignored. A calendar attribute that is missing or not a boolean counts
    /// as not running.
    pub fn collect<G: GraphStore>(graph: &G, today: Weekday) -> Self {
        let today_key = calendar_key(today);
        let tomorrow_key = calendar_key(today.succ());

        let mut active = ActiveTrips::default();
        let mut scanned = 0usize;

        for trip in graph.find_all(Label::Trip) {
            scanned += 1;
            let Some(trip_id) = graph.node_str(trip, "trip_id") else {
                continue;
            };
            let Some(valid_on) = graph.outgoing(trip, EdgeKind::ValidOn).next() else {
                continue;
            };

            let runs = |key: &str| {
                graph
                    .node_property(valid_on.end, key)
                    .and_then(PropertyValue::as_bool)
                    .unwrap_or(false)
            };

            if runs(today_key) {
                active.today.insert(trip_id.to_string());
            }
            if runs(tomorrow_key) {
                active.tomorrow.insert(trip_id.to_string());
            }
        }

        debug!(
            scanned,
            today = today_key,
            trips_today = active.today.len(),
            tomorrow = tomorrow_key,
            trips_tomorrow = active.tomorrow.len(),
            "collected active trips"
        );

        active
    }

    /// Build directly from trip id lists.
    pub fn from_sets<I, J>(today: I, tomorrow: J) -> Self
    where
        I: IntoIterator<Item = String>,
        J: IntoIterator<Item = String>,
    {
        Self {
            today: today.into_iter().collect(),
            tomorrow: tomorrow.into_iter().collect(),
        }
    }

    /// Returns true if the trip runs on the query day.
    pub fn runs_today(&self, trip_id: &str) -> bool {
        self.today.contains(trip_id)
    }

    /// Returns true if the trip runs on the day after the query day.
    pub fn runs_tomorrow(&self, trip_id: &str) -> bool {
        self.tomorrow.contains(trip_id)
    }

    pub fn today_count(&self) -> usize {
        self.today.len()
    }

    pub fn tomorrow_count(&self) -> usize {
        self.tomorrow.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::MemoryGraph;

    #[test]
    fn splits_today_and_tomorrow() {
        let mut g = MemoryGraph::new();
        let mon = g.add_calendar(&[Weekday::Mon]);
        let tue = g.add_calendar(&[Weekday::Tue]);
        let both = g.add_calendar(&[Weekday::Mon, Weekday::Tue]);
        let wed = g.add_calendar(&[Weekday::Wed]);
        g.add_trip("M", "", Some(mon));
        g.add_trip("T", "", Some(tue));
        g.add_trip("B", "", Some(both));
        g.add_trip("W", "", Some(wed));

        let active = ActiveTrips::collect(&g, Weekday::Mon);

        assert!(active.runs_today("M"));
        assert!(!active.runs_tomorrow("M"));
        assert!(!active.runs_today("T"));
        assert!(active.runs_tomorrow("T"));
        assert!(active.runs_today("B"));
        assert!(active.runs_tomorrow("B"));
        assert!(!active.runs_today("W"));
        assert!(!active.runs_tomorrow("W"));
        assert_eq!(active.today_count(), 2);
        assert_eq!(active.tomorrow_count(), 2);
    }

    #[test]
    fn sunday_tomorrow_is_monday() {
        let mut g = MemoryGraph::new();
        let mon = g.add_calendar(&[Weekday::Mon]);
        g.add_trip("M", "", Some(mon));

        let active = ActiveTrips::collect(&g, Weekday::Sun);
        assert!(!active.runs_today("M"));
        assert!(active.runs_tomorrow("M"));
    }

    #[test]
    fn trip_without_calendar_ignored() {
        let mut g = MemoryGraph::new();
        g.add_trip("LOST", "", None);

        let active = ActiveTrips::collect(&g, Weekday::Mon);
        assert_eq!(active, ActiveTrips::default());
    }

    #[test]
    fn non_boolean_flag_counts_as_not_running() {
        let mut g = MemoryGraph::new();
        let cal = g.add_node(
            None,
            [
                ("monday", PropertyValue::from("true")),
                ("tuesday", PropertyValue::from(1_i64)),
            ],
        );
        g.add_trip("X", "", Some(cal));

        let active = ActiveTrips::collect(&g, Weekday::Mon);
        assert!(!active.runs_today("X"));
        assert!(!active.runs_tomorrow("X"));
    }

    #[test]
    fn from_sets() {
        let active = ActiveTrips::from_sets(["A".to_string()], ["B".to_string()]);
        assert!(active.runs_today("A"));
        assert!(!active.runs_today("B"));
        assert!(active.runs_tomorrow("B"));
    }
}
