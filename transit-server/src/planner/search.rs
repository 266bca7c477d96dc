//! Time-dependent earliest-arrival search.
//!
//! A Dijkstra variant keyed by arrival time. Drive edges are expanded on
//! demand into up to two timed connections (the trip's timetable today, and
//! the same timetable shifted by a day), and are only usable when the
//! vehicle has not yet left. Waiting is implicit in each edge's weight, which
//! stays non-negative, so the first time the destination is popped its
//! arrival is optimal.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, trace};

use crate::domain::{ServiceTime, parse_seconds};
use crate::graph::{Edge, EdgeId, EdgeKind, GraphStore, NodeId};

use super::calendar::ActiveTrips;
use super::config::PlannerConfig;
use super::route::PlanError;

/// The edge used to reach a state, and when travel along it began.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hop {
    pub edge: Edge,
    /// Vehicle departure for drives; the walk start for walks.
    pub departure: ServiceTime,
}

/// One node visit during search.
///
/// `parent` indexes the arena in `SearchOutcome`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    pub node: NodeId,
    pub time: ServiceTime,
    pub parent: Option<usize>,
    pub via: Option<Hop>,
    /// The hop began on the day after the query day.
    pub next_day: bool,
}

/// Result of one search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    states: Vec<SearchState>,
    goal: Option<usize>,
    /// States taken off the queue, including stale ones.
    pub states_popped: usize,
    /// States put on the queue, including the source.
    pub states_pushed: usize,
}

impl SearchOutcome {
    /// The state at which the destination was reached, if it was.
    pub fn goal(&self) -> Option<&SearchState> {
        self.goal.and_then(|idx| self.states.get(idx))
    }

    /// Earliest arrival at the destination.
    pub fn arrival(&self) -> Option<ServiceTime> {
        self.goal().map(|s| s.time)
    }

    /// States from source to destination. Empty if unreachable.
    pub fn path(&self) -> Vec<&SearchState> {
        let mut path = Vec::new();
        let mut cursor = self.goal;
        while let Some(idx) = cursor {
            let Some(state) = self.states.get(idx) else {
                break;
            };
            path.push(state);
            cursor = state.parent;
        }
        path.reverse();
        path
    }
}

/// Open states and best-known arrivals.
struct Frontier {
    states: Vec<SearchState>,
    best: HashMap<NodeId, ServiceTime>,
    /// Keyed by (time, arena index); the index breaks ties in enqueue order.
    heap: BinaryHeap<Reverse<(ServiceTime, usize)>>,
}

impl Frontier {
    fn new(source: NodeId, start: ServiceTime) -> Self {
        let mut frontier = Self {
            states: Vec::new(),
            best: HashMap::new(),
            heap: BinaryHeap::new(),
        };
        frontier.best.insert(source, start);
        frontier.push(SearchState {
            node: source,
            time: start,
            parent: None,
            via: None,
            next_day: false,
        });
        frontier
    }

    fn push(&mut self, state: SearchState) {
        let idx = self.states.len();
        self.heap.push(Reverse((state.time, idx)));
        self.states.push(state);
    }

    fn is_stale(&self, node: NodeId, time: ServiceTime) -> bool {
        self.best.get(&node).is_some_and(|&best| time > best)
    }

    /// Record `arrival` at the edge's head if it beats the best known.
    fn relax(&mut self, parent: usize, edge: Edge, departure: ServiceTime, arrival: ServiceTime) {
        if self
            .best
            .get(&edge.end)
            .is_some_and(|&best| arrival >= best)
        {
            return;
        }
        self.best.insert(edge.end, arrival);
        self.push(SearchState {
            node: edge.end,
            time: arrival,
            parent: Some(parent),
            via: Some(Hop { edge, departure }),
            next_day: departure.is_next_day(),
        });
    }
}

/// Earliest-arrival search over one graph snapshot.
pub struct Search<'a, G: GraphStore> {
    graph: &'a G,
    active: &'a ActiveTrips,
    config: &'a PlannerConfig,
    cancel: Option<&'a AtomicBool>,
}

impl<'a, G: GraphStore> Search<'a, G> {
    /// Create a search over `graph` using the given trip activity.
    pub fn new(graph: &'a G, active: &'a ActiveTrips, config: &'a PlannerConfig) -> Self {
        Self {
            graph,
            active,
            config,
            cancel: None,
        }
    }

    /// Abort with `PlanError::Cancelled` once `flag` is set.
    ///
    /// The flag is checked between queue pops.
    pub fn with_cancellation(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Find the earliest arrival at `destination` leaving `source` at `start`.
    pub fn run(
        &self,
        source: NodeId,
        destination: NodeId,
        start: ServiceTime,
    ) -> Result<SearchOutcome, PlanError> {
        let mut frontier = Frontier::new(source, start);
        let mut goal = None;
        let mut popped = 0;

        while let Some(Reverse((time, idx))) = frontier.heap.pop() {
            if self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                debug!(popped, "search cancelled");
                return Err(PlanError::Cancelled);
            }
            popped += 1;

            let node = frontier.states[idx].node;
            if frontier.is_stale(node, time) {
                continue;
            }
            if node == destination {
                goal = Some(idx);
                break;
            }

            self.relax_drives(&mut frontier, idx, node, time);
            self.relax_walks(&mut frontier, idx, node, time);
        }

        let outcome = SearchOutcome {
            states_pushed: frontier.states.len(),
            states: frontier.states,
            goal,
            states_popped: popped,
        };

        debug!(
            popped = outcome.states_popped,
            pushed = outcome.states_pushed,
            arrival = ?outcome.arrival(),
            "search finished"
        );

        Ok(outcome)
    }

    fn relax_drives(&self, frontier: &mut Frontier, idx: usize, node: NodeId, now: ServiceTime) {
        for edge in self.graph.outgoing(node, EdgeKind::Drive) {
            let Some(trip_id) = self.graph.edge_str(edge.id, "trip_id") else {
                trace!(edge = ?edge.id, "drive edge without trip_id");
                continue;
            };
            let Some((dep, arr)) = self.drive_times(edge.id) else {
                trace!(edge = ?edge.id, trip_id, "drive edge without usable times");
                continue;
            };
            if arr < dep {
                trace!(edge = ?edge.id, trip_id, "drive edge arrives before it departs");
                continue;
            }

            if self.active.runs_today(trip_id) && dep >= now {
                frontier.relax(idx, edge, dep, arr);
            }
            if self.active.runs_tomorrow(trip_id) {
                let (dep, arr) = (dep.next_day(), arr.next_day());
                if dep >= now {
                    frontier.relax(idx, edge, dep, arr);
                }
            }
        }
    }

    fn relax_walks(&self, frontier: &mut Frontier, idx: usize, node: NodeId, now: ServiceTime) {
        for edge in self.graph.outgoing(node, EdgeKind::Walk) {
            let duration = self
                .graph
                .edge_int(edge.id, "time_sec")
                .map(|secs| secs.clamp(0, i64::from(u32::MAX)) as u32)
                .unwrap_or(self.config.default_walk_secs);
            frontier.relax(idx, edge, now, now + duration);
        }
    }

    /// Scheduled departure and arrival of a drive edge.
    ///
    /// Integer seconds are preferred; "HH:MM:SS" strings are the fallback.
    fn drive_times(&self, edge: EdgeId) -> Option<(ServiceTime, ServiceTime)> {
        let secs = |attr| {
            self.graph
                .edge_int(edge, attr)
                .and_then(|v| u32::try_from(v).ok())
        };
        if let (Some(dep), Some(arr)) = (secs("dep_time_sec"), secs("arr_time_sec")) {
            return Some((ServiceTime::from_secs(dep), ServiceTime::from_secs(arr)));
        }

        let parsed = |attr| {
            self.graph
                .edge_str(edge, attr)
                .and_then(|v| parse_seconds(v).ok())
        };
        Some((
            ServiceTime::from_secs(parsed("dep_time")?),
            ServiceTime::from_secs(parsed("arr_time")?),
        ))
    }
}
