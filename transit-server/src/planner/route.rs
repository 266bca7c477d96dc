//! Route planning entry points.

use std::sync::atomic::AtomicBool;

use tracing::{debug, warn};

use crate::domain::{DomainError, Leg, ServiceTime, TimeError, parse_weekday_or_monday};
use crate::graph::GraphStore;

use super::calendar::ActiveTrips;
use super::coalesce::coalesce;
use super::config::PlannerConfig;
use super::reconstruct;
use super::resolve::lookup_stop;
use super::search::Search;

/// Errors from route planning.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// An endpoint identifier matched no stop
    #[error("unknown stop: {0}")]
    UnknownStop(String),

    /// The start time is not "HH:MM" or "HH:MM:SS"
    #[error("invalid start time: {0}")]
    InvalidStartTime(#[from] TimeError),

    /// The caller cancelled the search
    #[error("search cancelled")]
    Cancelled,

    /// The found path could not be turned into legs
    #[error("could not build itinerary: {0}")]
    Itinerary(#[from] DomainError),
}

/// A route query.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    /// Source stop identifier (id or code).
    pub from: String,

    /// Destination stop identifier (id or code).
    pub to: String,

    /// Departure time, "HH:MM" or "HH:MM:SS".
    pub start_time: String,

    /// Lowercase weekday name. `None` means Monday.
    pub day: Option<String>,
}

impl RouteRequest {
    /// Create a request for Monday's timetable.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        start_time: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            start_time: start_time.into(),
            day: None,
        }
    }

    /// Plan on the given weekday instead.
    pub fn on(mut self, day: impl Into<String>) -> Self {
        self.day = Some(day.into());
        self
    }

    /// Parse the start time.
    pub fn departure(&self) -> Result<ServiceTime, PlanError> {
        Ok(ServiceTime::parse(&self.start_time)?)
    }
}

/// Result of planning one route.
#[derive(Debug, Clone)]
pub struct PlanResult {
    /// Legs in travel order. Empty when no route exists.
    pub legs: Vec<Leg>,

    /// Queue pops performed by the search.
    pub states_popped: usize,

    /// Queue pushes performed by the search.
    pub states_pushed: usize,
}

/// Route planner over a graph store.
pub struct Planner<'a, G: GraphStore> {
    graph: &'a G,
    config: &'a PlannerConfig,
    cancel: Option<&'a AtomicBool>,
}

impl<'a, G: GraphStore> Planner<'a, G> {
    /// Create a new planner.
    pub fn new(graph: &'a G, config: &'a PlannerConfig) -> Self {
        Self {
            graph,
            config,
            cancel: None,
        }
    }

    /// Stop searching once `flag` is set.
    pub fn with_cancellation(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Find the earliest-arrival itinerary.
    ///
    /// An unreachable destination is not an error: the result has no legs.
    pub fn plan(&self, request: &RouteRequest) -> Result<PlanResult, PlanError> {
        let start = request.departure()?;

        let source = lookup_stop(self.graph, &request.from)
            .ok_or_else(|| PlanError::UnknownStop(request.from.clone()))?;
        let destination = lookup_stop(self.graph, &request.to)
            .ok_or_else(|| PlanError::UnknownStop(request.to.clone()))?;

        let day = request
            .day
            .as_deref()
            .map_or(chrono::Weekday::Mon, parse_weekday_or_monday);
        let active = ActiveTrips::collect(self.graph, day);

        let mut search = Search::new(self.graph, &active, self.config);
        if let Some(flag) = self.cancel {
            search = search.with_cancellation(flag);
        }
        let outcome = search.run(source, destination, start)?;

        let segments = reconstruct::segments(self.graph, &outcome);
        let legs = coalesce(self.graph, self.config, &segments)?;

        debug!(
            from = %request.from,
            to = %request.to,
            start = %start,
            ?day,
            segments = segments.len(),
            legs = legs.len(),
            "planned route"
        );

        Ok(PlanResult {
            legs,
            states_popped: outcome.states_popped,
            states_pushed: outcome.states_pushed,
        })
    }
}

/// Find the fastest route between two stops with the default configuration.
///
/// Every failure (unknown stop, malformed time, no route) yields an empty
/// list. Use [`Planner`] to tell these apart.
pub fn find_fastest_route<G: GraphStore>(
    graph: &G,
    start_id: &str,
    end_id: &str,
    start_time: &str,
    day_of_week: &str,
) -> Vec<Leg> {
    let config = PlannerConfig::default();
    let request = RouteRequest::new(start_id, end_id, start_time).on(day_of_week);

    match Planner::new(graph, &config).plan(&request) {
        Ok(result) => result.legs,
        Err(err) => {
            warn!(%err, from = start_id, to = end_id, "route planning failed");
            Vec::new()
        }
    }
}
