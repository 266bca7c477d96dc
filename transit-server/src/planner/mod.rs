//! Earliest-arrival route planner.
//!
//! Answers "leaving this stop at this time on this weekday, when is the
//! soonest I can reach that stop, and how?"
//!
//! A query runs as a pipeline: resolve both stop identifiers, collect the
//! trips running today and tomorrow, run a time-dependent Dijkstra over
//! drive and walk edges, rebuild the edge path, and group it into legs.

mod calendar;
mod coalesce;
mod config;
mod location;
mod reconstruct;
mod resolve;
mod route;
mod search;


pub use calendar::ActiveTrips;
pub use coalesce::coalesce;
pub use config::PlannerConfig;
pub use location::{Location, StopBounds, random_location};
pub use reconstruct::segments;
pub use resolve::lookup_stop;
pub use route::{PlanError, PlanResult, Planner, RouteRequest, find_fastest_route};
pub use search::{Hop, Search, SearchOutcome, SearchState};
