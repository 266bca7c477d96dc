//! Itinerary building blocks.
//!
//! A `Segment` is one traversed graph edge: a single scheduled hop of a
//! trip, or a single walking transfer. A `Leg` is what a rider sees: a run
//! of consecutive segments on the same trip, or one walk.

use super::{DomainError, ServiceTime};

/// How a segment was travelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Riding the named trip.
    Trip(String),
    /// Walking between two stops.
    Walk,
}

impl Mode {
    /// Returns the trip id, or `None` for walks.
    pub fn trip_id(&self) -> Option<&str> {
        match self {
            Mode::Trip(id) => Some(id),
            Mode::Walk => None,
        }
    }

    /// Returns true if a segment with mode `next` continues the same leg.
    ///
    /// Walks never continue anything, not even another walk.
    pub fn continues_with(&self, next: &Mode) -> bool {
        match (self, next) {
            (Mode::Trip(a), Mode::Trip(b)) => a == b,
            _ => false,
        }
    }
}

/// One traversed edge of an itinerary.
///
/// Times are absolute seconds from midnight of the query day, so a hop on
/// tomorrow's timetable carries the extra day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub start_name: String,
    pub end_name: String,
    pub mode: Mode,
    pub departure: ServiceTime,
    pub arrival: ServiceTime,
    pub is_next_day: bool,
}

/// A leg of an itinerary (one trip ride, or one walk).
///
/// # Invariants
///
/// - `stops_count >= 1`
/// - `arrival >= departure`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leg {
    line: String,
    start_stop: String,
    departure: ServiceTime,
    end_stop: String,
    arrival: ServiceTime,
    stops_count: usize,
    is_next_day: bool,
}

impl Leg {
    /// Build a leg covering a run of segments.
    ///
    /// The run is taken as-is; deciding where runs start and end is the
    /// caller's job.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the run is empty or ends before it starts.
    pub fn from_run(line: String, run: &[Segment]) -> Result<Self, DomainError> {
        let (first, last) = match (run.first(), run.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(DomainError::EmptyLeg),
        };

        if last.arrival < first.departure {
            return Err(DomainError::InvalidLeg("arrival before departure"));
        }

        Ok(Leg {
            line,
            start_stop: first.start_name.clone(),
            departure: first.departure,
            end_stop: last.end_name.clone(),
            arrival: last.arrival,
            stops_count: run.len(),
            is_next_day: first.is_next_day,
        })
    }

    /// Returns the display line ("T1 (Kier: Centrum)" or the walk label).
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Returns the boarding stop name.
    pub fn start_stop(&self) -> &str {
        &self.start_stop
    }

    /// Returns the alighting stop name.
    pub fn end_stop(&self) -> &str {
        &self.end_stop
    }

    /// Returns the absolute departure time.
    pub fn departure(&self) -> ServiceTime {
        self.departure
    }

    /// Returns the absolute arrival time.
    pub fn arrival(&self) -> ServiceTime {
        self.arrival
    }

    /// Departure as a wall-clock "HH:MM:SS".
    pub fn dep_time(&self) -> String {
        self.departure.clock()
    }

    /// Arrival as a wall-clock "HH:MM:SS".
    pub fn arr_time(&self) -> String {
        self.arrival.clock()
    }

    /// Number of atomic segments in this leg.
    pub fn stops_count(&self) -> usize {
        self.stops_count
    }

    /// Whether the leg starts on the day after the query day.
    pub fn is_next_day(&self) -> bool {
        self.is_next_day
    }
}
