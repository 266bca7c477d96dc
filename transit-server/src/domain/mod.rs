//! Domain types for the transit route planner.
//!
//! This module contains the value types that flow through a route query:
//! schedule times, weekday names and the segments and legs of an itinerary.
//! Types validate at construction, so code that receives them can trust
//! their invariants.

mod error;
mod leg;
mod time;
mod weekday;

pub use error::DomainError;
pub use leg::{Leg, Mode, Segment};
pub use time::{DAY_SECONDS, ServiceTime, TimeError, format_clock, format_hms, parse_seconds};
pub use weekday::{UnknownWeekday, calendar_key, parse_weekday, parse_weekday_or_monday};
