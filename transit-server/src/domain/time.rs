//! Schedule time handling.
//!
//! Timetables express times as seconds since midnight of the service day,
//! written as "HH:MM" or "HH:MM:SS". Hours may exceed 23 for trips that run
//! past midnight (e.g. "25:10:00"), and the planner adds a whole day to
//! times taken from tomorrow's timetable.

use std::fmt;
use std::ops::Add;

/// Number of seconds in one service day.
pub const DAY_SECONDS: u32 = 24 * 60 * 60;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A point in time measured in seconds since midnight of the query day.
///
/// Values of `DAY_SECONDS` and above lie on the following calendar day.
///
/// # Examples
///
/// ```
/// use transit_server::domain::ServiceTime;
///
/// let t = ServiceTime::parse("08:05").unwrap();
/// assert_eq!(t.as_secs(), 8 * 3600 + 5 * 60);
/// assert_eq!(t.to_string(), "08:05:00");
///
/// // Overnight timetable entries keep counting hours
/// let late = ServiceTime::parse("25:10:00").unwrap();
/// assert!(late.is_next_day());
/// assert_eq!(late.clock(), "01:10:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServiceTime(u32);

impl ServiceTime {
    /// Create a time from raw seconds.
    pub fn from_secs(secs: u32) -> Self {
        Self(secs)
    }

    /// Parse "HH:MM" or "HH:MM:SS".
    ///
    /// Hours are unbounded; minutes and seconds must be 0-59.
    ///
    /// ```
    /// use transit_server::domain::ServiceTime;
    ///
    /// assert!(ServiceTime::parse("07:55").is_ok());
    /// assert!(ServiceTime::parse("24:00:00").is_ok());
    ///
    /// assert!(ServiceTime::parse("").is_err());
    /// assert!(ServiceTime::parse("0755").is_err());
    /// assert!(ServiceTime::parse("07:60").is_err());
    /// assert!(ServiceTime::parse("07:55:00:00").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        parse_seconds(s).map(Self)
    }

    /// Returns the number of seconds since midnight of the query day.
    pub fn as_secs(&self) -> u32 {
        self.0
    }

    /// Returns true if this time falls on the day after the query day.
    pub fn is_next_day(&self) -> bool {
        self.0 >= DAY_SECONDS
    }

    /// The same time of day, one day later.
    pub fn next_day(&self) -> Self {
        Self(self.0.saturating_add(DAY_SECONDS))
    }

    /// Wall-clock rendering, hour always 00-23.
    pub fn clock(&self) -> String {
        format_clock(self.0)
    }
}

impl Add<u32> for ServiceTime {
    type Output = Self;

    fn add(self, secs: u32) -> Self::Output {
        Self(self.0.saturating_add(secs))
    }
}

impl fmt::Display for ServiceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_hms(self.0))
    }
}

/// Parse "HH:MM" or "HH:MM:SS" into total seconds.
pub fn parse_seconds(s: &str) -> Result<u32, TimeError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(TimeError::new("empty time"));
    }

    let mut parts = s.split(':');
    let hours = parse_field(parts.next(), "invalid hour")?;
    let minutes = parse_field(parts.next(), "invalid minute")?;
    let seconds = match parts.next() {
        Some(part) => parse_field(Some(part), "invalid second")?,
        None => 0,
    };
    if parts.next().is_some() {
        return Err(TimeError::new("expected HH:MM or HH:MM:SS"));
    }

    if minutes > 59 {
        return Err(TimeError::new("minute must be 0-59"));
    }
    if seconds > 59 {
        return Err(TimeError::new("second must be 0-59"));
    }

    hours
        .checked_mul(3600)
        .and_then(|h| h.checked_add(minutes * 60 + seconds))
        .ok_or_else(|| TimeError::new("time out of range"))
}

fn parse_field(part: Option<&str>, reason: &'static str) -> Result<u32, TimeError> {
    let part = part.ok_or_else(|| TimeError::new("expected HH:MM or HH:MM:SS"))?;
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimeError::new(reason));
    }
    part.parse().map_err(|_| TimeError::new(reason))
}

/// Render seconds as zero-padded "HH:MM:SS", keeping hours past 23.
pub fn format_hms(total: u32) -> String {
    let h = total / 3600;
    let m = (total % 3600) / 60;
    let s = total % 60;
    format!("{h:02}:{m:02}:{s:02}")
}

/// Render seconds as a wall-clock "HH:MM:SS" with the hour wrapped to 00-23.
pub fn format_clock(total: u32) -> String {
    format_hms(total % DAY_SECONDS)
}
