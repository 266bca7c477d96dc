//! Service-day names.
//!
//! Calendars store one boolean per weekday under its lowercase English name.
//! This module maps between those names and `chrono::Weekday`.

use chrono::Weekday;

/// Error returned when a weekday name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown weekday: {0:?}")]
pub struct UnknownWeekday(pub String);

/// Parse a weekday name, case-insensitively.
///
/// # Examples
///
/// ```
/// use chrono::Weekday;
/// use transit_server::domain::parse_weekday;
///
/// assert_eq!(parse_weekday("monday"), Ok(Weekday::Mon));
/// assert_eq!(parse_weekday("Sunday"), Ok(Weekday::Sun));
/// assert!(parse_weekday("mon").is_err());
/// ```
pub fn parse_weekday(name: &str) -> Result<Weekday, UnknownWeekday> {
    match name.trim().to_ascii_lowercase().as_str() {
        "monday" => Ok(Weekday::Mon),
        "tuesday" => Ok(Weekday::Tue),
        "wednesday" => Ok(Weekday::Wed),
        "thursday" => Ok(Weekday::Thu),
        "friday" => Ok(Weekday::Fri),
        "saturday" => Ok(Weekday::Sat),
        "sunday" => Ok(Weekday::Sun),
        _ => Err(UnknownWeekday(name.to_string())),
    }
}

/// Parse a weekday name, falling back to Monday for anything unrecognised.
pub fn parse_weekday_or_monday(name: &str) -> Weekday {
    parse_weekday(name).unwrap_or_else(|err| {
        tracing::warn!(%err, "falling back to monday");
        Weekday::Mon
    })
}

/// The calendar attribute name for a weekday.
pub fn calendar_key(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}
