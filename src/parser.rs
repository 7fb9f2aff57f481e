//! Parsers for the scalar strings accepted at the API boundary: 12-hour
//! clock times, weekday names, week ordinals and ISO dates.

use jiff::civil::Date;

use crate::ast::{Ordinal, TimeOfDay, Weekday};
use crate::error::DistributionError;

/// Parse a 12-hour clock string such as `08:30 PM` into a 24-hour time.
///
/// `12 AM` is midnight and `12 PM` is noon.
pub fn parse_time_of_day(input: &str) -> Result<TimeOfDay, DistributionError> {
    let invalid = |reason: &str| DistributionError::time_format(input, reason);

    let (clock, day_part) = input
        .split_once(' ')
        .ok_or_else(|| invalid("expected 'hh:mm AM' or 'hh:mm PM'"))?;
    let (hour, minute) = clock
        .split_once(':')
        .ok_or_else(|| invalid("expected 'hh:mm'"))?;

    let hour: u8 = hour
        .trim()
        .parse()
        .map_err(|_| invalid("hour is not a number"))?;
    let minute: u8 = minute
        .trim()
        .parse()
        .map_err(|_| invalid("minute is not a number"))?;

    if hour > 12 {
        return Err(invalid("hour must be between 0 and 12"));
    }
    if minute > 59 {
        return Err(invalid("minute must be between 0 and 59"));
    }

    let hour = match day_part.trim() {
        "AM" | "am" if hour == 12 => 0,
        "AM" | "am" => hour,
        "PM" | "pm" if hour == 12 => 12,
        "PM" | "pm" => hour + 12,
        other => return Err(invalid(&format!("unknown day part '{other}'"))),
    };

    Ok(TimeOfDay { hour, minute })
}

pub fn parse_weekday(s: &str) -> Result<Weekday, DistributionError> {
    match s.trim().to_lowercase().as_str() {
        "sunday" | "sun" => Ok(Weekday::Sunday),
        "monday" | "mon" => Ok(Weekday::Monday),
        "tuesday" | "tue" => Ok(Weekday::Tuesday),
        "wednesday" | "wed" => Ok(Weekday::Wednesday),
        "thursday" | "thu" => Ok(Weekday::Thursday),
        "friday" | "fri" => Ok(Weekday::Friday),
        "saturday" | "sat" => Ok(Weekday::Saturday),
        _ => Err(DistributionError::UnknownWeekday(s.to_string())),
    }
}

/// Parse a list of weekday names, e.g. the `WeekDays` array of a descriptor.
pub fn parse_weekdays<S: AsRef<str>>(names: &[S]) -> Result<Vec<Weekday>, DistributionError> {
    names.iter().map(|n| parse_weekday(n.as_ref())).collect()
}

pub fn parse_ordinal(s: &str) -> Result<Ordinal, DistributionError> {
    match s.trim().to_lowercase().as_str() {
        "first" => Ok(Ordinal::First),
        "second" => Ok(Ordinal::Second),
        "third" => Ok(Ordinal::Third),
        "fourth" => Ok(Ordinal::Fourth),
        "last" => Ok(Ordinal::Last),
        _ => Err(DistributionError::UnknownOrdinal(s.to_string())),
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<Date, DistributionError> {
    s.trim()
        .parse::<Date>()
        .map_err(|e| DistributionError::date(s, e))
}
