use jiff::civil::{Date, Time};
use jiff::tz::TimeZone;
use jiff::{Span, Zoned};

use crate::error::DistributionError;
use crate::parser::parse_date;

/// Resolve a timezone name through the bundled tz database.
pub fn resolve_tz(name: &str) -> Result<TimeZone, DistributionError> {
    TimeZone::get(name).map_err(|e| DistributionError::timezone(name, e))
}

/// The inclusive date range a schedule is expanded over, bound to a timezone.
///
/// Both ends sit at local midnight. `start <= end` always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct DateRange {
    start: Zoned,
    end: Zoned,
}

impl DateRange {
    pub fn new(start: Date, end: Date, tz: &TimeZone) -> Result<Self, DistributionError> {
        let start = start.to_zoned(tz.clone())?;
        let end = end.to_zoned(tz.clone())?;
        if start > end {
            return Err(DistributionError::InvalidRange {
                start: start.date().to_string(),
                end: end.date().to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Parse `YYYY-MM-DD` bounds against a named timezone.
    pub fn resolve(start: &str, end: &str, timezone: &str) -> Result<Self, DistributionError> {
        let tz = resolve_tz(timezone)?;
        Self::new(parse_date(start)?, parse_date(end)?, &tz)
    }

    pub fn start(&self) -> &Zoned {
        &self.start
    }

    pub fn end(&self) -> &Zoned {
        &self.end
    }

    pub fn time_zone(&self) -> &TimeZone {
        self.start.time_zone()
    }

    /// Whole civil days from the start date to the end date.
    pub fn day_span(&self) -> Result<i64, DistributionError> {
        let span = self.start.date().until(self.end.date())?;
        Ok(i64::from(span.get_days()))
    }

    /// The start date moved by `days`, in local time.
    pub fn date_at(&self, days: i64) -> Result<Date, DistributionError> {
        Ok(self.start.date().checked_add(Span::new().try_days(days)?)?)
    }

    /// The start date moved by `days`, at `time` on the local wall clock.
    ///
    /// Wall-clock times that fall in a DST gap are pushed forward.
    pub fn shifted(&self, days: i64, time: Time) -> Result<Zoned, DistributionError> {
        let date = self.date_at(days)?;
        Ok(date.to_datetime(time).to_zoned(self.time_zone().clone())?)
    }

    /// Whether `candidate` falls in `[start, end + 1 day]`.
    ///
    /// The extra day admits instances on the last date of the range.
    pub fn admits(&self, candidate: &Zoned) -> Result<bool, DistributionError> {
        let limit = self.end.checked_add(Span::new().days(1))?;
        Ok(candidate >= &self.start && candidate <= &limit)
    }
}
