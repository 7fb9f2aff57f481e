//! Expand recurring schedules into concrete, timezone-aware instances.
//!
//! A schedule is a date range, a recurrence pattern (daily, weekly, monthly by
//! day of month, monthly by ordinal weekday) and a daily start/end time of day.
//! Expanding it yields every occurrence in the range, formatted
//! `YYYY-MM-DD HH:mm` in the schedule's timezone.
//!
//! # Examples
//!
//! ```
//! let instances = schedule_distribution::calc_monthly_by_weeks(
//!     "2022-05-01",
//!     "2022-09-30",
//!     "Asia/Shanghai",
//!     "Third",
//!     "Monday",
//!     2,
//!     "08:30 PM",
//!     Some("11:00 PM"),
//! )
//! .unwrap();
//! assert_eq!(instances[0].start_time, "2022-05-16 20:30");
//! assert_eq!(instances[1].start_time, "2022-07-18 20:30");
//! ```

pub mod ast;
pub mod calendar;
pub mod display;
pub mod error;
pub mod eval;
pub mod parser;
pub mod range;
pub mod schedule;

pub use ast::{Instance, Ordinal, RecurrencePattern, ScheduleSpec, TimeOfDay, Weekday};
pub use calendar::{MonthGrid, WeekStart};
pub use error::DistributionError;
pub use range::DateRange;
pub use schedule::ScheduleDescriptor;

use parser::{parse_ordinal, parse_time_of_day, parse_weekday, parse_weekdays};

impl ScheduleSpec {
    /// Build a schedule from the scalar strings accepted by the `calc_*`
    /// functions.
    ///
    /// The range is resolved before the times are parsed, so a reversed range
    /// is reported even when a time string is also malformed.
    pub fn from_strings(
        pattern: RecurrencePattern,
        range_start_date: &str,
        range_end_date: &str,
        timezone: &str,
        schedule_start: &str,
        schedule_end: Option<&str>,
    ) -> Result<Self, DistributionError> {
        let range = DateRange::resolve(range_start_date, range_end_date, timezone)?;
        let start_time = parse_time_of_day(schedule_start)?;
        let end_time = schedule_end.map(parse_time_of_day).transpose()?;
        Self::new(pattern, range, start_time, end_time)
    }

    /// Expand this schedule into its instances.
    pub fn distributions(&self) -> Result<Vec<Instance>, DistributionError> {
        eval::distributions(self)
    }
}

/// Every `daily_steps` days, starting on the range start.
pub fn calc_daily(
    range_start_date: &str,
    range_end_date: &str,
    daily_steps: u32,
    timezone: &str,
    schedule_start: &str,
    schedule_end: Option<&str>,
) -> Result<Vec<Instance>, DistributionError> {
    ScheduleSpec::from_strings(
        RecurrencePattern::Daily {
            every_n_days: daily_steps,
        },
        range_start_date,
        range_end_date,
        timezone,
        schedule_start,
        schedule_end,
    )?
    .distributions()
}

/// The given weekdays of every `weekly_steps`-th week.
pub fn calc_weekly<S: AsRef<str>>(
    range_start_date: &str,
    range_end_date: &str,
    weekly_steps: u32,
    weekdays: &[S],
    timezone: &str,
    schedule_start: &str,
    schedule_end: Option<&str>,
) -> Result<Vec<Instance>, DistributionError> {
    ScheduleSpec::from_strings(
        RecurrencePattern::Weekly {
            every_n_weeks: weekly_steps,
            weekdays: parse_weekdays(weekdays)?,
        },
        range_start_date,
        range_end_date,
        timezone,
        schedule_start,
        schedule_end,
    )?
    .distributions()
}

/// Day `day_of_month` of every `monthly_steps`-th month, clamped to short
/// months.
pub fn calc_monthly_by_days(
    range_start_date: &str,
    range_end_date: &str,
    timezone: &str,
    day_of_month: u32,
    monthly_steps: u32,
    schedule_start: &str,
    schedule_end: Option<&str>,
) -> Result<Vec<Instance>, DistributionError> {
    ScheduleSpec::from_strings(
        RecurrencePattern::MonthlyByDay {
            day_of_month: schedule::day_of_month(day_of_month)?,
            every_n_months: monthly_steps,
        },
        range_start_date,
        range_end_date,
        timezone,
        schedule_start,
        schedule_end,
    )?
    .distributions()
}

/// The `week_ordinal` (`First`..`Fourth`, `Last`) `weekday` of every
/// `monthly_steps`-th month.
#[allow(clippy::too_many_arguments)]
pub fn calc_monthly_by_weeks(
    range_start_date: &str,
    range_end_date: &str,
    timezone: &str,
    week_ordinal: &str,
    weekday: &str,
    monthly_steps: u32,
    schedule_start: &str,
    schedule_end: Option<&str>,
) -> Result<Vec<Instance>, DistributionError> {
    ScheduleSpec::from_strings(
        RecurrencePattern::MonthlyByWeek {
            ordinal: parse_ordinal(week_ordinal)?,
            weekday: parse_weekday(weekday)?,
            every_n_months: monthly_steps,
        },
        range_start_date,
        range_end_date,
        timezone,
        schedule_start,
        schedule_end,
    )?
    .distributions()
}

/// Expand a schedule descriptor, routing on its `Pattern` field.
pub fn calc_by_pattern(
    descriptor: &ScheduleDescriptor,
) -> Result<Vec<Instance>, DistributionError> {
    descriptor.distributions()
}

/// Expand a schedule descriptor given as JSON.
#[cfg(feature = "serde")]
pub fn calc_by_pattern_json(json: &str) -> Result<Vec<Instance>, DistributionError> {
    ScheduleDescriptor::from_json(json)?.distributions()
}
