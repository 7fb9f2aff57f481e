//! The JSON schedule descriptor and the dispatcher that turns it into a typed
//! [`ScheduleSpec`].
//!
//! Keys are PascalCase and case-sensitive:
//!
//! ```json
//! {
//!   "Pattern": "Monthly",
//!   "MonthlyOptions": {
//!     "Type": "ByWeekDays",
//!     "ByWeekDays": { "Ordinal": "Third", "WeekDay": "Monday", "EveryMonths": 2 }
//!   },
//!   "StartTime": "08:30 PM",
//!   "EndTime": "11:00 PM",
//!   "TimeZone": { "Name": "Asia/Shanghai" },
//!   "Range": { "StartDateAt": "2022-05-01", "EndDateAt": "2022-09-30" }
//! }
//! ```
//!
//! Option blocks for patterns other than the selected one may be present and
//! are ignored.

use crate::ast::{Instance, RecurrencePattern, ScheduleSpec};
use crate::error::DistributionError;
use crate::parser::{parse_ordinal, parse_time_of_day, parse_weekday, parse_weekdays};
use crate::range::DateRange;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct ScheduleDescriptor {
    pub pattern: Option<String>,
    pub daily_options: Option<DailyOptions>,
    pub weekly_options: Option<WeeklyOptions>,
    pub monthly_options: Option<MonthlyOptions>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub time_zone: Option<TimeZoneOptions>,
    pub range: Option<RangeOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct DailyOptions {
    pub every_days: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct WeeklyOptions {
    pub recursive_every_weeks: Option<u32>,
    pub week_days: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct MonthlyOptions {
    /// `ByDays` or `ByWeekDays`.
    #[cfg_attr(feature = "serde", serde(rename = "Type"))]
    pub kind: Option<String>,
    pub by_days: Option<ByDaysOptions>,
    pub by_week_days: Option<ByWeekDaysOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct ByDaysOptions {
    pub days: Option<u32>,
    pub every_months: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct ByWeekDaysOptions {
    pub ordinal: Option<String>,
    pub week_day: Option<String>,
    pub every_months: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct TimeZoneOptions {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct RangeOptions {
    pub start_date_at: Option<String>,
    pub end_date_at: Option<String>,
}

fn required<'a>(
    value: &'a Option<String>,
    field: &'static str,
) -> Result<&'a str, DistributionError> {
    value
        .as_deref()
        .ok_or(DistributionError::MissingField(field))
}

fn required_ref<'a, T>(
    value: &'a Option<T>,
    field: &'static str,
) -> Result<&'a T, DistributionError> {
    value.as_ref().ok_or(DistributionError::MissingField(field))
}

fn required_copy<T: Copy>(value: &Option<T>, field: &'static str) -> Result<T, DistributionError> {
    value.ok_or(DistributionError::MissingField(field))
}

impl ScheduleDescriptor {
    /// Decode a descriptor from JSON.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, DistributionError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and decode a descriptor file.
    #[cfg(feature = "serde")]
    pub fn from_file(path: &std::path::Path) -> Result<Self, DistributionError> {
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json),
            Err(e) => Err(DistributionError::io(path, e)),
        }
    }

    /// Resolve the selected pattern and its options.
    pub fn pattern(&self) -> Result<RecurrencePattern, DistributionError> {
        let pattern = required(&self.pattern, "Pattern")?;
        match pattern {
            "Daily" => {
                let options = required_ref(&self.daily_options, "DailyOptions")?;
                Ok(RecurrencePattern::Daily {
                    every_n_days: required_copy(&options.every_days, "DailyOptions.EveryDays")?,
                })
            }
            "Weekly" => {
                let options = required_ref(&self.weekly_options, "WeeklyOptions")?;
                let names = required_ref(&options.week_days, "WeeklyOptions.WeekDays")?;
                Ok(RecurrencePattern::Weekly {
                    every_n_weeks: required_copy(
                        &options.recursive_every_weeks,
                        "WeeklyOptions.RecursiveEveryWeeks",
                    )?,
                    weekdays: parse_weekdays(names)?,
                })
            }
            "Monthly" => {
                let options = required_ref(&self.monthly_options, "MonthlyOptions")?;
                let kind = required(&options.kind, "MonthlyOptions.Type")?;
                match kind {
                    "ByDays" => {
                        let by_days = required_ref(&options.by_days, "MonthlyOptions.ByDays")?;
                        let day = required_copy(&by_days.days, "MonthlyOptions.ByDays.Days")?;
                        Ok(RecurrencePattern::MonthlyByDay {
                            day_of_month: day_of_month(day)?,
                            every_n_months: required_copy(
                                &by_days.every_months,
                                "MonthlyOptions.ByDays.EveryMonths",
                            )?,
                        })
                    }
                    "ByWeekDays" => {
                        let by_week =
                            required_ref(&options.by_week_days, "MonthlyOptions.ByWeekDays")?;
                        let ordinal =
                            required(&by_week.ordinal, "MonthlyOptions.ByWeekDays.Ordinal")?;
                        let weekday =
                            required(&by_week.week_day, "MonthlyOptions.ByWeekDays.WeekDay")?;
                        Ok(RecurrencePattern::MonthlyByWeek {
                            ordinal: parse_ordinal(ordinal)?,
                            weekday: parse_weekday(weekday)?,
                            every_n_months: required_copy(
                                &by_week.every_months,
                                "MonthlyOptions.ByWeekDays.EveryMonths",
                            )?,
                        })
                    }
                    other => Err(DistributionError::UnknownMonthlyType(other.to_string())),
                }
            }
            other => Err(DistributionError::UnknownPattern(other.to_string())),
        }
    }

    /// Convert into a typed, validated schedule.
    pub fn to_spec(&self) -> Result<ScheduleSpec, DistributionError> {
        let pattern = self.pattern()?;
        let range_options = required_ref(&self.range, "Range")?;
        let tz_options = required_ref(&self.time_zone, "TimeZone")?;
        let range = DateRange::resolve(
            required(&range_options.start_date_at, "Range.StartDateAt")?,
            required(&range_options.end_date_at, "Range.EndDateAt")?,
            required(&tz_options.name, "TimeZone.Name")?,
        )?;
        let start_time = parse_time_of_day(required(&self.start_time, "StartTime")?)?;
        let end_time = self
            .end_time
            .as_deref()
            .map(parse_time_of_day)
            .transpose()?;
        ScheduleSpec::new(pattern, range, start_time, end_time)
    }

    /// Expand the described schedule.
    pub fn distributions(&self) -> Result<Vec<Instance>, DistributionError> {
        self.to_spec()?.distributions()
    }
}

/// Narrow a descriptor day number to a day of month.
pub fn day_of_month(day: u32) -> Result<u8, DistributionError> {
    match u8::try_from(day) {
        Ok(d @ 1..=31) => Ok(d),
        _ => Err(DistributionError::InvalidDayOfMonth(day)),
    }
}
