#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DistributionError;
use crate::range::DateRange;

/// A fully typed schedule: what repeats, at which time of day, over which
/// range.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleSpec {
    pub pattern: RecurrencePattern,
    pub start_time: TimeOfDay,
    pub end_time: Option<TimeOfDay>,
    pub range: DateRange,
}

impl ScheduleSpec {
    pub fn new(
        pattern: RecurrencePattern,
        range: DateRange,
        start_time: TimeOfDay,
        end_time: Option<TimeOfDay>,
    ) -> Result<Self, DistributionError> {
        pattern.validate()?;
        Ok(Self {
            pattern,
            start_time,
            end_time,
            range,
        })
    }
}

/// The recurrence rule family of a schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurrencePattern {
    /// Every N days, starting on the range start.
    Daily { every_n_days: u32 },
    /// The given weekdays of every N-th week.
    Weekly {
        every_n_weeks: u32,
        weekdays: Vec<Weekday>,
    },
    /// A fixed day of every N-th month, clamped to the month length.
    MonthlyByDay {
        day_of_month: u8,
        every_n_months: u32,
    },
    /// `second monday of every 3 months`
    MonthlyByWeek {
        ordinal: Ordinal,
        weekday: Weekday,
        every_n_months: u32,
    },
}

impl RecurrencePattern {
    /// Reject step counts of zero and days of month outside `1..=31`.
    pub fn validate(&self) -> Result<(), DistributionError> {
        let (field, value) = match self {
            Self::Daily { every_n_days } => ("every_n_days", *every_n_days),
            Self::Weekly { every_n_weeks, .. } => ("every_n_weeks", *every_n_weeks),
            Self::MonthlyByDay {
                day_of_month,
                every_n_months,
            } => {
                let day = u32::from(*day_of_month);
                if !(1..=31).contains(&day) {
                    return Err(DistributionError::InvalidDayOfMonth(day));
                }
                ("every_n_months", *every_n_months)
            }
            Self::MonthlyByWeek { every_n_months, .. } => ("every_n_months", *every_n_months),
        };
        if value == 0 {
            return Err(DistributionError::InvalidStep { field, value });
        }
        Ok(())
    }
}

/// Time of day (24-hour clock).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl TimeOfDay {
    /// Fields are checked when the time is converted, not here.
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    pub fn to_jiff(self) -> Result<jiff::civil::Time, DistributionError> {
        let hour = i8::try_from(self.hour).unwrap_or(i8::MAX);
        let minute = i8::try_from(self.minute).unwrap_or(i8::MAX);
        Ok(jiff::civil::Time::new(hour, minute, 0, 0)?)
    }

    /// An end time whose hour is before the start hour belongs to the next day.
    pub fn crosses_midnight_after(self, start: TimeOfDay) -> bool {
        self.hour < start.hour
    }
}

/// Day of week, ordered Sunday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sunday => "Sunday",
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
        }
    }

    /// Zero-based index counting from Sunday.
    pub fn sunday_zero_offset(self) -> u8 {
        self as u8
    }

    pub fn to_jiff(self) -> jiff::civil::Weekday {
        match self {
            Self::Sunday => jiff::civil::Weekday::Sunday,
            Self::Monday => jiff::civil::Weekday::Monday,
            Self::Tuesday => jiff::civil::Weekday::Tuesday,
            Self::Wednesday => jiff::civil::Weekday::Wednesday,
            Self::Thursday => jiff::civil::Weekday::Thursday,
            Self::Friday => jiff::civil::Weekday::Friday,
            Self::Saturday => jiff::civil::Weekday::Saturday,
        }
    }

    pub fn from_jiff(wd: jiff::civil::Weekday) -> Self {
        match wd {
            jiff::civil::Weekday::Sunday => Self::Sunday,
            jiff::civil::Weekday::Monday => Self::Monday,
            jiff::civil::Weekday::Tuesday => Self::Tuesday,
            jiff::civil::Weekday::Wednesday => Self::Wednesday,
            jiff::civil::Weekday::Thursday => Self::Thursday,
            jiff::civil::Weekday::Friday => Self::Friday,
            jiff::civil::Weekday::Saturday => Self::Saturday,
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for Weekday {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Weekday {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        crate::parser::parse_weekday(&s).map_err(serde::de::Error::custom)
    }
}

/// Which occurrence of a weekday within a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordinal {
    First,
    Second,
    Third,
    Fourth,
    Last,
}

impl Ordinal {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::First => "First",
            Self::Second => "Second",
            Self::Third => "Third",
            Self::Fourth => "Fourth",
            Self::Last => "Last",
        }
    }

    /// Zero-based position among the month's occurrences, `None` for `Last`.
    pub fn position(self) -> Option<usize> {
        match self {
            Self::First => Some(0),
            Self::Second => Some(1),
            Self::Third => Some(2),
            Self::Fourth => Some(3),
            Self::Last => None,
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for Ordinal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Ordinal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        crate::parser::parse_ordinal(&s).map_err(serde::de::Error::custom)
    }
}

/// One concrete occurrence of a schedule, in local civil time.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance {
    pub start_time: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub end_time: Option<String>,
}

/// `YYYY-MM-DD HH:mm`, the format of every instance timestamp.
pub const INSTANCE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

impl Instance {
    pub fn from_zoned(start: &jiff::Zoned, end: Option<&jiff::Zoned>) -> Self {
        Self {
            start_time: start.strftime(INSTANCE_TIME_FORMAT).to_string(),
            end_time: end.map(|e| e.strftime(INSTANCE_TIME_FORMAT).to_string()),
        }
    }

    /// Calendar date of the start time.
    pub fn start_date(&self) -> Option<jiff::civil::Date> {
        self.start_time.get(..10)?.parse().ok()
    }
}
