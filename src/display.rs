use std::fmt;

use crate::ast::*;

impl fmt::Display for TimeOfDay {
    /// 12-hour clock, the same shape the parser accepts: `08:30 PM`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hour, day_part) = match self.hour {
            0 => (12, "AM"),
            h @ 1..=11 => (h, "AM"),
            12 => (12, "PM"),
            h => (h - 12, "PM"),
        };
        write!(f, "{hour:02}:{:02} {day_part}", self.minute)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn every(f: &mut fmt::Formatter<'_>, n: u32, unit: &str) -> fmt::Result {
    if n == 1 {
        write!(f, "every {unit}")
    } else {
        write!(f, "every {n} {unit}s")
    }
}

impl fmt::Display for RecurrencePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurrencePattern::Daily { every_n_days } => every(f, *every_n_days, "day"),
            RecurrencePattern::Weekly {
                every_n_weeks,
                weekdays,
            } => {
                every(f, *every_n_weeks, "week")?;
                let names: Vec<&str> = weekdays.iter().map(|d| d.as_str()).collect();
                write!(f, " on {}", names.join(", "))
            }
            RecurrencePattern::MonthlyByDay {
                day_of_month,
                every_n_months,
            } => {
                write!(f, "day {day_of_month} of ")?;
                every(f, *every_n_months, "month")
            }
            RecurrencePattern::MonthlyByWeek {
                ordinal,
                weekday,
                every_n_months,
            } => {
                write!(f, "{} {weekday} of ", ordinal.as_str().to_lowercase())?;
                every(f, *every_n_months, "month")
            }
        }
    }
}

impl fmt::Display for ScheduleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pattern)?;
        match self.end_time {
            Some(end) => write!(f, " from {} to {end}", self.start_time)?,
            None => write!(f, " at {}", self.start_time)?,
        }
        write!(
            f,
            " between {} and {}",
            self.range.start().date(),
            self.range.end().date()
        )?;
        if let Some(name) = self.range.time_zone().iana_name() {
            write!(f, " in {name}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.end_time {
            Some(end) => write!(f, "{} - {end}", self.start_time),
            None => f.write_str(&self.start_time),
        }
    }
}
