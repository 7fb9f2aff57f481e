use std::collections::HashSet;

use jiff::civil::Date;
use jiff::Span;
use tracing::{debug, trace};

use crate::ast::*;
use crate::calendar::{
    month_step_length, monthly_offset_by_day, monthly_offset_by_week, weekly_offsets, WeekStart,
};
use crate::error::DistributionError;

/// Week rows always open on Sunday when expanding schedules.
const WEEK_START: WeekStart = WeekStart::Sunday;

/// Expand a schedule into its instances, in chronological order.
pub fn distributions(spec: &ScheduleSpec) -> Result<Vec<Instance>, DistributionError> {
    spec.pattern.validate()?;
    debug!(
        pattern = ?spec.pattern,
        start = %spec.range.start(),
        end = %spec.range.end(),
        "expanding schedule"
    );

    let instances = match &spec.pattern {
        RecurrencePattern::Daily { every_n_days } => daily(spec, *every_n_days),
        RecurrencePattern::Weekly {
            every_n_weeks,
            weekdays,
        } => weekly(spec, *every_n_weeks, weekdays),
        RecurrencePattern::MonthlyByDay {
            day_of_month,
            every_n_months,
        } => monthly(spec, *every_n_months, |anchor| {
            Ok(monthly_offset_by_day(*day_of_month, anchor))
        }),
        RecurrencePattern::MonthlyByWeek {
            ordinal,
            weekday,
            every_n_months,
        } => monthly(spec, *every_n_months, |anchor| {
            monthly_offset_by_week(*ordinal, *weekday, anchor, WEEK_START)
        }),
    }?;

    debug!(count = instances.len(), "schedule expanded");
    Ok(instances)
}

/// Build the instance `day` days after the range start, if it lands in range.
fn instance_at(spec: &ScheduleSpec, day: i64) -> Result<Option<Instance>, DistributionError> {
    let range = &spec.range;
    let start = range.shifted(day, spec.start_time.to_jiff()?)?;
    if !range.admits(&start)? {
        trace!(%start, "instance outside range");
        return Ok(None);
    }

    // The end is resolved on the start's day first, so a DST gap on that day
    // pushes it forward before any midnight rollover is applied.
    let end = match spec.end_time {
        Some(end_time) => {
            let same_day = range.shifted(day, end_time.to_jiff()?)?;
            if end_time.crosses_midnight_after(spec.start_time) {
                Some(same_day.checked_add(Span::new().days(1))?)
            } else {
                Some(same_day)
            }
        }
        None => None,
    };

    trace!(%start, "instance emitted");
    Ok(Some(Instance::from_zoned(&start, end.as_ref())))
}

fn daily(spec: &ScheduleSpec, every_n_days: u32) -> Result<Vec<Instance>, DistributionError> {
    let span = spec.range.day_span()?;
    let mut out = Vec::new();
    for day in (0..=span).step_by(every_n_days as usize) {
        if let Some(instance) = instance_at(spec, day)? {
            out.push(instance);
        }
    }
    Ok(out)
}

fn weekly(
    spec: &ScheduleSpec,
    every_n_weeks: u32,
    weekdays: &[Weekday],
) -> Result<Vec<Instance>, DistributionError> {
    // Earliest column first so each week's instances come out in order.
    let mut days = weekdays.to_vec();
    days.sort_by_key(|wd| WEEK_START.column_of(*wd));
    days.dedup();

    let span = spec.range.day_span()?;
    let first = weekly_offsets(&days, spec.range.start().date(), WEEK_START)?;
    let first_week = if first.offsets.is_empty() {
        first.skip_days + 7
    } else {
        0
    };

    let stride = 7 * every_n_weeks as usize;
    let mut seen_weeks: HashSet<(i16, i8, usize)> = HashSet::new();
    let mut out = Vec::new();

    for day in (first_week..span + 7).step_by(stride) {
        let anchor = spec.range.date_at(day)?;
        let week = weekly_offsets(&days, anchor, WEEK_START)?;
        if !seen_weeks.insert((anchor.year(), anchor.month(), week.row)) {
            trace!(%anchor, row = week.row, "week already expanded");
            continue;
        }
        for offset in week.offsets {
            if let Some(instance) = instance_at(spec, day + offset)? {
                out.push(instance);
            }
        }
    }
    Ok(out)
}

/// Shared walk for both monthly patterns. `offset_of` maps a day of the walk
/// to the offset of that month's target day.
fn monthly<F>(
    spec: &ScheduleSpec,
    every_n_months: u32,
    offset_of: F,
) -> Result<Vec<Instance>, DistributionError>
where
    F: Fn(Date) -> Result<i64, DistributionError>,
{
    let span = spec.range.day_span()?;
    let mut stepper = MonthStepper::new();
    let mut out = Vec::new();

    for day in 0..span + 31 {
        let anchor = spec.range.date_at(day)?;
        let step_length = month_step_length(every_n_months, anchor)?;
        if stepper.advance(step_length, anchor.day()) == Step::Skip {
            continue;
        }
        let offset = offset_of(anchor)?;
        trace!(%anchor, offset, "monthly window opened");
        if let Some(instance) = instance_at(spec, day + offset)? {
            out.push(instance);
        }
    }
    Ok(out)
}

/// Outcome of one day of the monthly walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Emit,
    Skip,
}

/// Counts down the days left in the current `every_n_months` window so that
/// exactly one day per window emits an instance.
///
/// The counter is `-1` when idle, is loaded with the days remaining in the
/// window on an emitting day, then ticks down once per day. Reaching `0`
/// costs one extra idle day before the next window can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthStepper {
    counter: i64,
}

impl Default for MonthStepper {
    fn default() -> Self {
        Self::new()
    }
}

impl MonthStepper {
    pub fn new() -> Self {
        Self { counter: -1 }
    }

    pub fn counter(&self) -> i64 {
        self.counter
    }

    /// Feed one walked day: the length in days of the window starting at that
    /// day's month and the day's day of month.
    pub fn advance(&mut self, step_length: i64, day_of_month: i8) -> Step {
        let day_of_month = i64::from(day_of_month);
        let threshold = step_length - day_of_month + 1;
        match self.counter {
            0 => {
                self.counter = -1;
                Step::Skip
            }
            -1 => {
                self.counter = threshold;
                Step::Emit
            }
            c if c < threshold || !(c == threshold && day_of_month == 1) => {
                self.counter -= 1;
                Step::Skip
            }
            _ => Step::Emit,
        }
    }
}
