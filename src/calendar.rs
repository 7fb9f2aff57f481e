//! Month grids and the offset resolvers built on them.
//!
//! A [`MonthGrid`] lays a month out as 7-wide week rows, padding cells outside
//! the month with `0`. The weekday opening each row is given by [`WeekStart`];
//! expansion always uses [`WeekStart::Sunday`].

use jiff::civil::Date;
use jiff::Span;

use crate::ast::{Ordinal, Weekday};
use crate::error::DistributionError;

/// First day of a calendar week row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// Column of `weekday` in a row opened by this week start.
    pub fn column_of(self, weekday: Weekday) -> usize {
        let sunday_based = weekday.sunday_zero_offset() as usize;
        match self {
            WeekStart::Sunday => sunday_based,
            WeekStart::Monday => (sunday_based + 6) % 7,
        }
    }
}

/// A month's days arranged in week rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    rows: Vec<[u8; 7]>,
    week_start: WeekStart,
}

impl MonthGrid {
    pub fn new(year: i16, month: i8, week_start: WeekStart) -> Result<Self, DistributionError> {
        let first = Date::new(year, month, 1)?;
        Ok(Self::for_date(first, week_start))
    }

    /// Grid of the month containing `date`.
    pub fn for_date(date: Date, week_start: WeekStart) -> Self {
        let first = date.first_of_month();
        let lead = week_start.column_of(Weekday::from_jiff(first.weekday()));
        let days = first.days_in_month() as u8;

        let mut rows = Vec::with_capacity(6);
        let mut row = [0u8; 7];
        let mut col = lead;
        for day in 1..=days {
            row[col] = day;
            col += 1;
            if col == 7 {
                rows.push(row);
                row = [0u8; 7];
                col = 0;
            }
        }
        if col > 0 {
            rows.push(row);
        }

        Self { rows, week_start }
    }

    pub fn rows(&self) -> &[[u8; 7]] {
        &self.rows
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    /// Cell value for `weekday` in row `row` (0 for padding).
    pub fn day_at(&self, row: usize, weekday: Weekday) -> Option<u8> {
        self.rows
            .get(row)
            .map(|r| r[self.week_start.column_of(weekday)])
    }

    /// Row and column holding `day`.
    pub fn position_of(&self, day: u8) -> Option<(usize, usize)> {
        if day == 0 {
            return None;
        }
        self.rows
            .iter()
            .enumerate()
            .find_map(|(i, r)| r.iter().position(|&d| d == day).map(|c| (i, c)))
    }
}

/// Result of resolving weekday offsets within the week of an anchor date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekOffsets {
    /// Days from the anchor to each requested weekday, in request order.
    pub offsets: Vec<i64>,
    /// Padding cells in the anchor's row, set only when no offsets resolved.
    pub skip_days: i64,
    /// Zero-based week row of the anchor within its month.
    pub row: usize,
}

/// Offsets from `anchor` to each of `weekdays` inside the anchor's week row.
///
/// Offsets are negative for weekdays earlier in the row than the anchor.
pub fn weekly_offsets(
    weekdays: &[Weekday],
    anchor: Date,
    week_start: WeekStart,
) -> Result<WeekOffsets, DistributionError> {
    let grid = MonthGrid::for_date(anchor, week_start);
    let missing = || DistributionError::Calendar(format!("{anchor} missing from month grid"));
    let (row, anchor_col) = grid.position_of(anchor.day() as u8).ok_or_else(missing)?;

    let offsets: Vec<i64> = weekdays
        .iter()
        .map(|wd| week_start.column_of(*wd) as i64 - anchor_col as i64)
        .collect();

    let skip_days = if offsets.is_empty() {
        grid.rows()[row].iter().filter(|&&d| d == 0).count() as i64
    } else {
        0
    };

    Ok(WeekOffsets {
        offsets,
        skip_days,
        row,
    })
}

/// Offset from `anchor` to `day_of_month` in the anchor's month, clamped to
/// the month's last day.
pub fn monthly_offset_by_day(day_of_month: u8, anchor: Date) -> i64 {
    let last = anchor.days_in_month() as u8;
    let target = day_of_month.min(last);
    i64::from(target) - i64::from(anchor.day())
}

/// Day of month of the `ordinal` occurrence of `weekday`.
pub fn ordinal_weekday_day(grid: &MonthGrid, ordinal: Ordinal, weekday: Weekday) -> Option<u8> {
    match ordinal.position() {
        None => {
            let last_row = grid.rows().len().checked_sub(1)?;
            match grid.day_at(last_row, weekday)? {
                0 => grid.day_at(last_row.checked_sub(1)?, weekday),
                day => Some(day),
            }
        }
        Some(n) => grid
            .rows()
            .iter()
            .map(|r| r[grid.week_start().column_of(weekday)])
            .filter(|&d| d != 0)
            .nth(n),
    }
}

/// Offset from `anchor` to the `ordinal` `weekday` of the anchor's month.
pub fn monthly_offset_by_week(
    ordinal: Ordinal,
    weekday: Weekday,
    anchor: Date,
    week_start: WeekStart,
) -> Result<i64, DistributionError> {
    let grid = MonthGrid::for_date(anchor, week_start);
    let day = ordinal_weekday_day(&grid, ordinal, weekday).ok_or_else(|| {
        DistributionError::Calendar(format!(
            "no {} {} in {}-{:02}",
            ordinal.as_str(),
            weekday.as_str(),
            anchor.year(),
            anchor.month()
        ))
    })?;
    Ok(i64::from(day) - i64::from(anchor.day()))
}

/// Total days in the `every_n_months` months starting with the anchor's month.
pub fn month_step_length(every_n_months: u32, anchor: Date) -> Result<i64, DistributionError> {
    let first = anchor.first_of_month();
    let mut total = 0i64;
    for step in 0..every_n_months {
        let month = first.checked_add(Span::new().try_months(step)?)?;
        total += i64::from(month.days_in_month());
    }
    Ok(total)
}
