//! Month calendar projection.
//!
//! A month always renders as six Sunday-first weeks (42 cells): the tail of
//! the previous month, every day of the month, then the head of the next one.

use crate::error::{QmsError, Result};
use crate::model::Record;
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

pub const GRID_CELLS: usize = 42;
pub const DEFAULT_VISIBLE_PER_CELL: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct CalendarMonth {
    year: i32,
    month: u32,
}

impl CalendarMonth {
    /// Rejects months outside 1-12 and months whose 42-cell grid would
    /// leave chrono's date range.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) || grid_bounds(year, month).is_none() {
            return Err(QmsError::InvalidMonth { year, month });
        }
        Ok(Self { year, month })
    }

    pub fn containing(date: NaiveDate) -> Result<Self> {
        Self::new(date.year(), date.month())
    }

    /// Parses `YYYY-MM`.
    pub fn parse(s: &str) -> Result<Self> {
        let malformed = || QmsError::MalformedMonth(s.to_string());
        let (y, m) = s.trim().split_once('-').ok_or_else(malformed)?;
        let year: i32 = y.parse().map_err(|_| malformed())?;
        let month: u32 = m.parse().map_err(|_| malformed())?;
        Self::new(year, month)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn next(&self) -> Result<Self> {
        if self.month == 12 {
            let year = self
                .year
                .checked_add(1)
                .ok_or(QmsError::InvalidMonth { year: self.year, month: 13 })?;
            Self::new(year, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    pub fn prev(&self) -> Result<Self> {
        if self.month == 1 {
            let year = self
                .year
                .checked_sub(1)
                .ok_or(QmsError::InvalidMonth { year: self.year, month: 0 })?;
            Self::new(year, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn days_in_month(&self) -> u32 {
        let first = self.first_day();
        first
            .checked_add_months(Months::new(1))
            .and_then(|next| u32::try_from(next.signed_duration_since(first).num_days()).ok())
            .unwrap_or_default()
    }

    pub fn title(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// First and last day of the grid for a month, if both are representable.
fn grid_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let lead = first.weekday().num_days_from_sunday() as u64;
    let start = first.checked_sub_days(Days::new(lead))?;
    let end = start.checked_add_days(Days::new(GRID_CELLS as u64 - 1))?;
    Some((start, end))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub iso: String,
    pub in_month: bool,
    pub is_today: bool,
}

/// Builds the 42-cell grid for `month`, tagging the cell that equals `today`.
pub fn month_grid(month: CalendarMonth, today: NaiveDate) -> Vec<DayCell> {
    let start = grid_bounds(month.year, month.month)
        .map(|(start, _)| start)
        .unwrap_or_else(|| month.first_day());

    start
        .iter_days()
        .take(GRID_CELLS)
        .map(|date| DayCell {
            date,
            iso: date.format("%Y-%m-%d").to_string(),
            in_month: date.month() == month.month() && date.year() == month.year(),
            is_today: date == today,
        })
        .collect()
}

/// Groups records by exact date, keeping source order within each day.
pub fn group_by_date<'a>(records: &[&'a Record]) -> BTreeMap<NaiveDate, Vec<&'a Record>> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&'a Record>> = BTreeMap::new();
    for &record in records {
        by_date.entry(record.date).or_default().push(record);
    }
    by_date
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarCell<'a> {
    #[serde(flatten)]
    pub day: DayCell,
    pub records: Vec<&'a Record>,
    /// Records on this day that did not fit in the visible slots.
    pub overflow: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarView<'a> {
    pub month: CalendarMonth,
    pub title: String,
    pub cells: Vec<CalendarCell<'a>>,
}

impl<'a> CalendarView<'a> {
    pub fn weeks(&self) -> std::slice::Chunks<'_, CalendarCell<'a>> {
        self.cells.chunks(7)
    }
}

pub fn project_calendar<'a>(
    records: &[&'a Record],
    month: CalendarMonth,
    today: NaiveDate,
    visible: usize,
) -> CalendarView<'a> {
    let by_date = group_by_date(records);
    let cells = month_grid(month, today)
        .into_iter()
        .map(|day| {
            let on_day = by_date.get(&day.date).map(Vec::as_slice).unwrap_or(&[]);
            let shown = on_day.len().min(visible);
            CalendarCell {
                records: on_day[..shown].to_vec(),
                overflow: on_day.len() - shown,
                day,
            }
        })
        .collect();

    CalendarView {
        month,
        title: month.title(),
        cells,
    }
}
