//! Gantt timeline projection.
//!
//! The window spans every record date with `padding_days` on each side, or
//! `EMPTY_WINDOW_DAYS` from today when there is nothing to lay out. Every
//! bar covers a fixed `BAR_DAYS` ending on the record's date, so the leading
//! padding is never less than `BAR_DAYS`. Positions are
//! reported as percentages of the window (month scale) or as pixels at a
//! clamped zoom level (day scale).

use crate::model::Record;
use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};
use serde::Serialize;

pub const DEFAULT_PADDING_DAYS: u32 = 7;
pub const EMPTY_WINDOW_DAYS: u32 = 60;
pub const BAR_DAYS: u32 = 7;

pub const MIN_PX_PER_DAY: u32 = 30;
pub const MAX_PX_PER_DAY: u32 = 150;
pub const DEFAULT_PX_PER_DAY: u32 = 40;
pub const ZOOM_STEP: u32 = 10;

pub fn clamp_zoom(px_per_day: u32) -> u32 {
    px_per_day.clamp(MIN_PX_PER_DAY, MAX_PX_PER_DAY)
}

pub fn zoom_in(px_per_day: u32) -> u32 {
    clamp_zoom(px_per_day.saturating_add(ZOOM_STEP))
}

pub fn zoom_out(px_per_day: u32) -> u32 {
    clamp_zoom(px_per_day.saturating_sub(ZOOM_STEP))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "scale", rename_all = "lowercase")]
pub enum GanttScale {
    Month,
    Day { px_per_day: u32 },
}

impl GanttScale {
    pub fn day(px_per_day: u32) -> Self {
        GanttScale::Day {
            px_per_day: clamp_zoom(px_per_day),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelineWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimelineWindow {
    pub fn total_days(&self) -> i64 {
        self.end.signed_duration_since(self.start).num_days().max(1)
    }

    pub fn days_from_start(&self, date: NaiveDate) -> i64 {
        date.signed_duration_since(self.start).num_days()
    }
}

fn shift(date: NaiveDate, days: i64) -> NaiveDate {
    let magnitude = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    };
    shifted.unwrap_or(date)
}

pub fn timeline_window(records: &[&Record], padding_days: u32, today: NaiveDate) -> TimelineWindow {
    let min = records.iter().map(|r| r.date).min();
    let max = records.iter().map(|r| r.date).max();
    match (min, max) {
        (Some(min), Some(max)) => TimelineWindow {
            start: shift(min, -(padding_days.max(BAR_DAYS) as i64)),
            end: shift(max, padding_days as i64),
        },
        _ => TimelineWindow {
            start: today,
            end: shift(today, EMPTY_WINDOW_DAYS as i64),
        },
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GanttBar<'a> {
    pub record: &'a Record,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub offset_days: i64,
    pub width_days: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_px: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width_px: Option<f64>,
    pub progress: u8,
}

/// Where "now" falls in the window, as a continuous offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TodayMarker {
    pub offset_days: f64,
    pub offset_pct: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_px: Option<f64>,
    pub in_window: bool,
}

/// One month label across the top of a month-scale chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSpan {
    pub label: String,
    pub start: NaiveDate,
    pub offset_pct: f64,
    pub width_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GanttView<'a> {
    pub window: TimelineWindow,
    pub total_days: i64,
    pub scale: GanttScale,
    pub bars: Vec<GanttBar<'a>>,
    pub today: TodayMarker,
    pub months: Vec<MonthSpan>,
    /// Full chart width in pixels on the day scale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width_px: Option<f64>,
}

fn pct(days: f64, total: i64) -> f64 {
    days / total as f64 * 100.0
}

fn bar<'a>(record: &'a Record, window: &TimelineWindow, scale: GanttScale) -> GanttBar<'a> {
    let start = shift(record.date, -(BAR_DAYS as i64));
    let offset_days = window.days_from_start(start);
    let width_days = BAR_DAYS as i64;
    let total = window.total_days();

    let (offset_pct, width_pct, offset_px, width_px) = match scale {
        GanttScale::Month => (
            Some(pct(offset_days as f64, total)),
            Some(pct(width_days as f64, total)),
            None,
            None,
        ),
        GanttScale::Day { px_per_day } => (
            None,
            None,
            Some(offset_days as f64 * px_per_day as f64),
            Some(width_days as f64 * px_per_day as f64),
        ),
    };

    GanttBar {
        record,
        start,
        end: record.date,
        offset_days,
        width_days,
        offset_pct,
        width_pct,
        offset_px,
        width_px,
        progress: record.progress.min(100),
    }
}

pub fn today_marker(window: &TimelineWindow, now: NaiveDateTime, scale: GanttScale) -> TodayMarker {
    let origin = window.start.and_hms_opt(0, 0, 0).unwrap_or_default();
    let seconds = now.signed_duration_since(origin).num_seconds() as f64;
    let offset_days = seconds / 86_400.0;
    let total = window.total_days();

    TodayMarker {
        offset_days,
        offset_pct: pct(offset_days, total),
        offset_px: match scale {
            GanttScale::Month => None,
            GanttScale::Day { px_per_day } => Some(offset_days * px_per_day as f64),
        },
        in_window: offset_days >= 0.0 && offset_days <= total as f64,
    }
}

/// Months that intersect the window, clipped to it.
pub fn month_spans(window: &TimelineWindow) -> Vec<MonthSpan> {
    let total = window.total_days();
    let mut spans = Vec::new();
    let mut cursor = window.start;

    while cursor < window.end {
        let next_month = if cursor.month() == 12 {
            NaiveDate::from_ymd_opt(cursor.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(cursor.year(), cursor.month() + 1, 1)
        };
        let Some(next_month) = next_month else {
            break;
        };
        let span_end = next_month.min(window.end);
        let offset = window.days_from_start(cursor) as f64;
        let width = span_end.signed_duration_since(cursor).num_days() as f64;

        spans.push(MonthSpan {
            label: cursor.format("%b %Y").to_string(),
            start: cursor,
            offset_pct: pct(offset, total),
            width_pct: pct(width, total),
        });
        cursor = span_end;
    }

    spans
}

pub fn project_gantt<'a>(
    records: &[&'a Record],
    scale: GanttScale,
    padding_days: u32,
    now: NaiveDateTime,
) -> GanttView<'a> {
    let scale = match scale {
        GanttScale::Day { px_per_day } => GanttScale::day(px_per_day),
        GanttScale::Month => GanttScale::Month,
    };
    let window = timeline_window(records, padding_days, now.date());
    let total_days = window.total_days();

    GanttView {
        window,
        total_days,
        scale,
        bars: records.iter().map(|&r| bar(r, &window, scale)).collect(),
        today: today_marker(&window, now, scale),
        months: month_spans(&window),
        width_px: match scale {
            GanttScale::Month => None,
            GanttScale::Day { px_per_day } => Some(total_days as f64 * px_per_day as f64),
        },
    }
}
