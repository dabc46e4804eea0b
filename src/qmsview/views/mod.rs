//! # View Projections
//!
//! Alternate presentations of the same filtered selection. Each projection
//! takes the full filtered set (never a page of it), borrows the records,
//! and returns a self-contained structure the UI can draw directly:
//!
//! - [`board`]: status columns
//! - [`calendar`]: a 6x7 month grid with per-day records
//! - [`gantt`]: a padded timeline with fixed-length bars
//!
//! All projections are total: an empty selection yields empty columns,
//! empty cells, or a default-width timeline.

pub mod board;
pub mod calendar;
pub mod gantt;

pub use board::{group_by_status, BoardColumn, BoardView, DEFAULT_BOARD_STATUSES};
pub use calendar::{project_calendar, CalendarMonth, CalendarView, DayCell};
pub use gantt::{project_gantt, GanttScale, GanttView};
