//! Terminal rendering of command results.
//!
//! Every `render_*` function returns the text instead of printing it so the
//! layout can be tested without a terminal. Widths are measured in display
//! columns, not bytes.

use super::styles;
use chrono::Datelike;
use colored::Colorize;
use qmsview::api::{CmdMessage, ListView, MessageLevel};
use qmsview::config::QmsConfig;
use qmsview::model::Record;
use qmsview::views::{BoardView, CalendarView, GanttScale, GanttView};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const MIN_WIDTH: usize = 60;

const ID_WIDTH: usize = 10;
const KIND_WIDTH: usize = 8;
const STATUS_WIDTH: usize = 11;
const PRIORITY_WIDTH: usize = 8;
const DATE_WIDTH: usize = 10;
const PROGRESS_WIDTH: usize = 4;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MIN_CELL_WIDTH: usize = 8;
const MAX_CELL_WIDTH: usize = 22;

const GANTT_LABEL_WIDTH: usize = 28;
const GANTT_MIN_CHART: usize = 20;
const PX_PER_COLUMN: u32 = 20;
const BAR_DONE: char = '█';
const BAR_REMAINING: char = '░';
const TODAY_MARK: char = '│';

pub(super) fn terminal_width() -> usize {
    console::Term::stdout()
        .size_checked()
        .map(|(_, cols)| cols as usize)
        .unwrap_or(LINE_WIDTH)
        .max(MIN_WIDTH)
}

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    if max_width > 0 {
        result.push('…');
    }
    result
}

/// Truncates or right-pads to exactly `width` display columns.
fn fit(s: &str, width: usize) -> String {
    let cut = truncate_to_width(s, width);
    let padding = width.saturating_sub(cut.width());
    format!("{}{}", cut, " ".repeat(padding))
}

fn record_label(record: &Record) -> String {
    format!("{} {}", record.id, record.title)
}

pub(super) fn render_list(view: &ListView, width: usize) -> String {
    if view.items.is_empty() {
        return String::new();
    }

    let fixed = ID_WIDTH + KIND_WIDTH + STATUS_WIDTH + PRIORITY_WIDTH + DATE_WIDTH + PROGRESS_WIDTH;
    let title_width = width.saturating_sub(fixed + 6).max(10);

    let mut out = String::new();
    let header = format!(
        "{} {} {} {} {} {} {}",
        fit("ID", ID_WIDTH),
        fit("Kind", KIND_WIDTH),
        fit("Title", title_width),
        fit("Status", STATUS_WIDTH),
        fit("Priority", PRIORITY_WIDTH),
        fit("Date", DATE_WIDTH),
        fit("Done", PROGRESS_WIDTH),
    );
    out.push_str(&format!("{}\n", styles::heading().apply_to(header.trim_end())));

    for record in &view.items {
        let line = format!(
            "{} {} {} {} {} {} {:>width$}",
            fit(&record.id, ID_WIDTH),
            fit(record.kind.as_str(), KIND_WIDTH),
            fit(&record.title, title_width),
            styles::status(&record.status).apply_to(fit(&record.status, STATUS_WIDTH)),
            styles::priority(&record.priority).apply_to(fit(&record.priority, PRIORITY_WIDTH)),
            record.date,
            format!("{}%", record.progress),
            width = PROGRESS_WIDTH,
        );
        out.push_str(&line);
        out.push('\n');
    }

    let footer = format!(
        "Showing {}-{} of {} (page {} of {})",
        view.start_index, view.end_index, view.total_items, view.page, view.total_pages
    );
    out.push_str(&format!("{}\n", footer.dimmed()));
    out
}

pub(super) fn render_board(board: &BoardView, width: usize) -> String {
    let title_width = width
        .saturating_sub(2 + ID_WIDTH + PRIORITY_WIDTH + DATE_WIDTH + 3)
        .max(10);

    let mut out = String::new();
    for (i, column) in board.columns.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let heading = format!("{} ({})", column.status, column.records.len());
        out.push_str(&format!(
            "{}\n",
            styles::status(&column.status).bold().apply_to(heading)
        ));

        if column.records.is_empty() {
            out.push_str(&format!("  {}\n", "(none)".dimmed()));
            continue;
        }
        for record in &column.records {
            out.push_str(&format!(
                "  {} {} {} {}\n",
                fit(&record.id, ID_WIDTH),
                fit(&record.title, title_width),
                styles::priority(&record.priority).apply_to(fit(&record.priority, PRIORITY_WIDTH)),
                record.date,
            ));
        }
    }
    out
}

pub(super) fn render_calendar(view: &CalendarView, width: usize) -> String {
    let cell_width = (width.saturating_sub(6) / 7).clamp(MIN_CELL_WIDTH, MAX_CELL_WIDTH);
    let grid_width = cell_width * 7 + 6;

    let mut out = String::new();
    let title = format!("{:^w$}", view.title, w = grid_width);
    out.push_str(&format!("{}\n", styles::heading().apply_to(title.trim_end())));

    let header: Vec<String> = WEEKDAYS.iter().map(|d| fit(d, cell_width)).collect();
    out.push_str(&format!("{}\n", header.join(" ").trim_end().dimmed()));

    for week in view.weeks() {
        out.push_str(&format!("{}\n", "─".repeat(grid_width).dimmed()));

        let days: Vec<String> = week
            .iter()
            .map(|cell| {
                let label = fit(&format!("{:>2}", cell.day.date.day()), cell_width);
                if cell.day.is_today {
                    styles::today().apply_to(label).to_string()
                } else if !cell.day.in_month {
                    styles::outside_month().apply_to(label).to_string()
                } else {
                    label
                }
            })
            .collect();
        out.push_str(&format!("{}\n", days.join(" ").trim_end()));

        let rows = week.iter().map(|c| c.records.len()).max().unwrap_or(0);
        for row in 0..rows {
            let line: Vec<String> = week
                .iter()
                .map(|cell| match cell.records.get(row) {
                    Some(record) => styles::status(&record.status)
                        .apply_to(fit(&record_label(record), cell_width))
                        .to_string(),
                    None => " ".repeat(cell_width),
                })
                .collect();
            out.push_str(&format!("{}\n", line.join(" ").trim_end()));
        }

        if week.iter().any(|c| c.overflow > 0) {
            let line: Vec<String> = week
                .iter()
                .map(|cell| {
                    if cell.overflow > 0 {
                        fit(&format!("+{} more", cell.overflow), cell_width)
                            .dimmed()
                            .to_string()
                    } else {
                        " ".repeat(cell_width)
                    }
                })
                .collect();
            out.push_str(&format!("{}\n", line.join(" ").trim_end()));
        }
    }
    out
}

/// Terminal columns per day: fitted to the width on the month scale,
/// derived from the zoom on the day scale.
fn columns_per_day(view: &GanttView, width: usize) -> f64 {
    match view.scale {
        GanttScale::Month => {
            let chart = width
                .saturating_sub(GANTT_LABEL_WIDTH + 1)
                .max(GANTT_MIN_CHART);
            chart as f64 / view.total_days as f64
        }
        GanttScale::Day { px_per_day } => (px_per_day / PX_PER_COLUMN).max(1) as f64,
    }
}

pub(super) fn render_gantt(view: &GanttView, width: usize) -> String {
    let per_day = columns_per_day(view, width);
    let chart_width = (view.total_days as f64 * per_day).round() as usize;
    let column = |days: f64| (days.max(0.0) * per_day).round() as usize;

    let mut out = String::new();

    let mut header = vec![' '; chart_width];
    let mut next_free = 0;
    for span in &view.months {
        let start = column(view.window.days_from_start(span.start) as f64);
        let label: Vec<char> = span.label.chars().collect();
        if start < next_free || start + label.len() > chart_width {
            continue;
        }
        header[start..start + label.len()].copy_from_slice(&label);
        next_free = start + label.len() + 1;
    }
    let header: String = header.into_iter().collect();
    out.push_str(&format!(
        "{} {}\n",
        " ".repeat(GANTT_LABEL_WIDTH),
        styles::heading().apply_to(header.trim_end())
    ));

    let today_col = view
        .today
        .in_window
        .then(|| column(view.today.offset_days))
        .filter(|&c| c < chart_width);

    for bar in &view.bars {
        let start = column(bar.offset_days as f64).min(chart_width);
        let end = column((bar.offset_days + bar.width_days) as f64)
            .max(start + 1)
            .min(chart_width);
        let done = start + ((end - start) * bar.progress as usize + 50) / 100;

        let mut line = vec![' '; chart_width];
        if let Some(col) = today_col {
            line[col] = TODAY_MARK;
        }
        for (i, slot) in line.iter_mut().enumerate().take(end).skip(start) {
            *slot = if i < done { BAR_DONE } else { BAR_REMAINING };
        }

        let before: String = line[..start].iter().collect();
        let body: String = line[start..end].iter().collect();
        let after: String = line[end..].iter().collect();
        out.push_str(&format!(
            "{} {}{}{}\n",
            fit(&record_label(bar.record), GANTT_LABEL_WIDTH),
            before,
            styles::status(&bar.record.status).apply_to(body),
            after.trim_end()
        ));
    }

    let mut footer = format!(
        "{} to {} ({} days)",
        view.window.start, view.window.end, view.total_days
    );
    if let GanttScale::Day { px_per_day } = view.scale {
        footer.push_str(&format!(", zoom {}px/day", px_per_day));
    }
    if today_col.is_some() {
        footer.push_str(&format!(", {} today", styles::today_marker().apply_to(TODAY_MARK)));
    }
    out.push_str(&format!("{}\n", footer.dimmed()));
    out
}

pub(super) fn render_config(config: &QmsConfig) -> String {
    let mut out = String::new();
    for key in qmsview::config::CONFIG_KEYS {
        let value = config.get(key).unwrap_or_default();
        let value = if value.is_empty() {
            "(unset)".dimmed().to_string()
        } else {
            value
        };
        out.push_str(&format!("{:<18} {}\n", key, value));
    }
    out.push_str(&format!(
        "{:<18} {}\n",
        "board-statuses",
        config.board_statuses.join(", ")
    ));
    out
}
