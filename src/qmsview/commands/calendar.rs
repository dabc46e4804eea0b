use crate::commands::{CmdMessage, CmdResult};
use crate::filter::{filter_records, FilterCriteria};
use crate::model::Record;
use crate::views::calendar::{project_calendar, CalendarMonth};
use chrono::NaiveDate;

pub fn run<'a>(
    records: &'a [Record],
    criteria: &FilterCriteria,
    month: CalendarMonth,
    today: NaiveDate,
    visible: usize,
) -> CmdResult<'a> {
    let filtered = filter_records(records, criteria);
    let view = project_calendar(&filtered, month, today, visible);

    let on_grid: usize = view
        .cells
        .iter()
        .map(|c| c.records.len() + c.overflow)
        .sum();
    tracing::debug!(matched = filtered.len(), on_grid, month = %month, "calendar view");

    let mut result = CmdResult::default();
    if on_grid == 0 {
        result.add_message(CmdMessage::info(format!(
            "No records fall within {}.",
            view.title
        )));
    }
    result.with_calendar(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{parse_iso_date, RecordKind};

    fn rec(id: &str, due: &str) -> Record {
        Record::new(id, RecordKind::Task, id)
            .with_status("Pending")
            .with_date(parse_iso_date(due).unwrap())
    }

    #[test]
    fn builds_month_with_records() {
        let records = vec![rec("a", "2026-01-05"), rec("b", "2026-01-05"), rec("c", "2026-01-05")];
        let result = run(
            &records,
            &FilterCriteria::new(),
            CalendarMonth::new(2026, 1).unwrap(),
            parse_iso_date("2026-01-05").unwrap(),
            2,
        );

        let view = result.calendar.unwrap();
        assert_eq!(view.cells.len(), 42);
        let cell = view.cells.iter().find(|c| c.day.is_today).unwrap();
        assert_eq!(cell.records.len(), 2);
        assert_eq!(cell.overflow, 1);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn empty_month_reports_message() {
        let records = vec![rec("a", "2026-05-05")];
        let result = run(
            &records,
            &FilterCriteria::new(),
            CalendarMonth::new(2026, 1).unwrap(),
            parse_iso_date("2026-01-05").unwrap(),
            2,
        );
        assert_eq!(result.calendar.as_ref().unwrap().cells.len(), 42);
        assert!(result.messages[0].content.contains("January 2026"));
    }
}
