use crate::commands::{CmdMessage, CmdResult};
use crate::filter::{filter_records, FilterCriteria};
use crate::model::Record;
use crate::views::gantt::{project_gantt, GanttScale, EMPTY_WINDOW_DAYS};
use chrono::NaiveDateTime;

pub fn run<'a>(
    records: &'a [Record],
    criteria: &FilterCriteria,
    scale: GanttScale,
    padding_days: u32,
    now: NaiveDateTime,
) -> CmdResult<'a> {
    let filtered = filter_records(records, criteria);
    let view = project_gantt(&filtered, scale, padding_days, now);
    tracing::debug!(
        bars = view.bars.len(),
        start = %view.window.start,
        end = %view.window.end,
        "gantt view"
    );

    let mut result = CmdResult::default();
    if view.bars.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No records to chart; showing the next {} days.",
            EMPTY_WINDOW_DAYS
        )));
    }
    result.with_gantt(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{parse_iso_date, Facet, RecordKind};

    fn rec(id: &str, status: &str, due: &str) -> Record {
        Record::new(id, RecordKind::Task, id)
            .with_status(status)
            .with_date(parse_iso_date(due).unwrap())
    }

    fn now() -> NaiveDateTime {
        parse_iso_date("2026-01-15")
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn charts_filtered_records() {
        let records = vec![
            rec("a", "Pending", "2026-01-01"),
            rec("b", "Completed", "2026-03-01"),
        ];
        let result = run(&records, &FilterCriteria::new(), GanttScale::Month, 7, now());
        let view = result.gantt.unwrap();
        assert_eq!(view.bars.len(), 2);
        assert_eq!(view.window.start, parse_iso_date("2025-12-25").unwrap());
        assert_eq!(view.window.end, parse_iso_date("2026-03-08").unwrap());
    }

    #[test]
    fn filter_shrinks_window() {
        let records = vec![
            rec("a", "Pending", "2026-01-01"),
            rec("b", "Completed", "2026-03-01"),
        ];
        let criteria = FilterCriteria::new().with_facet(Facet::Status, "Completed");
        let view = run(&records, &criteria, GanttScale::day(40), 7, now())
            .gantt
            .unwrap();
        assert_eq!(view.bars.len(), 1);
        assert_eq!(view.total_days, 14);
    }

    #[test]
    fn empty_selection_uses_default_window() {
        let result = run(&[], &FilterCriteria::new(), GanttScale::Month, 7, now());
        assert_eq!(result.gantt.as_ref().unwrap().total_days, 60);
        assert_eq!(result.messages.len(), 1);
    }
}
