use crate::commands::{CmdMessage, CmdResult};
use crate::filter::{filter_records, FilterCriteria};
use crate::model::Record;
use crate::views::group_by_status;

pub fn run<'a, S: AsRef<str>>(
    records: &'a [Record],
    criteria: &FilterCriteria,
    buckets: &[S],
) -> CmdResult<'a> {
    let filtered = filter_records(records, criteria);
    let board = group_by_status(&filtered, buckets);
    tracing::debug!(
        matched = filtered.len(),
        placed = board.placed(),
        unrecognized = board.unrecognized,
        "board view"
    );

    let mut result = CmdResult::default();
    if board.unrecognized > 0 {
        result.add_message(CmdMessage::warning(format!(
            "{} record(s) with a status outside the board columns are not shown.",
            board.unrecognized
        )));
    }
    result.with_board(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Facet, RecordKind};
    use crate::views::DEFAULT_BOARD_STATUSES;

    fn records() -> Vec<Record> {
        vec![
            Record::new("1", RecordKind::Task, "one").with_status("Pending"),
            Record::new("2", RecordKind::Task, "two").with_status("Completed"),
            Record::new("3", RecordKind::Document, "three").with_status("Draft"),
        ]
    }

    #[test]
    fn groups_filtered_records() {
        let records = records();
        let criteria = FilterCriteria::new().with_facet(Facet::Status, "Completed");
        let result = run(&records, &criteria, &DEFAULT_BOARD_STATUSES);

        let board = result.board.unwrap();
        assert!(board.column("Pending").unwrap().records.is_empty());
        assert_eq!(board.column("Completed").unwrap().records[0].id, "2");
        assert!(result.messages.is_empty());
    }

    #[test]
    fn warns_about_unplaced_records() {
        let records = records();
        let result = run(&records, &FilterCriteria::new(), &DEFAULT_BOARD_STATUSES);

        let board = result.board.as_ref().unwrap();
        assert_eq!(board.unrecognized, 1);
        assert_eq!(board.placed() + board.unrecognized, records.len());
        assert_eq!(result.messages.len(), 1);
    }
}
