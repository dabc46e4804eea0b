use crate::model::Record;
use serde::Serialize;

/// Status buckets shown on the board, in column order.
pub const DEFAULT_BOARD_STATUSES: [&str; 4] = ["Pending", "In-Progress", "Reviewing", "Completed"];

#[derive(Debug, Clone, Serialize)]
pub struct BoardColumn<'a> {
    pub status: String,
    pub records: Vec<&'a Record>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardView<'a> {
    pub columns: Vec<BoardColumn<'a>>,
    /// Records whose status matches no column. They are left off the board.
    pub unrecognized: usize,
}

impl<'a> BoardView<'a> {
    pub fn column(&self, status: &str) -> Option<&BoardColumn<'a>> {
        self.columns.iter().find(|c| c.status == status)
    }

    pub fn placed(&self) -> usize {
        self.columns.iter().map(|c| c.records.len()).sum()
    }
}

/// Groups records into the given status buckets, keeping each record's
/// relative order inside its column. Duplicate bucket names collapse into
/// the first occurrence.
pub fn group_by_status<'a, S: AsRef<str>>(records: &[&'a Record], buckets: &[S]) -> BoardView<'a> {
    let mut columns: Vec<BoardColumn<'a>> = Vec::with_capacity(buckets.len());
    for bucket in buckets {
        let status = bucket.as_ref();
        if !columns.iter().any(|c| c.status == status) {
            columns.push(BoardColumn {
                status: status.to_string(),
                records: Vec::new(),
            });
        }
    }

    let mut unrecognized = 0;
    for &record in records {
        match columns.iter_mut().find(|c| c.status == record.status) {
            Some(column) => column.records.push(record),
            None => unrecognized += 1,
        }
    }

    BoardView {
        columns,
        unrecognized,
    }
}
