use crate::commands::{CmdMessage, CmdResult};
use crate::filter::{filter_records, sort_records, SortSpec};
use crate::model::Record;
use crate::paginate::paginate;
use crate::state::ViewState;
use serde::Serialize;

/// One page of the filtered list, detached from the intermediate selection.
#[derive(Debug, Clone, Serialize)]
pub struct ListView<'a> {
    pub items: Vec<&'a Record>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub start_index: usize,
    pub end_index: usize,
}

/// Filter, optionally sort, then page. The requested page is clamped and
/// written back into `state`.
pub fn run<'a>(
    records: &'a [Record],
    state: &mut ViewState,
    page: i64,
    sort: Option<SortSpec>,
) -> CmdResult<'a> {
    let mut filtered = filter_records(records, state.criteria());
    sort_records(&mut filtered, sort);

    let current = state.page_mut().set_page(page, filtered.len());
    let slice = paginate(&filtered, current as i64, state.page().page_size());
    tracing::debug!(
        total = records.len(),
        matched = slice.total_items,
        page = slice.page,
        pages = slice.total_pages,
        "list view"
    );

    let view = ListView {
        items: slice.items.to_vec(),
        page: slice.page,
        total_pages: slice.total_pages,
        total_items: slice.total_items,
        start_index: slice.start_index,
        end_index: slice.end_index,
    };

    let mut result = CmdResult::default();
    if view.total_items == 0 {
        result.add_message(CmdMessage::info("No records match the current filters."));
    } else if current as i64 != page {
        result.add_message(CmdMessage::info(format!(
            "Page {} is out of range; showing page {} of {}.",
            page, current, view.total_pages
        )));
    }
    result.with_list(view)
}
