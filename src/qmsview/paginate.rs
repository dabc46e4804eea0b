use serde::Serialize;

/// One page of an ordered selection plus the metadata a pager needs.
///
/// `start_index`/`end_index` are 1-based display bounds ("showing 11-20 of 42");
/// both are 0 when there is nothing to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub start_index: usize,
    pub end_index: usize,
}

impl<T> Page<'_, T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1)).max(1)
}

/// Clamps any requested page number into `[1, total_pages]`.
pub fn clamp_page(page: i64, total_pages: usize) -> usize {
    let last = total_pages.max(1) as i64;
    page.clamp(1, last) as usize
}

/// Slices `items` into the requested page. Never fails: the page number is
/// clamped and a zero page size is treated as 1.
pub fn paginate<T>(items: &[T], page: i64, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_pages(total_items, page_size);
    let page = clamp_page(page, total_pages);

    let start = ((page - 1) * page_size).min(total_items);
    let end = (page * page_size).min(total_items);

    let (start_index, end_index) = if total_items == 0 {
        (0, 0)
    } else {
        (start + 1, end)
    };

    Page {
        items: &items[start..end],
        page,
        total_pages,
        total_items,
        start_index,
        end_index,
    }
}
