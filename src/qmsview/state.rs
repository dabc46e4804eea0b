//! Caller-owned view state.
//!
//! The pipeline itself is stateless. Whoever drives it (a UI loop, the CLI)
//! keeps a [`ViewState`] and hands its criteria and page to the pure
//! functions on every recomputation.

use crate::filter::FilterCriteria;
use crate::paginate::{clamp_page, total_pages};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    current_page: usize,
    page_size: usize,
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self, filtered_count: usize) -> usize {
        total_pages(filtered_count, self.page_size)
    }

    /// Moves to `page`, clamped against the current filtered count.
    pub fn set_page(&mut self, page: i64, filtered_count: usize) -> usize {
        self.current_page = clamp_page(page, self.total_pages(filtered_count));
        self.current_page
    }

    pub fn next(&mut self, filtered_count: usize) -> usize {
        self.set_page(self.current_page as i64 + 1, filtered_count)
    }

    pub fn prev(&mut self, filtered_count: usize) -> usize {
        self.set_page(self.current_page as i64 - 1, filtered_count)
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }
}

/// Filter criteria plus paging, with the invariant that any criteria change
/// sends the pager back to page 1.
#[derive(Debug, Clone)]
pub struct ViewState {
    criteria: FilterCriteria,
    page: PageState,
    generation: u64,
}

impl ViewState {
    pub fn new(page_size: usize) -> Self {
        Self {
            criteria: FilterCriteria::default(),
            page: PageState::new(page_size),
            generation: 0,
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut PageState {
        &mut self.page
    }

    /// Bumped on every criteria change.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn update_criteria<F>(&mut self, update: F)
    where
        F: FnOnce(&mut FilterCriteria),
    {
        let before = self.criteria.clone();
        update(&mut self.criteria);
        if self.criteria != before {
            self.page.reset();
            self.generation += 1;
        }
    }

    pub fn replace_criteria(&mut self, criteria: FilterCriteria) {
        self.update_criteria(|c| *c = criteria);
    }
}

/// Opaque handle for one in-flight recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Latest-input-wins guard for recomputations that finish out of order.
///
/// Every input change calls [`LatestWins::issue`]; a result is only accepted
/// if its ticket is still the newest one issued.
#[derive(Debug)]
pub struct LatestWins<T> {
    issued: u64,
    value: Option<T>,
}

impl<T> Default for LatestWins<T> {
    fn default() -> Self {
        Self {
            issued: 0,
            value: None,
        }
    }
}

impl<T> LatestWins<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    /// Stores `value` if `ticket` is current. Returns whether it was kept.
    pub fn complete(&mut self, ticket: Ticket, value: T) -> bool {
        if ticket.0 != self.issued {
            tracing::debug!(ticket = ticket.0, latest = self.issued, "discarding stale result");
            return false;
        }
        self.value = Some(value);
        true
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }
}
