//! Pagination state and controller
//!
//! The controller only stores state. Fetching the page is the owner's job:
//! it derives a query key from the state and refetches when the key changes.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Page sizes offered when cycling with `z`
pub const PAGE_SIZE_CHOICES: [usize; 4] = [10, 20, 50, 100];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationState {
    pub fn new(page_index: usize, page_size: usize) -> Self {
        Self {
            page_index,
            page_size,
        }
    }

    /// Offset of the first item on this page
    pub fn offset(&self) -> usize {
        self.page_index.saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> usize {
        self.page_size
    }

    /// Number of pages for `total` items, never less than one
    pub fn page_count(&self, total: usize) -> usize {
        if self.page_size == 0 {
            return 1;
        }
        total.div_ceil(self.page_size).max(1)
    }

    pub fn has_next(&self, total: usize) -> bool {
        self.page_index + 1 < self.page_count(total)
    }

    pub fn has_prev(&self) -> bool {
        self.page_index > 0
    }

    /// Whether this page starts past the end of the results. The first
    /// page is always in range, even for an empty result set.
    pub fn is_out_of_range(&self, total: usize) -> bool {
        self.page_index > 0 && self.offset() >= total
    }

    /// The same page size, moved onto the last page if past the end
    pub fn clamped(&self, total: usize) -> Self {
        if self.is_out_of_range(total) {
            Self::new(self.page_count(total) - 1, self.page_size)
        } else {
            *self
        }
    }
}

/// Either a new state or a function of the current one
pub enum PaginationUpdate {
    Set(PaginationState),
    Update(Box<dyn FnOnce(PaginationState) -> PaginationState>),
}

impl PaginationUpdate {
    pub fn with<F>(f: F) -> Self
    where
        F: FnOnce(PaginationState) -> PaginationState + 'static,
    {
        PaginationUpdate::Update(Box::new(f))
    }
}

impl From<PaginationState> for PaginationUpdate {
    fn from(state: PaginationState) -> Self {
        PaginationUpdate::Set(state)
    }
}

/// Holds the current page index and size for one table
#[derive(Debug, Default, Clone)]
pub struct PaginationController {
    state: PaginationState,
}

impl PaginationController {
    pub fn new(state: PaginationState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> PaginationState {
        self.state
    }

    /// Apply a value or updater. Bounds are not checked.
    ///
    /// Returns `true` if the stored state changed.
    pub fn set_pagination(&mut self, update: impl Into<PaginationUpdate>) -> bool {
        let next = match update.into() {
            PaginationUpdate::Set(state) => state,
            PaginationUpdate::Update(f) => f(self.state),
        };
        let changed = next != self.state;
        self.state = next;
        changed
    }

    pub fn next_page(&mut self) -> bool {
        self.set_pagination(PaginationUpdate::with(|p| {
            PaginationState::new(p.page_index + 1, p.page_size)
        }))
    }

    pub fn prev_page(&mut self) -> bool {
        self.set_pagination(PaginationUpdate::with(|p| {
            PaginationState::new(p.page_index.saturating_sub(1), p.page_size)
        }))
    }

    pub fn first_page(&mut self) -> bool {
        self.set_pagination(PaginationUpdate::with(|p| PaginationState::new(0, p.page_size)))
    }

    pub fn last_page(&mut self, total: usize) -> bool {
        self.set_pagination(PaginationUpdate::with(move |p| {
            PaginationState::new(p.page_count(total) - 1, p.page_size)
        }))
    }

    /// Move to the next page size choice and back to the first page
    pub fn cycle_page_size(&mut self) -> bool {
        self.set_pagination(PaginationUpdate::with(|p| {
            let next = PAGE_SIZE_CHOICES
                .iter()
                .copied()
                .find(|&size| size > p.page_size)
                .unwrap_or(PAGE_SIZE_CHOICES[0]);
            PaginationState::new(0, next)
        }))
    }
}
