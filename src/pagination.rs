//! Shared current-page state.

use tracing::debug;

use crate::observable::{ObservableCell, Subscription};

/// Number of pages needed for `total_items`. Zero when `items_per_page` is zero.
pub fn total_pages(total_items: usize, items_per_page: u32) -> u32 {
    if items_per_page == 0 {
        return 0;
    }
    let pages = total_items.div_ceil(items_per_page as usize);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Current page index (1-based), observable by any number of consumers.
///
/// `set_current_page` does not validate. The page is pulled back to 1 by
/// [`compute_valid_page_numbers`](Self::compute_valid_page_numbers) once a
/// result shows it is out of range.
#[derive(Clone, Debug)]
pub struct PaginationState {
    current: ObservableCell<u32>,
}

impl PaginationState {
    pub fn new() -> Self {
        Self {
            current: ObservableCell::new(1),
        }
    }

    pub fn set_current_page(&self, page: u32) {
        debug!(page, "set current page");
        self.current.set(page);
    }

    /// Snapshot of the current page.
    pub fn current_page(&self) -> u32 {
        self.current.get()
    }

    /// The current page followed by every later change.
    pub fn get_current_page(&self) -> Subscription<u32> {
        self.current.subscribe()
    }

    /// Page numbers `[1..=total_pages]` for the pager. Resets the current page
    /// to 1 when it lies beyond the last page or is 0.
    pub fn compute_valid_page_numbers(&self, total_items: usize, items_per_page: u32) -> Vec<u32> {
        let total = total_pages(total_items, items_per_page);
        let current = self.current_page();
        if current == 0 || (current > total && current != 1) {
            debug!(current, total, "current page out of range, back to page 1");
            self.set_current_page(1);
        }
        (1..=total).collect()
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_is_ceiling() {
        assert_eq!(total_pages(0, 5), 0);
        assert_eq!(total_pages(1, 5), 1);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(17, 5), 4);
        assert_eq!(total_pages(17, 10), 2);
        assert_eq!(total_pages(17, 20), 1);
        assert_eq!(total_pages(17, 0), 0);
    }

    #[test]
    fn page_numbers_cover_every_page() {
        let state = PaginationState::new();
        for per_page in 1..=7u32 {
            for total in 0..=30usize {
                let pages = state.compute_valid_page_numbers(total, per_page);
                let expected: Vec<u32> = (1..=total_pages(total, per_page)).collect();
                assert_eq!(pages, expected, "total={total} per_page={per_page}");
            }
        }
    }

    #[test]
    fn out_of_range_page_clamps_to_one() {
        let state = PaginationState::new();
        state.set_current_page(4);
        let pages = state.compute_valid_page_numbers(15, 5);
        assert_eq!(pages, vec![1, 2, 3]);
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn page_zero_clamps_to_one() {
        let state = PaginationState::new();
        state.set_current_page(0);
        let mut sub = state.get_current_page();
        state.compute_valid_page_numbers(17, 5);
        assert_eq!(state.current_page(), 1);
        assert_eq!(sub.try_next(), Some(0));
        assert_eq!(sub.try_next(), Some(1));

        state.set_current_page(0);
        assert!(state.compute_valid_page_numbers(0, 5).is_empty());
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn in_range_page_is_kept() {
        let state = PaginationState::new();
        state.set_current_page(3);
        state.compute_valid_page_numbers(15, 5);
        assert_eq!(state.current_page(), 3);
    }

    #[test]
    fn empty_result_on_page_one_does_not_notify() {
        let state = PaginationState::new();
        let mut sub = state.get_current_page();
        assert_eq!(sub.try_next(), Some(1));
        assert!(state.compute_valid_page_numbers(0, 5).is_empty());
        assert_eq!(sub.try_next(), None);
    }

    #[test]
    fn subscribers_see_initial_and_updates() {
        let state = PaginationState::new();
        let mut sub = state.get_current_page();
        state.set_current_page(2);
        state.set_current_page(2);
        assert_eq!(sub.try_next(), Some(1));
        assert_eq!(sub.try_next(), Some(2));
        assert_eq!(sub.try_next(), Some(2));
    }

    #[test]
    fn reading_twice_is_stable() {
        let state = PaginationState::new();
        state.set_current_page(7);
        assert_eq!(state.current_page(), state.current_page());
    }
}
