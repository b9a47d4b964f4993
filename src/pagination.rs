use serde::Serialize;

use crate::domain::types::PerPage;
use crate::dto::api::PageMeta;

fn get_pages(
    total_pages: u32,
    current_page: u32,
    left_edge: u32,
    left_current: u32,
    right_current: u32,
    right_edge: u32,
) -> Vec<Option<u32>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// Page position and server-reported totals for the list screen.
///
/// `1 <= current_page <= last_page` holds after every transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    current_page: u32,
    per_page: PerPage,
    last_page: u32,
    total: u64,
    from: u64,
    to: u64,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(PerPage::default())
    }
}

impl PaginationState {
    pub fn new(per_page: PerPage) -> Self {
        Self {
            current_page: 1,
            per_page,
            last_page: 1,
            total: 0,
            from: 0,
            to: 0,
        }
    }

    /// State restored from the address bar before the first response.
    ///
    /// `last_page` is provisionally raised to `current_page`; the first
    /// response brings the real bound.
    pub fn starting_at(current_page: u32, per_page: PerPage) -> Self {
        let current_page = current_page.max(1);
        Self {
            current_page,
            last_page: current_page,
            ..Self::new(per_page)
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn per_page(&self) -> PerPage {
        self.per_page
    }

    pub fn last_page(&self) -> u32 {
        self.last_page
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// 1-based index of the first displayed row, `0` when nothing is shown.
    pub fn from(&self) -> u64 {
        self.from
    }

    /// 1-based index of the last displayed row, `0` when nothing is shown.
    pub fn to(&self) -> u64 {
        self.to
    }

    /// Display index of the row at `offset` within the current page.
    pub fn row_index(&self, offset: usize) -> u64 {
        self.from.max(1) + offset as u64
    }

    pub fn contains(&self, page: u32) -> bool {
        (1..=self.last_page).contains(&page)
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }

    /// Moves to `page` if it is within `[1, last_page]`.
    pub(crate) fn go_to(&mut self, page: u32) -> bool {
        if !self.contains(page) {
            return false;
        }
        self.current_page = page;
        true
    }

    pub(crate) fn resize(&mut self, per_page: PerPage) {
        self.per_page = per_page;
        self.current_page = 1;
    }

    pub(crate) fn rewind(&mut self) {
        self.current_page = 1;
    }

    /// Takes over the totals reported by the server.
    ///
    /// Returns `true` when the reported page was beyond `last_page` and had to
    /// be clamped, meaning the displayed rows do not belong to the new page.
    pub(crate) fn absorb(&mut self, meta: &PageMeta) -> bool {
        self.last_page = meta.last_page.max(1);
        self.total = meta.total;
        self.from = meta.from.unwrap_or(0);
        self.to = meta.to.unwrap_or(0);
        if let Ok(per_page) = PerPage::new(meta.per_page) {
            self.per_page = per_page;
        }
        let reported = meta.current_page.max(1);
        self.current_page = reported.min(self.last_page);
        reported > self.last_page
    }

    /// Page links for the pagination bar; `None` marks an ellipsis.
    pub fn page_links(&self) -> Vec<Option<u32>> {
        get_pages(self.last_page, self.current_page, 2, 2, 4, 2)
    }

    /// `"Showing X–Y of Z"` caption.
    pub fn summary(&self) -> String {
        format!("Showing {}–{} of {}", self.from, self.to, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(current_page: u32, last_page: u32, per_page: u32, total: u64) -> PageMeta {
        let from = u64::from(current_page - 1) * u64::from(per_page) + 1;
        PageMeta {
            current_page,
            from: Some(from),
            last_page,
            per_page,
            prev_page_url: None,
            next_page_url: None,
            to: Some((from + u64::from(per_page) - 1).min(total)),
            total,
        }
    }

    #[test]
    fn absorbs_first_page_of_fifty() {
        let mut state = PaginationState::default();
        let clamped = state.absorb(&meta(1, 5, 10, 50));
        assert!(!clamped);
        assert_eq!(state.last_page(), 5);
        assert_eq!(state.total(), 50);
        assert_eq!(state.row_index(0), 1);
        assert_eq!(state.row_index(9), 10);
        assert_eq!(state.summary(), "Showing 1–10 of 50");
        assert!(state.has_next());
        assert!(!state.has_previous());
    }

    #[test]
    fn go_to_rejects_out_of_range_pages() {
        let mut state = PaginationState::default();
        state.absorb(&meta(1, 3, 10, 30));
        assert!(!state.go_to(0));
        assert!(!state.go_to(4));
        assert!(state.go_to(3));
        assert_eq!(state.current_page(), 3);
    }

    #[test]
    fn absorb_clamps_page_past_the_end() {
        let mut state = PaginationState::starting_at(9, PerPage::default());
        let clamped = state.absorb(&PageMeta {
            current_page: 9,
            from: None,
            last_page: 4,
            per_page: 10,
            prev_page_url: None,
            next_page_url: None,
            to: None,
            total: 40,
        });
        assert!(clamped);
        assert_eq!(state.current_page(), 4);
        assert_eq!(state.from(), 0);
    }

    #[test]
    fn resize_returns_to_first_page() {
        let mut state = PaginationState::default();
        state.absorb(&meta(2, 5, 10, 50));
        state.resize(PerPage::new(20).unwrap());
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.per_page().get(), 20);
    }

    #[test]
    fn page_links_collapse_with_ellipses() {
        assert_eq!(get_pages(0, 1, 2, 2, 4, 2), vec![]);
        assert_eq!(
            get_pages(3, 1, 2, 2, 4, 2),
            vec![Some(1), Some(2), Some(3)]
        );
        assert_eq!(
            get_pages(20, 10, 2, 2, 4, 2),
            vec![
                Some(1),
                Some(2),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                Some(13),
                Some(14),
                None,
                Some(19),
                Some(20),
            ]
        );
    }
}
