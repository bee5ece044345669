//! Pagination over the filtered, sorted top-level sequence.
//!
//! Only top-level rows count against the page size. The paginator never
//! stores the row total; callers pass it in so the index can heal itself
//! whenever the filtered set changes.

use crate::config::TableConfig;
use std::ops::Range;

/// Pages shown without ellipsis in the page window.
const FULL_WINDOW: usize = 5;

/// One entry of the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(usize),
    Ellipsis,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    page_index: usize,
    page_size: usize,
    options: Vec<usize>,
}

impl Paginator {
    pub fn new(config: &TableConfig) -> Self {
        let options = config.normalized_page_size_options();
        let page_size = nearest_option(&options, config.page_size);
        Self {
            page_index: 0,
            page_size,
            options,
        }
    }

    // ===== Queries =====

    /// Stored page index. May be stale until [`Paginator::clamp`] runs.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_size_options(&self) -> &[usize] {
        &self.options
    }

    /// `ceil(total / page_size)`.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    /// The page index clamped into `[0, max(page_count - 1, 0)]`.
    pub fn effective_page_index(&self, total: usize) -> usize {
        self.page_index.min(self.page_count(total).saturating_sub(1))
    }

    /// Range of top-level positions on the current page.
    pub fn page_range(&self, total: usize) -> Range<usize> {
        let start = (self.effective_page_index(total) * self.page_size).min(total);
        let end = (start + self.page_size).min(total);
        start..end
    }

    pub fn can_previous_page(&self, total: usize) -> bool {
        self.effective_page_index(total) > 0
    }

    pub fn can_next_page(&self, total: usize) -> bool {
        self.effective_page_index(total) + 1 < self.page_count(total)
    }

    /// Page numbers for the pagination bar with ellipsis markers.
    pub fn page_links(&self, total: usize) -> Vec<PageLink> {
        let count = self.page_count(total);
        if count <= FULL_WINDOW {
            return (0..count).map(PageLink::Page).collect();
        }

        let current = self.effective_page_index(total);
        let last = count - 1;
        let mut links = Vec::with_capacity(FULL_WINDOW + 2);

        if current < 3 {
            links.extend((0..FULL_WINDOW).map(PageLink::Page));
            links.push(PageLink::Ellipsis);
            links.push(PageLink::Page(last));
        } else if current > last - 3 {
            links.push(PageLink::Page(0));
            links.push(PageLink::Ellipsis);
            links.extend((last + 1 - FULL_WINDOW..=last).map(PageLink::Page));
        } else {
            links.push(PageLink::Page(0));
            links.push(PageLink::Ellipsis);
            links.extend((current - 1..=current + 1).map(PageLink::Page));
            links.push(PageLink::Ellipsis);
            links.push(PageLink::Page(last));
        }
        links
    }

    // ===== Mutations =====

    /// Pulls the stored index back into range. Returns true if it moved.
    pub fn clamp(&mut self, total: usize) -> bool {
        let clamped = self.effective_page_index(total);
        if clamped != self.page_index {
            log::debug!("page index clamped {} -> {}", self.page_index, clamped);
            self.page_index = clamped;
            true
        } else {
            false
        }
    }

    pub fn goto_page(&mut self, index: usize, total: usize) {
        self.page_index = index;
        self.clamp(total);
    }

    pub fn next_page(&mut self, total: usize) {
        let next = self.effective_page_index(total) + 1;
        self.goto_page(next, total);
    }

    pub fn previous_page(&mut self, total: usize) {
        let previous = self.effective_page_index(total).saturating_sub(1);
        self.goto_page(previous, total);
    }

    /// Snaps `size` to the nearest allowed option and resets to page 0.
    pub fn set_page_size(&mut self, size: usize) {
        let snapped = nearest_option(&self.options, size);
        if snapped != size {
            log::debug!("page size {} snapped to {}", size, snapped);
        }
        self.page_size = snapped;
        self.page_index = 0;
    }

    /// Puts the paginator back on its first page.
    pub fn reset(&mut self) {
        self.page_index = 0;
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(&TableConfig::default())
    }
}

/// Closest option to `size`; ties go to the smaller option. `options` must be
/// sorted and non-empty.
fn nearest_option(options: &[usize], size: usize) -> usize {
    options
        .iter()
        .copied()
        .min_by_key(|&option| option.abs_diff(size))
        .unwrap_or(size.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paginator(size: usize) -> Paginator {
        let mut p = Paginator::default();
        p.set_page_size(size);
        p
    }

    #[test]
    fn test_fifteen_rows_in_pages_of_five() {
        let mut p = paginator(5);
        assert_eq!(p.page_count(15), 3);
        assert_eq!(p.page_range(15), 0..5);
        p.next_page(15);
        assert_eq!(p.page_range(15), 5..10);

        p.set_page_size(20);
        assert_eq!(p.page_index(), 0);
        assert_eq!(p.page_count(15), 1);
        assert_eq!(p.page_range(15), 0..15);
    }

    #[test]
    fn test_empty_set_has_no_pages() {
        let p = paginator(10);
        assert_eq!(p.page_count(0), 0);
        assert_eq!(p.page_range(0), 0..0);
        assert!(!p.can_next_page(0));
        assert!(!p.can_previous_page(0));
        assert!(p.page_links(0).is_empty());
    }

    #[test]
    fn test_out_of_range_index_clamps() {
        let mut p = paginator(5);
        p.goto_page(99, 12);
        assert_eq!(p.page_index(), 2);
        assert_eq!(p.page_range(12), 10..12);

        // Shrinking the filtered set pulls the index back.
        assert_eq!(p.effective_page_index(4), 0);
        assert!(p.clamp(4));
        assert_eq!(p.page_index(), 0);
    }

    #[test]
    fn test_previous_and_next_stop_at_edges() {
        let mut p = paginator(5);
        p.previous_page(15);
        assert_eq!(p.page_index(), 0);
        p.goto_page(2, 15);
        p.next_page(15);
        assert_eq!(p.page_index(), 2);
        assert!(!p.can_next_page(15));
        assert!(p.can_previous_page(15));
    }

    #[test]
    fn test_unsupported_page_size_snaps_to_nearest() {
        let mut p = Paginator::default();
        p.set_page_size(7);
        assert_eq!(p.page_size(), 5);
        p.set_page_size(0);
        assert_eq!(p.page_size(), 5);
        p.set_page_size(1_000);
        assert_eq!(p.page_size(), 100);
        p.set_page_size(15);
        assert_eq!(p.page_size(), 10);
    }

    #[test]
    fn test_page_links_window() {
        use PageLink::{Ellipsis, Page};
        let mut p = paginator(10);

        assert_eq!(p.page_links(50), (0..5).map(Page).collect::<Vec<_>>());

        // 10 pages, start.
        assert_eq!(
            p.page_links(100),
            vec![Page(0), Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(9)]
        );

        p.goto_page(5, 100);
        assert_eq!(
            p.page_links(100),
            vec![Page(0), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(9)]
        );

        p.goto_page(8, 100);
        assert_eq!(
            p.page_links(100),
            vec![Page(0), Ellipsis, Page(5), Page(6), Page(7), Page(8), Page(9)]
        );
    }
}
