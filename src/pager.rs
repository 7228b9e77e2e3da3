//! Fixed-size page windowing over the working list
//!
//! `current_page` is 1-based and always within `[1, total_pages]`
//! (`total_pages` is at least 1 so an empty list still has a valid page).

/// Records shown per page.
pub const PAGE_SIZE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub current_page: usize,
    pub page_size: usize,
    pub total_items: usize,
}

impl Pager {
    pub fn new(total_items: usize) -> Self {
        Self {
            current_page: 1,
            page_size: PAGE_SIZE,
            total_items,
        }
    }

    pub fn total_pages(&self) -> usize {
        if self.total_items == 0 {
            1
        } else {
            self.total_items.div_ceil(self.page_size)
        }
    }

    /// Floored at page 1; no-op at the floor.
    pub fn previous(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
    }

    /// Capped at the last page; no-op at the cap.
    pub fn next(&mut self) {
        if self.current_page < self.total_pages() {
            self.current_page += 1;
        }
    }

    /// Direct jump, clamped to `[1, total_pages]`.
    pub fn jump(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.total_pages());
    }

    pub fn at_first(&self) -> bool {
        self.current_page == 1
    }

    pub fn at_last(&self) -> bool {
        self.current_page == self.total_pages()
    }

    /// Index window `[(n-1)*size, n*size)` of the current page, clipped to
    /// the list length.
    pub fn page_bounds(&self) -> (usize, usize) {
        let start = (self.current_page - 1) * self.page_size;
        let end = (start + self.page_size).min(self.total_items);
        (start.min(self.total_items), end)
    }

    /// Slice the working list down to the visible page.
    pub fn page_slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let (start, end) = self.page_bounds();
        &items[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_working_list_has_six_pages() {
        let pager = Pager::new(35);
        assert_eq!(pager.total_pages(), 6);
    }

    #[test]
    fn total_pages_is_ceiling() {
        assert_eq!(Pager::new(6).total_pages(), 1);
        assert_eq!(Pager::new(7).total_pages(), 2);
        assert_eq!(Pager::new(12).total_pages(), 2);
        assert_eq!(Pager::new(13).total_pages(), 3);
        assert_eq!(Pager::new(0).total_pages(), 1);
    }

    #[test]
    fn previous_is_noop_at_floor() {
        let mut pager = Pager::new(35);
        assert!(pager.at_first());
        pager.previous();
        assert_eq!(pager.current_page, 1);
    }

    #[test]
    fn next_is_noop_at_cap() {
        let mut pager = Pager::new(35);
        pager.jump(6);
        assert!(pager.at_last());
        pager.next();
        assert_eq!(pager.current_page, 6);
    }

    #[test]
    fn jump_clamps_out_of_range_targets() {
        let mut pager = Pager::new(35);
        pager.jump(99);
        assert_eq!(pager.current_page, 6);
        pager.jump(0);
        assert_eq!(pager.current_page, 1);
    }

    #[test]
    fn page_bounds_window_the_list() {
        let mut pager = Pager::new(35);
        assert_eq!(pager.page_bounds(), (0, 6));
        pager.jump(3);
        assert_eq!(pager.page_bounds(), (12, 18));
        // Last page is clipped: 35 = 5 * 6 + 5
        pager.jump(6);
        assert_eq!(pager.page_bounds(), (30, 35));
    }

    #[test]
    fn page_slice_returns_visible_records() {
        let items: Vec<usize> = (0..35).collect();
        let mut pager = Pager::new(items.len());
        pager.jump(2);
        assert_eq!(pager.page_slice(&items), &items[6..12]);
        pager.jump(6);
        assert_eq!(pager.page_slice(&items).len(), 5);
    }
}
