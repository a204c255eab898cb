use std::ops::RangeInclusive;

/// The bounded run of page numbers shown by a paginator control.
///
/// Whenever `total_pages > 0`:
/// `1 <= visible_start <= current_page <= visible_end <= total_pages`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageWindow {
    pub current_page: u32,
    pub total_pages: u32,
    pub visible_start: u32,
    pub visible_end: u32,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

impl PageWindow {
    /// Window for a result set with no pages: no entries, both edges disabled.
    pub const EMPTY: PageWindow = PageWindow {
        current_page: 1,
        total_pages: 0,
        visible_start: 1,
        visible_end: 0,
        prev_enabled: false,
        next_enabled: false,
    };

    pub fn is_empty(&self) -> bool {
        self.total_pages == 0
    }

    /// Numbered entries to render, empty when there are no pages.
    pub fn pages(&self) -> RangeInclusive<u32> {
        self.visible_start..=self.visible_end
    }

    pub fn is_current(&self, page: u32) -> bool {
        !self.is_empty() && page == self.current_page
    }

    pub fn prev_page(&self) -> Option<u32> {
        self.prev_enabled.then(|| self.current_page - 1)
    }

    pub fn next_page(&self) -> Option<u32> {
        self.next_enabled.then(|| self.current_page + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_window_has_no_entries() {
        let window = PageWindow::EMPTY;
        assert!(window.is_empty());
        assert_eq!(window.pages().count(), 0);
        assert_eq!(window.prev_page(), None);
        assert_eq!(window.next_page(), None);
        assert!(!window.is_current(1));
    }
}
