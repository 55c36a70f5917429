//! Page-number window for the list view.

use pcm_shared::PaginatedResponse;

/// Page buttons shown at once.
pub const MAX_VISIBLE_PAGES: u32 = 5;

/// Pagination metadata from the last successful list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl PageInfo {
    pub fn from_response<T>(response: &PaginatedResponse<T>) -> Self {
        Self {
            page: response.page,
            limit: response.limit,
            total: response.total,
            total_pages: response.total_pages,
        }
    }

    /// Controls are hidden for a single page.
    pub fn show_pagination(&self) -> bool {
        self.total_pages > 1
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// A window of at most `max` consecutive page numbers around `current`,
/// shifted left when it would run past the last page.
pub fn visible_pages(current: u32, total: u32, max: u32) -> Vec<u32> {
    if total == 0 || max == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total);
    let half = max / 2;

    let mut start = current.saturating_sub(half).max(1);
    let end = start.saturating_add(max - 1).min(total);
    if end - start + 1 < max {
        start = (end + 1).saturating_sub(max).max(1);
    }
    (start..=end).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_centres_on_current_page() {
        assert_eq!(visible_pages(5, 10, 5), vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn window_is_pinned_at_either_end() {
        assert_eq!(visible_pages(1, 10, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(visible_pages(2, 10, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(visible_pages(10, 10, 5), vec![6, 7, 8, 9, 10]);
        assert_eq!(visible_pages(9, 10, 5), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn fewer_pages_than_window() {
        assert_eq!(visible_pages(2, 3, 5), vec![1, 2, 3]);
        assert_eq!(visible_pages(1, 1, 5), vec![1]);
        assert!(visible_pages(1, 0, 5).is_empty());
    }

    #[test]
    fn even_window_width() {
        assert_eq!(visible_pages(5, 10, 4), vec![3, 4, 5, 6]);
    }

    #[test]
    fn page_info_flags() {
        let info = PageInfo {
            page: 1,
            limit: 20,
            total: 20,
            total_pages: 1,
        };
        assert!(!info.show_pagination());
        assert!(!info.has_next());

        let info = PageInfo {
            page: 2,
            limit: 20,
            total: 45,
            total_pages: 3,
        };
        assert!(info.show_pagination());
        assert!(info.has_previous());
        assert!(info.has_next());
    }
}
