//! Fixed-size, 1-based pagination over the ranked contributors.

/// Splits a slice into pages of a fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

impl Paginator {
    /// Create a paginator. A zero page size is bumped to 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    /// Items on page `page` (1-based). Pages past the end, and page 0, are empty.
    pub fn page<'a, T>(&self, items: &'a [T], page: usize) -> &'a [T] {
        let Some(start) = self.start_index(page) else {
            return &[];
        };
        if start >= items.len() {
            return &[];
        }
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }

    /// Index of the first item on `page`, or `None` for page 0 and for pages
    /// whose start does not fit in a `usize`.
    pub fn start_index(&self, page: usize) -> Option<usize> {
        page.checked_sub(1).and_then(|p| p.checked_mul(self.page_size))
    }

    /// Number of pages needed for `len` items.
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size)
    }
}

/// Prev/next state rendered under a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageControls {
    pub page: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

impl PageControls {
    /// Controls for `page`, or `None` when everything fits on one page.
    pub fn for_page(page: usize, total_pages: usize) -> Option<Self> {
        if total_pages <= 1 {
            return None;
        }
        Some(Self {
            page,
            total_pages,
            has_prev: page > 1,
            has_next: page < total_pages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_of_seventeen() {
        let items: Vec<u32> = (1..=17).collect();
        let paginator = Paginator::new(8);

        assert_eq!(paginator.page(&items, 1), &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(paginator.page(&items, 2).len(), 8);
        assert_eq!(paginator.page(&items, 3), &[17]);
        assert!(paginator.page(&items, 4).is_empty());
        assert_eq!(paginator.total_pages(items.len()), 3);
    }

    #[test]
    fn test_page_zero_and_empty_input() {
        let paginator = Paginator::new(8);
        let items = [1, 2, 3];
        assert!(paginator.page(&items, 0).is_empty());

        let empty: [u32; 0] = [];
        assert!(paginator.page(&empty, 1).is_empty());
        assert_eq!(paginator.total_pages(0), 0);
    }

    #[test]
    fn test_huge_page_is_empty() {
        let items: Vec<u32> = (1..=17).collect();
        let paginator = Paginator::new(8);
        let page = (1usize << 61) + 1;

        assert_eq!(paginator.start_index(page), None);
        assert!(paginator.page(&items, page).is_empty());
        assert!(paginator.page(&items, usize::MAX).is_empty());
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        let paginator = Paginator::new(0);
        assert_eq!(paginator.total_pages(3), 3);
        assert_eq!(paginator.page(&[1, 2, 3], 2), &[2]);
    }

    #[test]
    fn test_page_controls() {
        assert_eq!(PageControls::for_page(1, 1), None);
        assert_eq!(PageControls::for_page(1, 0), None);

        let first = PageControls::for_page(1, 3).unwrap();
        assert!(!first.has_prev);
        assert!(first.has_next);

        let last = PageControls::for_page(3, 3).unwrap();
        assert!(last.has_prev);
        assert!(!last.has_next);

        let beyond = PageControls::for_page(5, 3).unwrap();
        assert!(beyond.has_prev);
        assert!(!beyond.has_next);
    }
}
