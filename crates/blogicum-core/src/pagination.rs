//! Page-number pagination for post listings.

use serde::Serialize;

/// Posts per listing page.
pub const PAGE_SIZE: u64 = 10;

/// A page number as requested by the client.
///
/// Lookup is lenient: anything that is not an integer means the first page,
/// and an integer outside the available range means the last page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest(Option<i64>);

impl PageRequest {
    pub fn first() -> Self {
        Self(Some(1))
    }

    pub fn number(number: i64) -> Self {
        Self(Some(number))
    }

    /// Parse the raw `page` query parameter.
    pub fn parse(raw: Option<&str>) -> Self {
        Self(raw.and_then(|s| s.trim().parse().ok()))
    }

    /// Resolve against the total number of pages (always at least 1).
    pub fn resolve(self, num_pages: u64) -> u64 {
        match self.0 {
            None => 1,
            Some(n) if n >= 1 && (n as u64) <= num_pages => n as u64,
            Some(_) => num_pages,
        }
    }
}

/// Position of one page within a result set of known size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub number: u64,
    pub num_pages: u64,
    pub count: u64,
    pub per_page: u64,
}

impl PageWindow {
    pub fn new(request: PageRequest, count: u64, per_page: u64) -> Self {
        // An empty result still renders as one empty page.
        let num_pages = count.div_ceil(per_page).max(1);
        Self {
            number: request.resolve(num_pages),
            num_pages,
            count,
            per_page,
        }
    }

    pub fn offset(&self) -> u64 {
        (self.number - 1) * self.per_page
    }

    pub fn into_page<T>(self, items: Vec<T>) -> Page<T> {
        Page {
            items,
            number: self.number,
            num_pages: self.num_pages,
            count: self.count,
            per_page: self.per_page,
        }
    }
}

/// A single page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Current page number (1-indexed).
    pub number: u64,
    pub num_pages: u64,
    /// Total number of items across all pages.
    pub count: u64,
    pub per_page: u64,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            num_pages: self.num_pages,
            count: self.count,
            per_page: self.per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults_to_first_page() {
        assert_eq!(PageRequest::parse(None).resolve(5), 1);
        assert_eq!(PageRequest::parse(Some("abc")).resolve(5), 1);
        assert_eq!(PageRequest::parse(Some("")).resolve(5), 1);
        assert_eq!(PageRequest::parse(Some(" 3 ")).resolve(5), 3);
    }

    #[test]
    fn test_out_of_range_resolves_to_last_page() {
        assert_eq!(PageRequest::number(999).resolve(4), 4);
        assert_eq!(PageRequest::number(0).resolve(4), 4);
        assert_eq!(PageRequest::number(-2).resolve(4), 4);
    }

    #[test]
    fn test_window_for_empty_result() {
        let window = PageWindow::new(PageRequest::number(3), 0, PAGE_SIZE);
        assert_eq!(window.num_pages, 1);
        assert_eq!(window.number, 1);
        assert_eq!(window.offset(), 0);

        let page = window.into_page(Vec::<u8>::new());
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn test_window_bounds() {
        let window = PageWindow::new(PageRequest::number(2), 21, PAGE_SIZE);
        assert_eq!(window.num_pages, 3);
        assert_eq!(window.offset(), 10);

        let page = window.into_page(vec![0; 10]);
        assert!(page.has_next());
        assert!(page.has_previous());

        let last = PageWindow::new(PageRequest::number(3), 20, PAGE_SIZE);
        assert_eq!(last.number, 2);
        assert_eq!(last.offset(), 10);
    }

    #[test]
    fn test_map_keeps_position() {
        let page = PageWindow::new(PageRequest::first(), 12, PAGE_SIZE).into_page(vec![1, 2]);
        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.items, vec![10, 20]);
        assert_eq!(mapped.num_pages, 2);
    }
}
