//! Pagination

use serde::Serialize;

/// Items per page when the caller does not ask for a size
pub const DEFAULT_PER_PAGE: usize = 10;

/// Hard ceiling on items per page, whatever the caller or config asks for
pub const MAX_PER_PAGE: usize = 25;

/// Page-size bounds applied when reading request parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    default_per_page: usize,
    max_per_page: usize,
}

impl PageLimits {
    /// Build limits; both values are kept within `1..=MAX_PER_PAGE`
    pub fn new(default_per_page: usize, max_per_page: usize) -> Self {
        let max_per_page = max_per_page.clamp(1, MAX_PER_PAGE);
        Self {
            default_per_page: default_per_page.clamp(1, max_per_page),
            max_per_page,
        }
    }

    pub fn default_per_page(&self) -> usize {
        self.default_per_page
    }

    pub fn max_per_page(&self) -> usize {
        self.max_per_page
    }
}

impl Default for PageLimits {
    fn default() -> Self {
        Self::new(DEFAULT_PER_PAGE, MAX_PER_PAGE)
    }
}

/// A validated page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    per_page: usize,
}

impl PageRequest {
    /// Build a request, clamping to the limits
    pub fn new(page: usize, per_page: usize, limits: &PageLimits) -> Self {
        Self {
            page: page.max(1),
            per_page: if per_page == 0 {
                limits.default_per_page()
            } else {
                per_page.min(limits.max_per_page())
            },
        }
    }

    /// Read raw `page` / `per_page` parameters
    ///
    /// Malformed, zero or negative values degrade to the defaults instead of
    /// failing the request.
    pub fn from_params(page: Option<&str>, per_page: Option<&str>, limits: &PageLimits) -> Self {
        let page = parse_positive(page).unwrap_or(1);
        let per_page = parse_positive(per_page).unwrap_or(limits.default_per_page());
        Self::new(page, per_page, limits)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Zero-based position of the first item on this page
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PER_PAGE, &PageLimits::default())
    }
}

fn parse_positive(value: Option<&str>) -> Option<usize> {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|v| *v > 0)
}

/// One page of results plus the metadata renderers need
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Items available across all pages
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
}

impl<T> Page<T> {
    /// Slice one page out of an already ordered sequence
    pub fn from_ordered(ordered: Vec<T>, request: PageRequest) -> Self {
        let total = ordered.len();
        let items = ordered
            .into_iter()
            .skip(request.offset())
            .take(request.per_page())
            .collect();

        Self {
            items,
            total,
            page: request.page(),
            per_page: request.per_page(),
        }
    }

    pub fn empty(request: PageRequest) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: request.page(),
            per_page: request.per_page(),
        }
    }

    pub fn first_item_position(&self) -> usize {
        (self.page - 1).saturating_mul(self.per_page)
    }

    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.per_page.max(1))
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_never_exceed_hard_cap() {
        let limits = PageLimits::new(50, 100);
        assert_eq!(limits.max_per_page(), 25);
        assert_eq!(limits.default_per_page(), 25);
    }

    #[test]
    fn test_per_page_is_capped() {
        let request = PageRequest::from_params(None, Some("50"), &PageLimits::default());
        assert_eq!(request.per_page(), 25);
        assert_eq!(request.page(), 1);
    }

    #[test]
    fn test_malformed_params_use_defaults() {
        let limits = PageLimits::default();
        for (page, per_page) in [
            (Some("abc"), Some("xyz")),
            (Some("0"), Some("0")),
            (Some("-3"), Some("-5")),
            (None, None),
        ] {
            let request = PageRequest::from_params(page, per_page, &limits);
            assert_eq!(request.page(), 1);
            assert_eq!(request.per_page(), DEFAULT_PER_PAGE);
        }
    }

    #[test]
    fn test_offset() {
        let request = PageRequest::from_params(Some("2"), Some("5"), &PageLimits::default());
        assert_eq!(request.offset(), 5);
    }

    #[test]
    fn test_from_ordered_slices_page() {
        let request = PageRequest::from_params(Some("2"), Some("5"), &PageLimits::default());
        let page = Page::from_ordered((1..=10).collect::<Vec<_>>(), request);

        assert_eq!(page.items, vec![6, 7, 8, 9, 10]);
        assert_eq!(page.total, 10);
        assert_eq!(page.first_item_position(), 5);
        assert_eq!(page.total_pages(), 2);
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let request = PageRequest::from_params(Some("9"), Some("5"), &PageLimits::default());
        let page = Page::from_ordered((1..=10).collect::<Vec<_>>(), request);

        assert!(page.items.is_empty());
        assert_eq!(page.total, 10);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let request = PageRequest::new(usize::MAX, 25, &PageLimits::default());
        let page = Page::from_ordered(vec![1, 2, 3], request);
        assert!(page.items.is_empty());
    }
}
