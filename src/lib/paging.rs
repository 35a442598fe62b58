//! Paged listing shapes shared by the backend's `/paged`, `/search` and
//! `/by-account` endpoints.

use serde::{Deserialize, Serialize};

/// Default page size used by every list screen.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// One page of results as returned by the backend.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub size: u32,
}

impl<T> PagedResult<T> {
    /// Number of pages, never less than one so pagers always render.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        if self.size == 0 {
            return 1;
        }
        let pages = self.total.div_ceil(u64::from(self.size));
        u32::try_from(pages).unwrap_or(u32::MAX).max(1)
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.total_pages()
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 0
    }
}

/// Zero-based page request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PageQuery {
    pub page: u32,
    pub size: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageQuery {
    #[must_use]
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            ..self
        }
    }

    #[must_use]
    pub fn previous(self) -> Self {
        Self {
            page: self.page.saturating_sub(1),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PageQuery, PagedResult};

    fn page(total: u64, page: u32, size: u32) -> PagedResult<u8> {
        PagedResult {
            items: Vec::new(),
            total,
            page,
            size,
        }
    }

    #[test]
    fn total_pages_rounds_up_and_never_hits_zero() {
        assert_eq!(page(0, 0, 10).total_pages(), 1);
        assert_eq!(page(10, 0, 10).total_pages(), 1);
        assert_eq!(page(11, 0, 10).total_pages(), 2);
        assert_eq!(page(5, 0, 0).total_pages(), 1);
    }

    #[test]
    fn navigation_flags_follow_page_position() {
        let first = page(25, 0, 10);
        assert!(first.has_next());
        assert!(!first.has_previous());

        let last = page(25, 2, 10);
        assert!(!last.has_next());
        assert!(last.has_previous());
    }

    #[test]
    fn last_possible_page_has_no_next() {
        let edge = page(u64::MAX, u32::MAX, 1);
        assert!(!edge.has_next());
        assert!(edge.has_previous());
    }

    #[test]
    fn page_query_moves_without_underflow() {
        let query = PageQuery::default();
        assert_eq!(query.previous().page, 0);
        assert_eq!(query.next().next().previous().page, 1);
    }

    #[test]
    fn paged_result_decodes_backend_shape() {
        let decoded: PagedResult<u8> =
            serde_json::from_str(r#"{"items":[1,2],"total":12,"page":1,"size":2}"#)
                .expect("valid paged result");
        assert_eq!(decoded.items, vec![1, 2]);
        assert_eq!(decoded.total_pages(), 6);
    }
}
