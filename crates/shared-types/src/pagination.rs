//! # Pagination Metadata
//!
//! List endpoints report paging through response headers. All values are
//! string-encoded integers; anything unparseable is treated as absent.

use serde::{Deserialize, Serialize};

use crate::envelope::ResponseHeaders;

/// Header carrying the page that was returned.
pub const HEADER_PAGE: &str = "x-page";
/// Header carrying the page size.
pub const HEADER_PER_PAGE: &str = "x-per-page";
/// Header carrying the total number of records.
pub const HEADER_TOTAL_COUNT: &str = "x-total-count";
/// Header carrying the total number of pages.
pub const HEADER_TOTAL_PAGES: &str = "x-total-pages";

/// Paging state of the most recent list fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub latest_page: Option<u64>,
    pub per_page: Option<u64>,
    pub total_count: Option<u64>,
    pub total_pages: Option<u64>,
}

impl Pagination {
    /// Extract pagination from list response headers.
    #[must_use]
    pub fn from_headers(headers: &ResponseHeaders) -> Self {
        let parse = |name: &str| headers.get(name).and_then(|v| v.trim().parse::<u64>().ok());
        Self {
            latest_page: parse(HEADER_PAGE),
            per_page: parse(HEADER_PER_PAGE),
            total_count: parse(HEADER_TOTAL_COUNT),
            total_pages: parse(HEADER_TOTAL_PAGES),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_all_headers() {
        let headers: ResponseHeaders = [
            ("x-page", "2"),
            ("x-per-page", "25"),
            ("x-total-count", "51"),
            ("x-total-pages", "3"),
        ]
        .into_iter()
        .collect();

        let pagination = Pagination::from_headers(&headers);
        assert_eq!(
            pagination,
            Pagination {
                latest_page: Some(2),
                per_page: Some(25),
                total_count: Some(51),
                total_pages: Some(3),
            }
        );
    }

    #[test]
    fn test_missing_and_malformed_headers_are_absent() {
        let headers: ResponseHeaders = [("x-total-count", "1"), ("x-page", "first")]
            .into_iter()
            .collect();

        let pagination = Pagination::from_headers(&headers);
        assert_eq!(pagination.total_count, Some(1));
        assert_eq!(pagination.latest_page, None);
        assert_eq!(pagination.per_page, None);
        assert_eq!(pagination.total_pages, None);
    }
}
