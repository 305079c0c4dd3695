use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Envelope returned by every list endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Page<T> {
    pub total: i64,
    pub items: Vec<T>,
    pub num_pages: i64,
}

impl<T> Page<T> {
    pub fn new(total: i64, items: Vec<T>, page_size: i64) -> Self {
        Self {
            total,
            items,
            num_pages: num_pages(total, page_size),
        }
    }
}

/// `ceil(total / page_size)`; zero matches yield zero pages.
pub fn num_pages(total: i64, page_size: i64) -> i64 {
    if page_size < 1 {
        return 0;
    }
    (total + page_size - 1) / page_size
}

/// Page number accepted by list endpoints. The page size itself comes from
/// the `TOTAL_ON_PAGE` setting, not from the client.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PageQuery {
    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { page: 1 }
    }
}

impl PageQuery {
    pub fn offset(&self, page_size: i64) -> i64 {
        (self.page.max(1) - 1) * page_size
    }
}

/// Plain `{"status": "ok"}` acknowledgement body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn num_pages_rounds_up() {
        assert_eq!(num_pages(1, 10), 1);
        assert_eq!(num_pages(10, 10), 1);
        assert_eq!(num_pages(11, 10), 2);
        assert_eq!(num_pages(25, 4), 7);
    }

    #[test]
    fn zero_matches_means_zero_pages() {
        assert_eq!(num_pages(0, 10), 0);
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(PageQuery { page: 1 }.offset(10), 0);
        assert_eq!(PageQuery { page: 3 }.offset(10), 20);
        // Pages below 1 clamp to the first page
        assert_eq!(PageQuery { page: 0 }.offset(10), 0);
        assert_eq!(PageQuery { page: -2 }.offset(10), 0);
    }

    #[test]
    fn page_defaults_to_one() {
        let query: PageQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 1);
    }
}
