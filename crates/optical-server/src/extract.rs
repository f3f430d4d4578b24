//! Request extractors: JSON bodies and list query parameters.

use axum::extract::FromRequest;
use optical_core::PageRequest;
use serde::Deserialize;

use crate::{config::Config, error::ApiError};

/// `axum::Json` whose rejections render as `{"error": ...}` with status 400.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `?page=&limit=&search=` on list routes. Kept as raw strings so garbage
/// input clamps to defaults instead of failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
}

impl ListParams {
    pub fn page_request(&self, config: &Config) -> PageRequest {
        PageRequest::from_raw(
            self.page.as_deref(),
            self.limit.as_deref(),
            self.search.as_deref(),
            config.default_limit,
            config.max_limit,
        )
    }

    /// Bare-array routes switch to the paged envelope once paging is asked for.
    pub fn wants_page(&self) -> bool {
        self.page.is_some() || self.limit.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_clamps() {
        let params = ListParams {
            page: Some("abc".into()),
            limit: Some("500".into()),
            search: Some(" jane ".into()),
        };
        let request = params.page_request(&Config::default());
        assert_eq!(request.page, 1);
        assert_eq!(request.limit, 100);
        assert_eq!(request.search.as_deref(), Some("jane"));
        assert!(params.wants_page());
        assert!(!ListParams::default().wants_page());
    }
}
