//! Collecting paginated list endpoints into one `Vec`.
//!
//! Pages are requested one after another starting at `page=1`. The api
//! reports its pagination in response headers; when `X-Total-Pages` is
//! present collection stops after that page, otherwise it stops at the first
//! empty page. An empty page ends collection in either case.

use std::str::FromStr;

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use crate::{fetch::{Fetcher, Query}, Result};

pub const TOTAL_COUNT: &str = "x-total-count";
pub const PER_PAGE: &str = "x-per-page";
pub const TOTAL_PAGES: &str = "x-total-pages";

/// upper bound for what a header may make us allocate up front
const MAX_PREALLOC: usize = 4096;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PageHeaders {
    pub total_count: Option<usize>,
    pub per_page: Option<usize>,
    pub total_pages: Option<u32>,
}

impl PageHeaders {
    pub fn parse(headers: &HeaderMap) -> Self {
        Self {
            total_count: header(headers, TOTAL_COUNT),
            per_page: header(headers, PER_PAGE),
            total_pages: header(headers, TOTAL_PAGES),
        }
    }

    pub fn capacity_hint(&self) -> usize {
        self.total_count
            .or(self.per_page)
            .unwrap_or(0)
        .min(MAX_PREALLOC)
    }

    pub fn is_last(&self, page: u32) -> bool {
        self.total_pages.is_some_and(|total| page >= total)
    }
}

fn header<T: FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}

/// Fetches every page of `segments` filtered by `query`.
///
/// Any failing page fails the whole collection, nothing partial is returned.
pub async fn collect<T: DeserializeOwned>(
    fetcher: &Fetcher,
    query: &Query,
    segments: &[&str],
) -> Result<Vec<T>> {
    let mut query = query.clone();
    let mut items = Vec::new();
    let mut page: u32 = 1;

    loop {
        query.set("page", page);
        let response = fetcher.get(&query, segments).await?;
        let headers = PageHeaders::parse(&response.headers);

        if page == 1 {
            items.reserve(headers.capacity_hint());
        }

        let batch: Vec<T> = serde_json::from_slice(&response.body)?;
        tracing::trace!(
            page, items = batch.len(),
            total_pages = ?headers.total_pages,
            "collected page"
        );

        let done = batch.is_empty() || headers.is_last(page);
        items.extend(batch);
        if done { break; }

        page += 1;
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderValue;

    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(*value));
        }
        map
    }

    #[test]
    fn parses_all_headers() {
        let parsed = PageHeaders::parse(&headers(&[
            ("x-total-count", "30"),
            ("x-per-page", "10"),
            ("x-total-pages", "3"),
        ]));

        assert_eq!(parsed, PageHeaders {
            total_count: Some(30),
            per_page: Some(10),
            total_pages: Some(3),
        });
        assert_eq!(parsed.capacity_hint(), 30);
    }

    #[test]
    fn missing_or_garbage_headers() {
        let parsed = PageHeaders::parse(&headers(&[
            ("x-total-count", "lots"),
            ("x-per-page", "25"),
        ]));

        assert_eq!(parsed.total_count, None);
        assert_eq!(parsed.total_pages, None);
        assert_eq!(parsed.capacity_hint(), 25);
        assert!(!parsed.is_last(1));
        assert!(!parsed.is_last(100));
    }

    #[test]
    fn capacity_is_bounded() {
        let parsed = PageHeaders::parse(&headers(&[("x-total-count", "99999999")]));
        assert_eq!(parsed.capacity_hint(), MAX_PREALLOC);
        assert_eq!(PageHeaders::default().capacity_hint(), 0);
    }

    #[test]
    fn last_page() {
        let parsed = PageHeaders { total_pages: Some(3), ..Default::default() };
        assert!(!parsed.is_last(2));
        assert!(parsed.is_last(3));
        assert!(parsed.is_last(4));

        let none = PageHeaders { total_pages: Some(0), ..Default::default() };
        assert!(none.is_last(1));
    }
}
