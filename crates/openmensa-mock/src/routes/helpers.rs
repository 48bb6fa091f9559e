use axum::http::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;

pub const TOTAL_COUNT: HeaderName = HeaderName::from_static("x-total-count");
pub const PER_PAGE: HeaderName = HeaderName::from_static("x-per-page");
pub const TOTAL_PAGES: HeaderName = HeaderName::from_static("x-total-pages");
pub const CURRENT_PAGE: HeaderName = HeaderName::from_static("x-current-page");

/// how list endpoints split their results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Paging {
    pub page_size: usize,
    /// send the `X-Total-*` headers, without them clients have to request
    /// pages until one comes back empty
    pub headers: bool,
    /// answer this page with a 500
    pub failing_page: Option<u32>,
    /// answer this page with a body that is not json
    pub garbled_page: Option<u32>,
}

impl Default for Paging {
    fn default() -> Self {
        Self { page_size: 10, headers: true, failing_page: None, garbled_page: None }
    }
}

impl Paging {
    /// slice of `items` for the 1-based `page`, pages past the end are empty
    pub fn page<'a, T>(&self, items: &'a [T], page: Option<u32>) -> (HeaderMap, &'a [T]) {
        let page = page.unwrap_or(1).max(1) as usize;
        let per_page = self.page_size.max(1);
        let total_pages = items.len().div_ceil(per_page);

        let start = (page - 1).saturating_mul(per_page).min(items.len());
        let end = start.saturating_add(per_page).min(items.len());

        let mut headers = HeaderMap::new();
        if self.headers {
            headers.insert(TOTAL_COUNT, HeaderValue::from(items.len()));
            headers.insert(PER_PAGE, HeaderValue::from(per_page));
            headers.insert(TOTAL_PAGES, HeaderValue::from(total_pages));
            headers.insert(CURRENT_PAGE, HeaderValue::from(page));
        }

        (headers, &items[start..end])
    }
}

/// great-circle distance in km
pub fn distance_km(from: [f64; 2], to: [f64; 2]) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;

    let [lat1, lng1] = from.map(f64::to_radians);
    let [lat2, lng2] = to.map(f64::to_radians);

    let a = ((lat2 - lat1) / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * ((lng2 - lng1) / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_split_items() {
        let items: Vec<u32> = (0..25).collect();
        let paging = Paging { page_size: 10, headers: true, ..Default::default() };

        let (headers, page) = paging.page(&items, Some(3));
        assert_eq!(page, &[20, 21, 22, 23, 24]);
        assert_eq!(headers[&TOTAL_COUNT], "25");
        assert_eq!(headers[&PER_PAGE], "10");
        assert_eq!(headers[&TOTAL_PAGES], "3");
        assert_eq!(headers[&CURRENT_PAGE], "3");

        let (_, page) = paging.page(&items, Some(4));
        assert!(page.is_empty());

        let (_, page) = paging.page(&items, None);
        assert_eq!(page.len(), 10);
        assert_eq!(page[0], 0);
    }

    #[test]
    fn headers_can_be_disabled() {
        let paging = Paging { page_size: 2, headers: false, ..Default::default() };
        let (headers, page) = paging.page(&[1, 2, 3], Some(2));
        assert!(headers.is_empty());
        assert_eq!(page, &[3]);
    }

    #[test]
    fn distance() {
        let contine = [52.3829, 9.7178];
        assert!(distance_km(contine, contine) < 1e-9);

        let pzh = [52.4204, 9.6188];
        let d = distance_km(contine, pzh);
        assert!((7.0..8.5).contains(&d), "{d}");
    }
}
